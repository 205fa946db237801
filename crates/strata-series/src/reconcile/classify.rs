//! Fact classification by period length.
//!
//! Income and cash flow facts are durations. A 10-Q carries both the
//! three-month figure and a year-to-date cumulative, a 10-K carries the full
//! year. Only three shapes matter downstream: single quarters, nine-month
//! cumulatives (for Q4 imputation) and full years.

use crate::config::EngineConfig;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strata_data::{FactRecord, RawFact, SkipReason};

/// Duration bucket of a fact.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactClass {
    /// About three months
    #[display("quarterly")]
    Quarterly,
    /// About nine months, year to date
    #[display("nine-month")]
    NineMonth,
    /// About twelve months
    #[display("annual")]
    Annual,
}

/// Classify a validated fact by its duration.
///
/// Facts outside all three bands (half years, stub periods, partial
/// restatements) are rejected with [`SkipReason::OutOfBand`].
pub fn classify(record: &FactRecord, config: &EngineConfig) -> Result<FactClass, SkipReason> {
    let days = record.duration_days();

    if config.quarterly_band.contains(days) {
        Ok(FactClass::Quarterly)
    } else if config.nine_month_band.contains(days) {
        Ok(FactClass::NineMonth)
    } else if config.annual_band.contains(days) {
        Ok(FactClass::Annual)
    } else {
        Err(SkipReason::OutOfBand { days })
    }
}

/// A concept's facts split into duration buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedFacts {
    /// Single-quarter facts, feed order
    pub quarterly: Vec<FactRecord>,
    /// Nine-month cumulative facts, feed order
    pub nine_month: Vec<FactRecord>,
    /// Annual facts, feed order
    pub annual: Vec<FactRecord>,
    /// Dropped facts as `(index into the raw array, reason)`
    pub skipped: Vec<(usize, SkipReason)>,
}

impl ClassifiedFacts {
    /// Validate and bucket every raw fact of one concept.
    pub fn from_raw(concept: &str, facts: &[RawFact], config: &EngineConfig) -> Self {
        let mut out = Self::default();

        for (index, raw) in facts.iter().enumerate() {
            let classified = raw
                .validate(concept)
                .and_then(|record| classify(&record, config).map(|class| (class, record)));

            match classified {
                Ok((FactClass::Quarterly, record)) => out.quarterly.push(record),
                Ok((FactClass::NineMonth, record)) => out.nine_month.push(record),
                Ok((FactClass::Annual, record)) => out.annual.push(record),
                Err(reason) => {
                    tracing::debug!(
                        concept,
                        index,
                        end = raw.end.as_deref().unwrap_or("-"),
                        form = raw.form.as_deref().unwrap_or("-"),
                        %reason,
                        "skipping fact"
                    );
                    out.skipped.push((index, reason));
                }
            }
        }

        out
    }

    /// Number of facts that were kept.
    pub fn kept(&self) -> usize {
        self.quarterly.len() + self.nine_month.len() + self.annual.len()
    }
}
