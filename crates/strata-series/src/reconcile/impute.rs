//! Fourth-quarter imputation.
//!
//! 10-Qs report nine-month year-to-date figures and 10-Ks report the full
//! year, but almost nobody files a standalone Q4. It is backed out as
//! `annual - nine_month` for the same fiscal year.

use super::quarters::{cumulative_preference, dedupe_cumulative};
use crate::config::EngineConfig;
use crate::point::QuarterlyPoint;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use strata_data::FactRecord;

/// Synthesize Q4 points for years that have an annual and a matching
/// nine-month fact but no directly reported quarter at the annual end.
///
/// A nine-month fact matches an annual fact when both start on the same day
/// and the nine-month end falls within the configured offset band before the
/// annual end. If several match, the one closest to the target offset wins,
/// then [`cumulative_preference`]. A zero difference is treated as unreported.
///
/// Output is ascending by `period_end`, at most one point per period end.
pub fn impute_q4(
    annual: &[FactRecord],
    nine_month: &[FactRecord],
    direct: &[QuarterlyPoint],
    config: &EngineConfig,
) -> Vec<QuarterlyPoint> {
    let offset_band = config.q4_offset_band();
    let direct_ends: BTreeSet<NaiveDate> = direct.iter().map(|p| p.period_end).collect();

    let mut by_start: BTreeMap<NaiveDate, Vec<&FactRecord>> = BTreeMap::new();
    for record in dedupe_cumulative(nine_month) {
        by_start
            .entry(record.period_start)
            .or_default()
            .push(record);
    }

    let mut imputed: BTreeMap<NaiveDate, QuarterlyPoint> = BTreeMap::new();

    for year in dedupe_cumulative(annual) {
        if direct_ends.contains(&year.period_end) {
            tracing::debug!(period_end = %year.period_end, "direct Q4 present, not imputing");
            continue;
        }
        if imputed.contains_key(&year.period_end) {
            continue;
        }

        let Some(candidates) = by_start.get(&year.period_start) else {
            continue;
        };

        let offset = |n: &FactRecord| (year.period_end - n.period_end).num_days();
        let best = candidates
            .iter()
            .copied()
            .filter(|n| offset_band.contains(offset(*n)))
            .max_by(|a, b| {
                let da = (offset(*a) - config.q4_offset_days).abs();
                let db = (offset(*b) - config.q4_offset_days).abs();
                db.cmp(&da).then_with(|| cumulative_preference(*a, *b))
            });

        let Some(nine) = best else {
            tracing::debug!(period_end = %year.period_end, "no matching nine-month fact");
            continue;
        };

        let value = year.value - nine.value;
        if value == 0.0 || !value.is_finite() {
            tracing::debug!(period_end = %year.period_end, value, "discarding imputed Q4");
            continue;
        }

        tracing::debug!(
            period_end = %year.period_end,
            annual = year.value,
            nine_month = nine.value,
            value,
            "imputed Q4"
        );
        imputed.insert(
            year.period_end,
            QuarterlyPoint::imputed(year.period_end, value),
        );
    }

    imputed.into_values().collect()
}
