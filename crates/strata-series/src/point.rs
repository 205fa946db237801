//! Series point types.
//!
//! All points serialize as `{"periodEnd": "YYYY-MM-DD", ...}`.

use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Where a quarterly value came from.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Reported as a single-quarter fact
    #[default]
    #[display("direct")]
    Direct,
    /// Backed out as annual minus nine-month cumulative
    #[display("imputed")]
    Imputed,
}

/// One entry of the canonical quarterly series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyPoint {
    /// Last day of the quarter, unique within a series
    pub period_end: NaiveDate,
    /// Quarter value in US dollars
    pub value: f64,
    /// Only used to break ties while merging
    #[serde(skip)]
    pub origin: Origin,
}

impl QuarterlyPoint {
    /// A directly reported quarter.
    pub const fn direct(period_end: NaiveDate, value: f64) -> Self {
        Self {
            period_end,
            value,
            origin: Origin::Direct,
        }
    }

    /// An imputed quarter.
    pub const fn imputed(period_end: NaiveDate, value: f64) -> Self {
        Self {
            period_end,
            value,
            origin: Origin::Imputed,
        }
    }
}

/// Trailing-twelve-month sum ending at `period_end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtmPoint {
    /// End of the newest of the four summed quarters
    pub period_end: NaiveDate,
    /// Sum of the four quarters
    pub value: f64,
}

/// Year-over-year growth for the period ending at `period_end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    /// End of the current period
    pub period_end: NaiveDate,
    /// `(current - prior) / prior * 100`
    pub growth_percent: f64,
}

/// A dated value that growth can be computed over.
pub trait Observation {
    /// End of the period the value covers.
    fn period_end(&self) -> NaiveDate;

    /// The value.
    fn value(&self) -> f64;
}

impl Observation for QuarterlyPoint {
    fn period_end(&self) -> NaiveDate {
        self.period_end
    }

    fn value(&self) -> f64 {
        self.value
    }
}

impl Observation for TtmPoint {
    fn period_end(&self) -> NaiveDate {
        self.period_end
    }

    fn value(&self) -> f64 {
        self.value
    }
}

/// Output of a derivation stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation<T> {
    /// Derived points, ascending by period end
    pub points: Vec<T>,
    /// Windows that could not be computed (gaps, zero priors)
    pub skipped: usize,
}
