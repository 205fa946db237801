//! Building the canonical quarterly series from raw facts.
//!
//! Stages, in pipeline order:
//! - [`classify`]: bucket facts by duration
//! - [`quarters`]: deduplicate same-period quarters
//! - [`impute`]: back out missing fourth quarters
//! - [`merge`]: combine, dedupe and cap the series

pub mod classify;
pub mod impute;
pub mod merge;
pub mod quarters;

pub use classify::{ClassifiedFacts, FactClass, classify};
pub use impute::impute_q4;
pub use merge::merge_series;
pub use quarters::{
    by_amendment, by_filed_date, by_frame_match, cumulative_preference, dedupe_cumulative,
    filing_preference, reconcile_quarters,
};
