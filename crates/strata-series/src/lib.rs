#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/strata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod derive;
pub mod engine;
pub mod point;
pub mod reconcile;
pub mod registry;

pub use config::{DayBand, EngineConfig};
pub use derive::{trailing_twelve_months, yoy_growth};
pub use engine::{Diagnostics, MetricSeries, SeriesEngine};
pub use point::{Derivation, GrowthPoint, Observation, Origin, QuarterlyPoint, TtmPoint};
pub use reconcile::{ClassifiedFacts, FactClass, impute_q4, merge_series, reconcile_quarters};

// Re-export registry types for convenience
pub use registry::{
    MetricCategory, MetricInfo, available_metrics, get_metric_info, metrics_by_category,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
