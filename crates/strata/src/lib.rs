#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/strata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export main types from sub-crates
pub use strata_data as data;
pub use strata_output as output;
pub use strata_series as series;

/// Commonly used types.
pub mod prelude {
    pub use strata_data::{ConceptResolver, DataError, FactsDocument, RawFact, SkipReason};
    pub use strata_output::{ExportFormat, Exporter, SeriesSummary};
    pub use strata_series::{
        EngineConfig, GrowthPoint, MetricInfo, MetricSeries, QuarterlyPoint, SeriesEngine,
        TtmPoint, available_metrics, get_metric_info,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
