//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
///
/// Individual malformed facts are not errors; they are reported through
/// [`SkipReason`](crate::edgar::SkipReason) and dropped.
#[derive(Debug, Error)]
pub enum DataError {
    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// None of the candidate concept keys carried usable USD facts
    #[error("No usable facts for any of: {}", .candidates.join(", "))]
    NoDataFound {
        /// Concept keys that were tried, in order
        candidates: Vec<String>,
    },

    /// Metric name not present in the registry
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Engine configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DataError {
    /// Returns true for the routine "company does not report this" outcome.
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoDataFound { .. })
    }
}
