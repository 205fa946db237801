//! Export functionality for derived series.
//!
//! Point vectors export as one CSV row per point. A whole [`MetricSeries`]
//! exports to CSV as long-format `series,periodEnd,value` rows and to JSON
//! in its native shape, diagnostics included.

use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use strata_series::{GrowthPoint, MetricSeries, QuarterlyPoint, TtmPoint};
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Long-format CSV row for a [`MetricSeries`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesRow<'a> {
    series: &'a str,
    period_end: NaiveDate,
    value: f64,
}

/// Flatten a series to long-format rows, one block per derived series.
fn series_rows(series: &MetricSeries) -> Vec<SeriesRow<'static>> {
    let quarterly = series.quarterly.iter().map(|p| SeriesRow {
        series: "quarterly",
        period_end: p.period_end,
        value: p.value,
    });
    let ttm = series.ttm.iter().map(|p| SeriesRow {
        series: "ttm",
        period_end: p.period_end,
        value: p.value,
    });
    let quarterly_growth = series.quarterly_growth.iter().map(|g| SeriesRow {
        series: "quarterly_growth",
        period_end: g.period_end,
        value: g.growth_percent,
    });
    let ttm_growth = series.ttm_growth.iter().map(|g| SeriesRow {
        series: "ttm_growth",
        period_end: g.period_end,
        value: g.growth_percent,
    });

    quarterly
        .chain(ttm)
        .chain(quarterly_growth)
        .chain(ttm_growth)
        .collect()
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn to_csv<I>(records: I) -> Result<String, ExportError>
where
    I: IntoIterator,
    I::Item: Serialize,
{
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| ExportError::InvalidFormat(format!("CSV output is not UTF-8: {}", e)))
}

fn to_json<T: Serialize + ?Sized>(value: &T, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(value)?),
        _ => Ok(serde_json::to_string(value)?),
    }
}

impl Exporter for Vec<QuarterlyPoint> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => to_csv(self),
            ExportFormat::Json | ExportFormat::PrettyJson => to_json(self, format),
        }
    }
}

impl Exporter for Vec<TtmPoint> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => to_csv(self),
            ExportFormat::Json | ExportFormat::PrettyJson => to_json(self, format),
        }
    }
}

impl Exporter for Vec<GrowthPoint> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => to_csv(self),
            ExportFormat::Json | ExportFormat::PrettyJson => to_json(self, format),
        }
    }
}

impl Exporter for MetricSeries {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => to_csv(series_rows(self)),
            ExportFormat::Json | ExportFormat::PrettyJson => to_json(self, format),
        }
    }
}
