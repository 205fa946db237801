//! Integration tests for series export and summary.

use strata_data::{FactsDocument, RawFact};
use strata_output::{ExportFormat, Exporter, SeriesSummary};
use strata_series::{MetricSeries, SeriesEngine};

fn fact(start: &str, end: &str, val: f64, form: &str) -> RawFact {
    RawFact {
        start: Some(start.to_string()),
        end: Some(end.to_string()),
        val: Some(val),
        form: Some(form.to_string()),
        filed: Some("2024-02-15".to_string()),
        ..Default::default()
    }
}

fn derived_revenue() -> MetricSeries {
    let doc = FactsDocument::new().with_usd_facts(
        "us-gaap",
        "Revenues",
        vec![
            fact("2023-01-01", "2023-03-31", 100.0, "10-Q"),
            fact("2023-04-01", "2023-06-30", 120.0, "10-Q"),
            fact("2023-07-01", "2023-09-30", 90.0, "10-Q"),
            fact("2023-01-01", "2023-09-30", 310.0, "10-Q"),
            fact("2023-01-01", "2023-12-31", 500.0, "10-K"),
        ],
    );
    SeriesEngine::default()
        .derive_by_name(&doc, "revenue")
        .unwrap()
}

#[test]
fn test_full_export_workflow() {
    let series = derived_revenue();

    let csv = series.export_to_string(ExportFormat::Csv).unwrap();
    assert!(csv.starts_with("series,periodEnd,value\n"));
    assert!(csv.contains("quarterly,2023-12-31,190.0"));
    assert!(csv.contains("ttm,2023-12-31,500.0"));

    let quarters_csv = series
        .quarterly
        .export_to_string(ExportFormat::Csv)
        .unwrap();
    assert_eq!(quarters_csv.lines().count(), 5);

    let json = series.export_to_string(ExportFormat::Json).unwrap();
    let back: MetricSeries = serde_json::from_str(&json).unwrap();
    assert_eq!(back.ttm, series.ttm);
    assert_eq!(back.diagnostics, series.diagnostics);
}

#[test]
fn test_export_to_file() {
    let series = derived_revenue();
    let path = std::env::temp_dir().join(format!(
        "strata-output-test-{}.{}",
        std::process::id(),
        ExportFormat::PrettyJson.extension()
    ));

    series
        .ttm
        .export_to_file(&path, ExportFormat::PrettyJson)
        .unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(written.contains("\"periodEnd\": \"2023-12-31\""));
    assert!(written.contains("\"value\": 500.0"));
}

#[test]
fn test_full_summary_workflow() {
    let summary = SeriesSummary::from_series(&derived_revenue());

    assert_eq!(summary.rows.len(), 4);
    assert_eq!(summary.rows[3].quarterly, Some(190.0));

    let ascii = summary.to_ascii_table();
    assert!(ascii.contains("us-gaap:Revenues"));
    assert!(!ascii.contains("190*"));
    assert!(ascii.contains("Imputed: 1"));

    let rows = serde_json::to_string(&summary.rows).unwrap();
    assert!(!rows.contains("imputed"));

    let markdown = summary.to_markdown();
    assert!(markdown.contains("# revenue"));
    assert!(markdown.contains("| Period End |"));
}
