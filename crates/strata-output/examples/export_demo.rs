//! Demonstration of the export functionality in strata-output.

use strata_data::{FactsDocument, RawFact};
use strata_output::{ExportFormat, Exporter, SeriesSummary};
use strata_series::SeriesEngine;

fn fact(start: &str, end: &str, val: f64, form: &str, filed: &str) -> RawFact {
    RawFact {
        start: Some(start.to_string()),
        end: Some(end.to_string()),
        val: Some(val),
        form: Some(form.to_string()),
        filed: Some(filed.to_string()),
        ..Default::default()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Strata Export Demo ===\n");

    // Two fiscal years, fourth quarters only reported through the 10-K
    let mut facts = Vec::new();
    for (year, base) in [(2022, 100.0), (2023, 115.0)] {
        let filed_q = format!("{}-11-01", year);
        let filed_k = format!("{}-02-15", year + 1);
        let periods = [
            ("01-01", "03-31", base, "10-Q"),
            ("04-01", "06-30", base + 10.0, "10-Q"),
            ("07-01", "09-30", base + 20.0, "10-Q"),
            ("01-01", "09-30", 3.0 * base + 30.0, "10-Q"),
            ("01-01", "12-31", 4.0 * base + 70.0, "10-K"),
        ];
        for (start, end, val, form) in periods {
            let filed = if form == "10-K" { &filed_k } else { &filed_q };
            let start = format!("{}-{}", year, start);
            let end = format!("{}-{}", year, end);
            facts.push(fact(&start, &end, val, form, filed));
        }
    }
    let doc = FactsDocument::new()
        .with_usd_facts("us-gaap", "Revenues", facts);

    let series = SeriesEngine::default().derive_by_name(&doc, "revenue")?;

    // 1. Summary table
    println!("1. Summary\n");
    println!("{}", SeriesSummary::from_series(&series));

    // 2. CSV
    println!("2. CSV\n");
    println!("{}", series.export_to_string(ExportFormat::Csv)?);

    // 3. TTM as pretty JSON
    println!("3. TTM JSON\n");
    println!("{}", series.ttm.export_to_string(ExportFormat::PrettyJson)?);

    Ok(())
}
