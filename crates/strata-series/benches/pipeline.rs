//! Benchmarks for series derivation.

use chrono::{Days, Months, NaiveDate};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use strata_data::{FactsDocument, RawFact};
use strata_series::{SeriesEngine, reconcile_quarters, trailing_twelve_months};

fn fact(start: NaiveDate, end: NaiveDate, val: f64, form: &str, filed: NaiveDate) -> RawFact {
    RawFact {
        start: Some(start.to_string()),
        end: Some(end.to_string()),
        val: Some(val),
        form: Some(form.to_string()),
        filed: Some(filed.to_string()),
        ..Default::default()
    }
}

/// Forty years of filings: three 10-Q quarters with prior-year comparatives,
/// a nine-month cumulative and a 10-K per year.
fn synthetic_document() -> FactsDocument {
    let first = NaiveDate::from_ymd_opt(1985, 1, 1).unwrap_or_default();
    let mut facts = Vec::new();

    for year in 0..40 {
        let year_start = first + Months::new(12 * year);
        let base = 1_000.0 + f64::from(year) * 25.0;

        for q in 0..3 {
            let start = year_start + Months::new(3 * q);
            let end = start + Months::new(3) - Days::new(1);
            let value = base + f64::from(q) * 10.0;
            facts.push(fact(start, end, value, "10-Q", end + Days::new(40)));
            facts.push(fact(start, end, value, "10-Q", end + Days::new(405)));
        }

        let nine_end = year_start + Months::new(9) - Days::new(1);
        let year_end = year_start + Months::new(12) - Days::new(1);
        let nine = 3.0 * base + 30.0;
        facts.push(fact(
            year_start,
            nine_end,
            nine,
            "10-Q",
            nine_end + Days::new(40),
        ));
        facts.push(fact(
            year_start,
            year_end,
            nine + base + 50.0,
            "10-K",
            year_end + Days::new(60),
        ));
    }

    FactsDocument::new()
        .with_usd_facts("us-gaap", "Revenues", facts)
}

fn benchmark_pipeline(c: &mut Criterion) {
    let doc = synthetic_document();
    let engine = SeriesEngine::default();

    c.bench_function("derive_40_years", |b| {
        b.iter(|| engine.derive_keys(black_box(&doc), "revenue", &["Revenues"]))
    });

    c.bench_function("quarterly_40_years", |b| {
        b.iter(|| engine.quarterly(black_box(&doc), &["Revenues"]))
    });
}

fn benchmark_stages(c: &mut Criterion) {
    let doc = synthetic_document();
    let engine = SeriesEngine::default();
    let records: Vec<_> = doc
        .usd_facts("us-gaap", "Revenues")
        .unwrap_or_default()
        .iter()
        .filter_map(|f| f.validate("Revenues").ok())
        .filter(|r| engine.config().quarterly_band.contains(r.duration_days()))
        .collect();
    let quarters = engine.quarterly(&doc, &["Revenues"]);

    c.bench_function("reconcile_quarters", |b| {
        b.iter(|| reconcile_quarters(black_box(&records)))
    });

    c.bench_function("trailing_twelve_months", |b| {
        b.iter(|| trailing_twelve_months(black_box(&quarters), engine.config()))
    });
}

criterion_group!(benches, benchmark_pipeline, benchmark_stages);
criterion_main!(benches);
