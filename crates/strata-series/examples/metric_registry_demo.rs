//! Demonstration of the metric registry
//!
//! This example shows how to:
//! - List all built-in metrics
//! - Query metrics by category
//! - Derive a metric through its concept fallback chain
//!
//! Run with: cargo run --example metric_registry_demo -p strata-series

use strata_data::{FactsDocument, RawFact};
use strata_series::{MetricCategory, SeriesEngine, available_metrics, metrics_by_category};

fn main() {
    println!("Strata Metric Registry Demo");
    println!("===========================\n");

    let metrics = available_metrics();
    println!("Total metrics available: {}\n", metrics.len());

    for category in [
        MetricCategory::Income,
        MetricCategory::Expense,
        MetricCategory::CashFlow,
    ] {
        println!("{}:", category);
        for metric in metrics_by_category(category) {
            println!("  {:<26} {}", metric.name, metric.description);
            for key in metric.concept_keys {
                println!("    - {}", key);
            }
        }
        println!();
    }

    // Revenue reported only under the ASC 606 tag
    let fact = RawFact {
        start: Some("2024-01-01".to_string()),
        end: Some("2024-03-31".to_string()),
        val: Some(2_500_000.0),
        form: Some("10-Q".to_string()),
        filed: Some("2024-04-30".to_string()),
        ..Default::default()
    };
    let doc = FactsDocument::new().with_usd_facts(
        "us-gaap",
        "RevenueFromContractWithCustomerExcludingAssessedTax",
        vec![fact],
    );

    let engine = SeriesEngine::default();
    for name in ["revenue", "net_income"] {
        match engine.derive_by_name(&doc, name) {
            Ok(series) => println!(
                "{:<12} concept={:<60} quarters={}",
                name,
                series.concept.as_deref().unwrap_or("(none)"),
                series.quarterly.len()
            ),
            Err(e) => println!("{:<12} error: {}", name, e),
        }
    }
}
