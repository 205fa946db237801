//! Example demonstrating companyfacts parsing and concept resolution.
//!
//! This example shows how to:
//! 1. Load a companyfacts JSON document from disk
//! 2. List the concepts that carry USD facts
//! 3. Resolve revenue through its fallback concept keys
//!
//! Run with:
//! ```bash
//! cargo run --example companyfacts_example -- CIK0000320193.json
//! ```

use strata_data::edgar::xbrl::{FactsDocument, concepts};
use strata_data::{ConceptResolver, DataError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: companyfacts_example <companyfacts.json>")?;

    println!("=== Companyfacts Example ===\n");

    let doc = FactsDocument::from_path(&path)?;
    println!("Company: {}", doc.entity_name.as_deref().unwrap_or("-"));
    println!("CIK: {}\n", doc.cik.as_deref().unwrap_or("-"));

    // Example 1: USD concepts
    println!("=== Example 1: USD Concepts ===");
    let usd = doc.usd_concepts();
    for (taxonomy, concept, count) in usd.iter().take(10) {
        println!("{:<10} {:<60} {:>6}", taxonomy, concept, count);
    }
    println!("... {} concepts in total\n", usd.len());

    // Example 2: Revenue resolution
    println!("=== Example 2: Revenue ===");
    let keys = [
        concepts::income_statement::REVENUES,
        concepts::income_statement::REVENUE_FROM_CONTRACT,
        concepts::income_statement::SALES_REVENUE_NET,
    ];
    match ConceptResolver::default().resolve(&doc, &keys) {
        Ok(resolved) => {
            let usable = resolved.facts.iter().filter(|f| f.is_usable()).count();
            println!("Resolved to: {}", resolved.key());
            println!("Facts: {} ({} usable)", resolved.facts.len(), usable);
        }
        Err(e @ DataError::NoDataFound { .. }) => println!("{}", e),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
