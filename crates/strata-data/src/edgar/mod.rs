//! SEC EDGAR companyfacts data.
//!
//! This module provides:
//! - The `companyfacts` XBRL JSON document model
//! - Per-fact validation with typed skip reasons
//! - Concept resolution across alternate GAAP tags
//!
//! # Example
//!
//! ```no_run
//! use strata_data::edgar::{ConceptResolver, FactsDocument, concepts};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let doc = FactsDocument::from_path("CIK0000320193.json")?;
//!     let keys = [
//!         concepts::income_statement::REVENUES,
//!         concepts::income_statement::REVENUE_FROM_CONTRACT,
//!     ];
//!     let resolved = ConceptResolver::default().resolve(&doc, &keys)?;
//!     println!("{} has {} USD facts", resolved.key(), resolved.facts.len());
//!     Ok(())
//! }
//! ```

pub mod resolver;
pub mod xbrl;

pub use resolver::{ConceptResolver, ResolvedConcept};
pub use xbrl::{ConceptFacts, FactRecord, FactsDocument, RawFact, SkipReason, USD, concepts};
