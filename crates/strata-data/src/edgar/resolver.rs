//! Concept resolution.
//!
//! Companies, and the same company across years, report one line item under
//! different GAAP tags. A metric is therefore described by an ordered list of
//! acceptable concept keys, primary tag first. The resolver walks that list
//! and returns the facts of the first key with usable USD data. Facts are
//! never merged across keys.

use super::xbrl::{FactsDocument, RawFact};
use crate::error::{DataError, Result};

/// Taxonomies searched first, in this order, for unqualified concept keys.
pub const DEFAULT_TAXONOMIES: &[&str] = &["us-gaap", "ifrs-full"];

/// The facts a metric resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConcept<'a> {
    /// Taxonomy the concept was found in
    pub taxonomy: &'a str,
    /// Concept name without the taxonomy prefix
    pub concept: &'a str,
    /// Raw USD facts, in feed order
    pub facts: &'a [RawFact],
}

impl ResolvedConcept<'_> {
    /// Fully qualified key, e.g. `us-gaap:Revenues`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.taxonomy, self.concept)
    }
}

/// Picks the first usable concept from an ordered candidate list.
#[derive(Debug, Clone)]
pub struct ConceptResolver {
    /// Taxonomy search order for unqualified keys
    taxonomies: Vec<String>,
}

impl ConceptResolver {
    /// Create a resolver with a custom taxonomy search order.
    ///
    /// Taxonomies not listed are still searched afterwards, in lexical order.
    pub fn with_taxonomies<I, S>(taxonomies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taxonomies: taxonomies.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve the first candidate key with at least one valid USD fact.
    ///
    /// Keys may be bare (`Revenues`) or qualified (`us-gaap:Revenues`).
    /// Returns [`DataError::NoDataFound`] when no candidate qualifies.
    pub fn resolve<'a, S: AsRef<str>>(
        &self,
        doc: &'a FactsDocument,
        candidates: &[S],
    ) -> Result<ResolvedConcept<'a>> {
        for candidate in candidates {
            let key = candidate.as_ref();
            let (taxonomy, concept) = split_key(key);

            let search: Vec<&str> = match taxonomy {
                Some(t) => vec![t],
                None => self.search_order(doc),
            };

            for taxonomy in search {
                let Some((taxonomy, concept, facts)) = lookup(doc, taxonomy, concept) else {
                    continue;
                };
                if facts.is_empty() {
                    continue;
                }
                if !facts.iter().any(RawFact::is_usable) {
                    tracing::debug!(
                        taxonomy,
                        concept,
                        facts = facts.len(),
                        "concept has USD facts but none are usable"
                    );
                    continue;
                }

                tracing::debug!(taxonomy, concept, facts = facts.len(), "resolved concept");
                return Ok(ResolvedConcept {
                    taxonomy,
                    concept,
                    facts,
                });
            }
        }

        Err(DataError::NoDataFound {
            candidates: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
        })
    }

    fn search_order<'a>(&'a self, doc: &'a FactsDocument) -> Vec<&'a str> {
        let mut order: Vec<&str> = self
            .taxonomies
            .iter()
            .map(String::as_str)
            .filter(|t| doc.facts.contains_key(*t))
            .collect();
        order.extend(
            doc.taxonomies()
                .filter(|t| !self.taxonomies.iter().any(|p| p.as_str() == *t)),
        );
        order
    }
}

impl Default for ConceptResolver {
    fn default() -> Self {
        Self::with_taxonomies(DEFAULT_TAXONOMIES.iter().copied())
    }
}

fn split_key(key: &str) -> (Option<&str>, &str) {
    match key.split_once(':') {
        Some((taxonomy, concept)) => (Some(taxonomy), concept),
        None => (None, key),
    }
}

/// Look up a concept's USD facts, borrowing names from the document itself.
fn lookup<'a>(
    doc: &'a FactsDocument,
    taxonomy: &str,
    concept: &str,
) -> Option<(&'a str, &'a str, &'a [RawFact])> {
    let (taxonomy, concepts) = doc.facts.get_key_value(taxonomy)?;
    let (concept, data) = concepts.get_key_value(concept)?;
    let facts = data.units.get(super::xbrl::USD)?;
    Some((taxonomy.as_str(), concept.as_str(), facts.as_slice()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(val: Option<f64>) -> RawFact {
        RawFact {
            start: Some("2024-01-01".to_string()),
            end: Some("2024-03-31".to_string()),
            val,
            form: Some("10-Q".to_string()),
            ..Default::default()
        }
    }

    fn doc() -> FactsDocument {
        FactsDocument::new()
            .with_usd_facts("us-gaap", "Revenues", vec![fact(Some(100.0))])
            .with_usd_facts(
                "us-gaap",
                "RevenueFromContractWithCustomerExcludingAssessedTax",
                vec![fact(Some(90.0)), fact(Some(95.0))],
            )
            .with_usd_facts("us-gaap", "SalesRevenueNet", vec![])
            .with_usd_facts("us-gaap", "GrossProfit", vec![fact(Some(0.0))])
            .with_usd_facts("ifrs-full", "Revenue", vec![fact(Some(70.0))])
    }

    #[test]
    fn test_first_candidate_wins() {
        let doc = doc();
        let resolved = ConceptResolver::default()
            .resolve(
                &doc,
                &[
                    "Revenues",
                    "RevenueFromContractWithCustomerExcludingAssessedTax",
                ],
            )
            .unwrap();

        assert_eq!(resolved.key(), "us-gaap:Revenues");
        assert_eq!(resolved.facts.len(), 1);
    }

    #[test]
    fn test_order_matters() {
        let doc = doc();
        let resolved = ConceptResolver::default()
            .resolve(
                &doc,
                &[
                    "us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax",
                    "us-gaap:Revenues",
                ],
            )
            .unwrap();

        assert_eq!(
            resolved.concept,
            "RevenueFromContractWithCustomerExcludingAssessedTax"
        );
        assert_eq!(resolved.facts.len(), 2);
    }

    #[test]
    fn test_empty_and_unusable_arrays_fall_through() {
        let doc = doc();
        let resolved = ConceptResolver::default()
            .resolve(&doc, &["SalesRevenueNet", "GrossProfit", "Revenues"])
            .unwrap();

        assert_eq!(resolved.concept, "Revenues");
    }

    #[test]
    fn test_bare_key_searches_other_taxonomies() {
        let doc = doc();
        let resolved = ConceptResolver::default()
            .resolve(&doc, &["Revenue"])
            .unwrap();

        assert_eq!(resolved.key(), "ifrs-full:Revenue");
    }

    #[test]
    fn test_qualified_key_is_not_searched_elsewhere() {
        let doc = doc();
        let result = ConceptResolver::default()
            .resolve(&doc, &["us-gaap:Revenue"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_data_found() {
        let doc = doc();
        let err = ConceptResolver::default()
            .resolve(&doc, &["Nonexistent", "AlsoMissing"])
            .unwrap_err();

        assert!(err.is_no_data());
        assert_eq!(
            err.to_string(),
            "No usable facts for any of: Nonexistent, AlsoMissing"
        );
    }

    #[test]
    fn test_custom_taxonomy_order() {
        let doc = doc()
            .with_usd_facts("us-gaap", "Revenue", vec![fact(Some(1.0))]);

        let default = ConceptResolver::default()
            .resolve(&doc, &["Revenue"])
            .unwrap();
        assert_eq!(default.taxonomy, "us-gaap");

        let ifrs_first = ConceptResolver::with_taxonomies(["ifrs-full"])
            .resolve(&doc, &["Revenue"])
            .unwrap();
        assert_eq!(ifrs_first.taxonomy, "ifrs-full");
    }
}
