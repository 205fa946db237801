//! The derivation pipeline.
//!
//! ```text
//! resolve concept -> validate + classify -> reconcile quarters
//!                 -> impute Q4 -> merge -> TTM -> YoY
//! ```
//!
//! The engine holds only configuration. Every call reads its own input and
//! allocates its own output, so one engine can serve any number of threads.

use crate::config::EngineConfig;
use crate::derive::{trailing_twelve_months, yoy_growth};
use crate::point::{GrowthPoint, Observation, QuarterlyPoint, TtmPoint};
use crate::reconcile::{ClassifiedFacts, impute_q4, merge_series, reconcile_quarters};
use crate::registry::{MetricInfo, get_metric_info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strata_data::{ConceptResolver, DataError, FactsDocument, RawFact, Result, SkipReason};

/// Counters describing what the pipeline dropped, merged or synthesized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Raw facts under the resolved concept
    pub facts_seen: usize,
    /// Dropped facts by [`SkipReason::label`]
    pub skipped: BTreeMap<String, usize>,
    /// Facts classified as single quarters
    pub quarterly_facts: usize,
    /// Facts classified as nine-month cumulatives
    pub nine_month_facts: usize,
    /// Facts classified as annual
    pub annual_facts: usize,
    /// Quarterly facts superseded by a preferred same-period fact
    pub duplicate_quarters: usize,
    /// Fourth quarters backed out from annual and nine-month facts
    pub imputed_quarters: usize,
    /// Quarters dropped by the series length cap
    pub truncated_quarters: usize,
    /// TTM windows skipped because of a quarter gap
    pub ttm_gaps: usize,
    /// Quarterly growth periods omitted
    pub quarterly_growth_gaps: usize,
    /// TTM growth periods omitted
    pub ttm_growth_gaps: usize,
}

impl Diagnostics {
    /// Count one dropped fact.
    pub fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason.label().to_string()).or_default() += 1;
    }

    /// Total dropped facts.
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// The three derived series for one metric of one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeries {
    /// Metric name (e.g. "revenue")
    pub metric: String,
    /// Qualified concept the facts were read from, `None` if nothing matched
    pub concept: Option<String>,
    /// Canonical quarterly series, ascending
    pub quarterly: Vec<QuarterlyPoint>,
    /// Trailing-twelve-month sums, ascending
    pub ttm: Vec<TtmPoint>,
    /// Year-over-year growth of the quarterly series
    pub quarterly_growth: Vec<GrowthPoint>,
    /// Year-over-year growth of the TTM series
    pub ttm_growth: Vec<GrowthPoint>,
    /// Pipeline counters
    pub diagnostics: Diagnostics,
}

impl MetricSeries {
    /// The empty series reported when the company does not disclose a metric.
    pub fn empty(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            concept: None,
            quarterly: Vec::new(),
            ttm: Vec::new(),
            quarterly_growth: Vec::new(),
            ttm_growth: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Returns true if no quarterly data was derived.
    pub fn is_empty(&self) -> bool {
        self.quarterly.is_empty()
    }

    /// Most recent TTM value.
    pub fn latest_ttm(&self) -> Option<&TtmPoint> {
        self.ttm.last()
    }
}

/// Derives quarterly, TTM and growth series from a facts document.
#[derive(Debug, Clone, Default)]
pub struct SeriesEngine {
    config: EngineConfig,
    resolver: ConceptResolver,
}

impl SeriesEngine {
    /// Create an engine with a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            resolver: ConceptResolver::default(),
        })
    }

    /// Replace the concept resolver.
    pub fn with_resolver(mut self, resolver: ConceptResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Engine configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Canonical quarterly series for the first usable concept key.
    ///
    /// Empty when no key matches.
    pub fn quarterly<S: AsRef<str>>(
        &self,
        doc: &FactsDocument,
        concept_keys: &[S],
    ) -> Vec<QuarterlyPoint> {
        let Ok(resolved) = self.resolver.resolve(doc, concept_keys) else {
            return Vec::new();
        };
        let mut diagnostics = Diagnostics::default();
        self.build_quarters(resolved.concept, resolved.facts, &mut diagnostics)
    }

    /// TTM sums over an ascending quarterly series.
    pub fn ttm(&self, quarters: &[QuarterlyPoint]) -> Vec<TtmPoint> {
        trailing_twelve_months(quarters, &self.config).points
    }

    /// YoY growth over an ascending quarterly or TTM series.
    pub fn growth<P: Observation>(&self, series: &[P]) -> Vec<GrowthPoint> {
        yoy_growth(series, &self.config).points
    }

    /// Derive all series for a registered metric.
    pub fn derive(&self, doc: &FactsDocument, metric: &MetricInfo) -> MetricSeries {
        self.derive_keys(doc, metric.name, metric.concept_keys)
    }

    /// Derive all series for a metric looked up by name.
    pub fn derive_by_name(&self, doc: &FactsDocument, name: &str) -> Result<MetricSeries> {
        let metric = get_metric_info(name)
            .ok_or_else(|| DataError::UnknownMetric(name.to_string()))?;
        Ok(self.derive(doc, &metric))
    }

    /// Derive all series for an ad hoc metric described by its concept keys.
    pub fn derive_keys<S: AsRef<str>>(
        &self,
        doc: &FactsDocument,
        metric: &str,
        concept_keys: &[S],
    ) -> MetricSeries {
        let resolved = match self.resolver.resolve(doc, concept_keys) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::info!(metric, reason = %e, "metric not reported");
                return MetricSeries::empty(metric);
            }
        };
        tracing::info!(metric, concept = %resolved.key(), "resolved metric");

        let mut diagnostics = Diagnostics::default();
        let quarterly = self.build_quarters(resolved.concept, resolved.facts, &mut diagnostics);
        if quarterly.is_empty() {
            tracing::warn!(metric, concept = %resolved.key(), "no quarterly points derived");
        }

        let ttm = trailing_twelve_months(&quarterly, &self.config);
        let quarterly_growth = yoy_growth(&quarterly, &self.config);
        let ttm_growth = yoy_growth(&ttm.points, &self.config);

        diagnostics.ttm_gaps = ttm.skipped;
        diagnostics.quarterly_growth_gaps = quarterly_growth.skipped;
        diagnostics.ttm_growth_gaps = ttm_growth.skipped;

        tracing::debug!(
            metric,
            quarters = quarterly.len(),
            ttm = ttm.points.len(),
            imputed = diagnostics.imputed_quarters,
            skipped = diagnostics.total_skipped(),
            "derived metric series"
        );

        MetricSeries {
            metric: metric.to_string(),
            concept: Some(resolved.key()),
            quarterly,
            ttm: ttm.points,
            quarterly_growth: quarterly_growth.points,
            ttm_growth: ttm_growth.points,
            diagnostics,
        }
    }

    fn build_quarters(
        &self,
        concept: &str,
        facts: &[RawFact],
        diagnostics: &mut Diagnostics,
    ) -> Vec<QuarterlyPoint> {
        let classified = ClassifiedFacts::from_raw(concept, facts, &self.config);

        diagnostics.facts_seen = facts.len();
        for (_, reason) in &classified.skipped {
            diagnostics.record_skip(*reason);
        }
        diagnostics.quarterly_facts = classified.quarterly.len();
        diagnostics.nine_month_facts = classified.nine_month.len();
        diagnostics.annual_facts = classified.annual.len();

        let direct = reconcile_quarters(&classified.quarterly);
        diagnostics.duplicate_quarters = classified.quarterly.len() - direct.len();

        let imputed = impute_q4(
            &classified.annual,
            &classified.nine_month,
            &direct,
            &self.config,
        );
        diagnostics.imputed_quarters = imputed.len();

        let candidates = direct.len() + imputed.len();
        let merged = merge_series(direct, imputed, self.config.max_quarters);
        diagnostics.truncated_quarters = candidates.saturating_sub(merged.len());

        merged
    }
}
