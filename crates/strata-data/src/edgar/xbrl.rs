//! XBRL companyfacts documents from SEC EDGAR.
//!
//! The SEC publishes every XBRL fact a company has filed as a single JSON
//! document at `https://data.sec.gov/api/xbrl/companyfacts/CIK{cik_padded}.json`.
//! Its shape is `facts -> taxonomy -> concept -> units -> unit -> [fact]`.
//!
//! Facts arrive as [`RawFact`]s, exactly as the feed publishes them. Anything
//! the derivation pipeline consumes must first pass [`RawFact::validate`],
//! which either produces a [`FactRecord`] or names the [`SkipReason`].
//!
//! # Example
//!
//! ```
//! use strata_data::edgar::FactsDocument;
//!
//! let json = r#"{
//!     "cik": 320193,
//!     "entityName": "Apple Inc.",
//!     "facts": {"us-gaap": {"Revenues": {"label": "Revenues", "units": {"USD": [
//!         {"start": "2024-01-01", "end": "2024-03-31", "val": 1000, "form": "10-Q",
//!          "filed": "2024-05-01", "frame": "CY2024Q1"}
//!     ]}}}}
//! }"#;
//!
//! let doc = FactsDocument::parse_json(json).unwrap();
//! assert_eq!(doc.cik.as_deref(), Some("0000320193"));
//! let facts = doc.usd_facts("us-gaap", "Revenues").unwrap();
//! assert!(facts[0].validate("Revenues").is_ok());
//! ```

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Unit key for US dollar denominated facts.
pub const USD: &str = "USD";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a raw fact was dropped before reaching the derivation pipeline.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SkipReason {
    /// No `val` field
    #[display("missing value")]
    MissingValue,
    /// `val` is exactly zero, which the feed uses for "not reported"
    #[display("zero value")]
    ZeroValue,
    /// `val` is NaN or infinite
    #[display("non-finite value")]
    NonFiniteValue,
    /// No `start` field (instant facts land here)
    #[display("missing period start")]
    MissingStart,
    /// No `end` field
    #[display("missing period end")]
    MissingEnd,
    /// A date field is not `YYYY-MM-DD`
    #[display("unparseable date")]
    InvalidDate,
    /// `end <= start`
    #[display("period end not after period start")]
    InvertedPeriod,
    /// Duration matches none of the quarterly, nine-month or annual bands
    #[display("duration of {days} days outside every band")]
    OutOfBand {
        /// Period length in days
        days: i64,
    },
}

impl SkipReason {
    /// Stable snake_case label, used as a counter key in diagnostics.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MissingValue => "missing_value",
            Self::ZeroValue => "zero_value",
            Self::NonFiniteValue => "non_finite_value",
            Self::MissingStart => "missing_start",
            Self::MissingEnd => "missing_end",
            Self::InvalidDate => "invalid_date",
            Self::InvertedPeriod => "inverted_period",
            Self::OutOfBand { .. } => "out_of_band",
        }
    }
}

/// A single fact exactly as the companyfacts feed publishes it.
///
/// Every field is optional because the feed is not consistent about any of
/// them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFact {
    /// Start date of the reporting period (absent for instant facts)
    #[serde(default)]
    pub start: Option<String>,
    /// End date of the reporting period
    #[serde(default)]
    pub end: Option<String>,
    /// Reported value
    #[serde(default)]
    pub val: Option<f64>,
    /// Accession number of the filing
    #[serde(default)]
    pub accn: Option<String>,
    /// Fiscal year of the filing
    #[serde(default)]
    pub fy: Option<i32>,
    /// Fiscal period of the filing (e.g. "Q3", "FY")
    #[serde(default)]
    pub fp: Option<String>,
    /// Form type (e.g. "10-Q", "10-K/A")
    #[serde(default)]
    pub form: Option<String>,
    /// Date the filing was submitted
    #[serde(default)]
    pub filed: Option<String>,
    /// Normalized calendar frame (e.g. "CY2024Q3")
    #[serde(default)]
    pub frame: Option<String>,
}

impl RawFact {
    /// Validates this fact and converts it into a [`FactRecord`].
    ///
    /// A zero value is treated as unreported, not as a legitimate amount.
    /// An unparseable `filed` date is tolerated and becomes `None`.
    pub fn validate(&self, concept: &str) -> std::result::Result<FactRecord, SkipReason> {
        let (period_start, period_end, value) = self.checked_parts()?;

        Ok(FactRecord {
            concept: concept.to_string(),
            period_start,
            period_end,
            value,
            form: self.form.clone(),
            filed_date: self.filed.as_deref().and_then(|d| parse_date(d).ok()),
            frame: self.frame.clone(),
            accession: self.accn.clone(),
            fiscal_period: self.fp.clone(),
        })
    }

    /// Returns true if [`validate`](Self::validate) would succeed.
    pub fn is_usable(&self) -> bool {
        self.checked_parts().is_ok()
    }

    fn checked_parts(&self) -> std::result::Result<(NaiveDate, NaiveDate, f64), SkipReason> {
        let value = self.val.ok_or(SkipReason::MissingValue)?;
        if !value.is_finite() {
            return Err(SkipReason::NonFiniteValue);
        }
        if value == 0.0 {
            return Err(SkipReason::ZeroValue);
        }

        let start = parse_date(self.start.as_deref().ok_or(SkipReason::MissingStart)?)?;
        let end = parse_date(self.end.as_deref().ok_or(SkipReason::MissingEnd)?)?;
        if end <= start {
            return Err(SkipReason::InvertedPeriod);
        }

        Ok((start, end, value))
    }
}

fn parse_date(raw: &str) -> std::result::Result<NaiveDate, SkipReason> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| SkipReason::InvalidDate)
}

/// A validated duration fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
    /// Concept the value was reported under (e.g. "Revenues")
    pub concept: String,
    /// First day covered by the value
    pub period_start: NaiveDate,
    /// Last day covered by the value
    pub period_end: NaiveDate,
    /// Amount in US dollars, never zero
    pub value: f64,
    /// Form type (e.g. "10-Q", "10-Q/A")
    pub form: Option<String>,
    /// Filing date, used as a recency tie-break
    pub filed_date: Option<NaiveDate>,
    /// Normalized calendar frame (e.g. "CY2024Q3")
    pub frame: Option<String>,
    /// Accession number of the filing
    pub accession: Option<String>,
    /// Fiscal period of the filing
    pub fiscal_period: Option<String>,
}

impl FactRecord {
    /// Days between period start and period end.
    pub fn duration_days(&self) -> i64 {
        self.period_end
            .signed_duration_since(self.period_start)
            .num_days()
    }

    /// Returns true if the fact comes from an amended filing (`/A` forms).
    pub fn is_amendment(&self) -> bool {
        self.form.as_deref().is_some_and(|f| f.contains("/A"))
    }

    /// Returns true if the frame confirms single-quarter granularity.
    pub fn has_quarter_frame(&self) -> bool {
        self.frame.as_deref().is_some_and(is_quarter_frame)
    }

    /// Short description of the filing the fact came from, for log output.
    ///
    /// Formatted as `form accession fiscal_period`, with `-` for missing parts.
    pub fn source(&self) -> String {
        format!(
            "{} {} {}",
            self.form.as_deref().unwrap_or("-"),
            self.accession.as_deref().unwrap_or("-"),
            self.fiscal_period.as_deref().unwrap_or("-")
        )
    }
}

/// Returns true for duration quarter frames of the form `CY2024Q3`.
///
/// Instant frames (`CY2024Q3I`) and annual frames (`CY2024`) do not match.
pub fn is_quarter_frame(frame: &str) -> bool {
    let Some(rest) = frame.strip_prefix("CY") else {
        return false;
    };
    let bytes = rest.as_bytes();
    bytes.len() == 6
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'Q'
        && (b'1'..=b'4').contains(&bytes[5])
}

/// All facts for one concept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptFacts {
    /// Human readable label
    #[serde(default)]
    pub label: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Facts keyed by unit of measure ("USD", "shares", ...)
    #[serde(default)]
    pub units: BTreeMap<String, Vec<RawFact>>,
}

/// A company's full companyfacts document.
///
/// Maps are ordered so that every traversal, and therefore every derived
/// series, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactsDocument {
    /// CIK zero-padded to 10 digits
    #[serde(default, deserialize_with = "de_cik")]
    pub cik: Option<String>,

    /// Company name
    #[serde(default)]
    pub entity_name: Option<String>,

    /// Facts keyed by taxonomy ("us-gaap", "dei", ...) then concept
    #[serde(default)]
    pub facts: BTreeMap<String, BTreeMap<String, ConceptFacts>>,
}

impl FactsDocument {
    /// Creates a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from SEC companyfacts JSON.
    ///
    /// The format is documented at: https://www.sec.gov/edgar/sec-api-documentation
    pub fn parse_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DataError::Parse(format!("Failed to parse companyfacts JSON: {}", e)))
    }

    /// Reads and parses a companyfacts JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::parse_json(&json)
    }

    /// Adds USD facts for a concept, replacing any existing USD facts.
    pub fn with_usd_facts(
        mut self,
        taxonomy: &str,
        concept: &str,
        facts: impl IntoIterator<Item = RawFact>,
    ) -> Self {
        self.facts
            .entry(taxonomy.to_string())
            .or_default()
            .entry(concept.to_string())
            .or_default()
            .units
            .insert(USD.to_string(), facts.into_iter().collect());
        self
    }

    /// Gets the USD fact array for a concept
    pub fn usd_facts(&self, taxonomy: &str, concept: &str) -> Option<&[RawFact]> {
        self.facts
            .get(taxonomy)?
            .get(concept)?
            .units
            .get(USD)
            .map(Vec::as_slice)
    }

    /// Gets all taxonomies present in the document
    pub fn taxonomies(&self) -> impl Iterator<Item = &str> {
        self.facts.keys().map(String::as_str)
    }

    /// Lists `(taxonomy, concept, fact count)` for every concept with USD facts.
    pub fn usd_concepts(&self) -> Vec<(&str, &str, usize)> {
        self.facts
            .iter()
            .flat_map(|(taxonomy, concepts)| {
                concepts.iter().filter_map(move |(concept, data)| {
                    data.units
                        .get(USD)
                        .filter(|facts| !facts.is_empty())
                        .map(|facts| (taxonomy.as_str(), concept.as_str(), facts.len()))
                })
            })
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CikRepr {
    Number(u64),
    Text(String),
}

fn de_cik<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<CikRepr> = Option::deserialize(deserializer)?;
    Ok(raw.map(|cik| match cik {
        CikRepr::Number(n) => format!("{:0>10}", n),
        CikRepr::Text(s) => format!("{:0>10}", s.trim()),
    }))
}

/// Common US-GAAP concepts for flow (income and cash flow) statements
pub mod concepts {
    /// Income Statement concepts
    pub mod income_statement {
        /// Total Revenue
        pub const REVENUES: &str = "us-gaap:Revenues";

        /// Alternative: Revenue from Contract with Customer
        pub const REVENUE_FROM_CONTRACT: &str =
            "us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax";

        /// Alternative: Revenue from Contract with Customer, including assessed tax
        pub const REVENUE_FROM_CONTRACT_INCL_TAX: &str =
            "us-gaap:RevenueFromContractWithCustomerIncludingAssessedTax";

        /// Legacy: Net Sales
        pub const SALES_REVENUE_NET: &str = "us-gaap:SalesRevenueNet";

        /// Net Income (Loss)
        pub const NET_INCOME: &str = "us-gaap:NetIncomeLoss";

        /// Alternative: Profit (Loss), including noncontrolling interest
        pub const PROFIT_LOSS: &str = "us-gaap:ProfitLoss";

        /// Alternative: Net Income available to common stockholders
        pub const NET_INCOME_TO_COMMON: &str =
            "us-gaap:NetIncomeLossAvailableToCommonStockholdersBasic";

        /// Cost of Revenue
        pub const COST_OF_REVENUE: &str = "us-gaap:CostOfRevenue";

        /// Alternative: Cost of Goods and Services Sold
        pub const COST_OF_GOODS_AND_SERVICES: &str = "us-gaap:CostOfGoodsAndServicesSold";

        /// Operating Income (Loss)
        pub const OPERATING_INCOME: &str = "us-gaap:OperatingIncomeLoss";

        /// Gross Profit
        pub const GROSS_PROFIT: &str = "us-gaap:GrossProfit";

        /// Research and Development Expense
        pub const RESEARCH_AND_DEVELOPMENT: &str = "us-gaap:ResearchAndDevelopmentExpense";
    }

    /// Cash Flow Statement concepts
    pub mod cash_flow {
        /// Operating Cash Flows
        pub const OPERATING_CASH_FLOW: &str = "us-gaap:NetCashProvidedByUsedInOperatingActivities";

        /// Alternative: Operating Cash Flows from continuing operations
        pub const OPERATING_CASH_FLOW_CONTINUING: &str =
            "us-gaap:NetCashProvidedByUsedInOperatingActivitiesContinuingOperations";

        /// Capital Expenditures
        pub const CAPITAL_EXPENDITURES: &str = "us-gaap:PaymentsToAcquirePropertyPlantAndEquipment";

        /// Alternative: Capital Expenditures
        pub const CAPITAL_EXPENDITURES_ALT: &str = "us-gaap:PaymentsForCapitalImprovements";
    }
}
