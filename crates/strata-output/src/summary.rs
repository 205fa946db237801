//! Per-period summary of a derived metric.
//!
//! Joins the quarterly, TTM and growth series on `period_end` so that each
//! row shows everything known about one quarter.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use strata_series::{Diagnostics, MetricSeries};

/// One period of a [`SeriesSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    /// Quarter end
    pub period_end: NaiveDate,
    /// Quarterly value
    pub quarterly: Option<f64>,
    /// Trailing-twelve-month sum
    pub ttm: Option<f64>,
    /// YoY growth of the quarter, in percent
    pub quarterly_growth: Option<f64>,
    /// YoY growth of the TTM sum, in percent
    pub ttm_growth: Option<f64>,
}

impl SummaryRow {
    const fn new(period_end: NaiveDate) -> Self {
        Self {
            period_end,
            quarterly: None,
            ttm: None,
            quarterly_growth: None,
            ttm_growth: None,
        }
    }
}

/// Tabular view of a [`MetricSeries`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    /// Metric name
    pub metric: String,
    /// Resolved concept, if any
    pub concept: Option<String>,
    /// Rows ascending by period end
    pub rows: Vec<SummaryRow>,
    /// Pipeline counters
    pub diagnostics: Diagnostics,
}

impl SeriesSummary {
    /// Build a summary from a derived series.
    pub fn from_series(series: &MetricSeries) -> Self {
        let mut rows: BTreeMap<NaiveDate, SummaryRow> = BTreeMap::new();

        for q in &series.quarterly {
            row_at(&mut rows, q.period_end).quarterly = Some(q.value);
        }
        for p in &series.ttm {
            row_at(&mut rows, p.period_end).ttm = Some(p.value);
        }
        for g in &series.quarterly_growth {
            row_at(&mut rows, g.period_end).quarterly_growth = Some(g.growth_percent);
        }
        for g in &series.ttm_growth {
            row_at(&mut rows, g.period_end).ttm_growth = Some(g.growth_percent);
        }

        Self {
            metric: series.metric.clone(),
            concept: series.concept.clone(),
            rows: rows.into_values().collect(),
            diagnostics: series.diagnostics.clone(),
        }
    }

    /// Format as an ASCII table.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nSeries Summary: {}\n", self.metric));
        output.push_str(&format!(
            "Concept: {}\n",
            self.concept.as_deref().unwrap_or("(not reported)")
        ));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("\nNo quarterly data.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:>18} {:>18} {:>12} {:>12}\n",
            "Period End", "Quarterly", "TTM", "Qtr YoY %", "TTM YoY %"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<12} {:>18} {:>18} {:>12} {:>12}\n",
                row.period_end.to_string(),
                fmt_value(row.quarterly),
                fmt_value(row.ttm),
                fmt_percent(row.quarterly_growth),
                fmt_percent(row.ttm_growth),
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "Facts: {}  Skipped: {}  Duplicates: {}  Imputed: {}\n",
            self.diagnostics.facts_seen,
            self.diagnostics.total_skipped(),
            self.diagnostics.duplicate_quarters,
            self.diagnostics.imputed_quarters,
        ));

        output
    }

    /// Format as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", self.metric));
        if let Some(concept) = &self.concept {
            output.push_str(&format!("Concept: `{}`\n\n", concept));
        }

        output.push_str("| Period End | Quarterly | TTM | Quarterly YoY % | TTM YoY % |\n");
        output.push_str("|------------|-----------|-----|-----------------|-----------|\n");

        for row in &self.rows {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                row.period_end,
                fmt_value(row.quarterly),
                fmt_value(row.ttm),
                fmt_percent(row.quarterly_growth),
                fmt_percent(row.ttm_growth),
            ));
        }

        output
    }
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

fn row_at(rows: &mut BTreeMap<NaiveDate, SummaryRow>, end: NaiveDate) -> &mut SummaryRow {
    rows.entry(end).or_insert_with(|| SummaryRow::new(end))
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.0}", v))
}

fn fmt_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_series::{GrowthPoint, QuarterlyPoint, TtmPoint};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_series() -> MetricSeries {
        let mut series = MetricSeries::empty("revenue");
        series.concept = Some("us-gaap:Revenues".to_string());
        series.quarterly = vec![
            QuarterlyPoint::direct(date(2023, 3, 31), 100.0),
            QuarterlyPoint::direct(date(2023, 6, 30), 120.0),
            QuarterlyPoint::direct(date(2023, 9, 30), 90.0),
            QuarterlyPoint::imputed(date(2023, 12, 31), 190.0),
        ];
        series.ttm = vec![TtmPoint {
            period_end: date(2023, 12, 31),
            value: 500.0,
        }];
        series.quarterly_growth = vec![GrowthPoint {
            period_end: date(2023, 12, 31),
            growth_percent: 5.25,
        }];
        series.diagnostics.imputed_quarters = 1;
        series
    }

    #[test]
    fn test_from_series_joins_on_period_end() {
        let summary = SeriesSummary::from_series(&sample_series());

        assert_eq!(summary.rows.len(), 4);

        let last = &summary.rows[3];
        assert_eq!(last.period_end, date(2023, 12, 31));
        assert_eq!(last.quarterly, Some(190.0));
        assert_eq!(last.ttm, Some(500.0));
        assert_eq!(last.quarterly_growth, Some(5.25));
        assert_eq!(last.ttm_growth, None);

        assert_eq!(summary.rows[0].ttm, None);
    }

    #[test]
    fn test_ascii_table() {
        let summary = SeriesSummary::from_series(&sample_series());
        let table = summary.to_ascii_table();

        assert!(table.contains("Series Summary: revenue"));
        assert!(table.contains("us-gaap:Revenues"));
        assert!(table.contains("2023-12-31"));
        assert!(table.contains("190"));
        assert!(!table.contains("190*"));
        assert!(table.contains("5.25"));
    }

    #[test]
    fn test_rows_do_not_carry_quarter_origin() {
        let summary = SeriesSummary::from_series(&sample_series());

        let rows = serde_json::to_value(&summary.rows).unwrap();
        let last = rows[3].as_object().unwrap();
        assert_eq!(last.len(), 5);
        let expected = [
            "periodEnd",
            "quarterly",
            "ttm",
            "quarterlyGrowth",
            "ttmGrowth",
        ];
        for field in expected {
            assert!(last.contains_key(field), "missing {field}");
        }

        let json = serde_json::to_string(&summary.rows).unwrap();
        assert!(!json.contains("imputed"));
        assert!(!json.contains("origin"));

        let table = summary.to_ascii_table();
        assert!(!table.contains("imputed as"));
        assert!(!summary.to_markdown().contains("(imputed)"));
    }

    #[test]
    fn test_ascii_table_empty_series() {
        let summary = SeriesSummary::from_series(&MetricSeries::empty("net_income"));
        let table = summary.to_ascii_table();

        assert!(table.contains("(not reported)"));
        assert!(table.contains("No quarterly data."));
    }

    #[test]
    fn test_markdown() {
        let markdown = SeriesSummary::from_series(&sample_series()).to_markdown();

        assert!(markdown.starts_with("# revenue"));
        assert!(markdown.contains("| Period End |"));
        assert!(markdown.contains("| 2023-12-31 | 190 | 500 | 5.25 | - |"));
    }
}
