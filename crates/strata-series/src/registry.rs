//! Metric Registry
//!
//! Central registry of the built-in metrics. A metric is nothing more than a
//! name and an ordered list of acceptable concept keys; the same engine
//! derives all of them.

use derive_more::Display;
use serde::Serialize;
use strata_data::concepts::{cash_flow, income_statement};

/// Available metric categories
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MetricCategory {
    /// Top and bottom line income items
    Income,
    /// Cost and expense items
    Expense,
    /// Cash flow statement items
    CashFlow,
}

/// Metric metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricInfo {
    /// Metric name (unique identifier)
    pub name: &'static str,
    /// Metric category
    pub category: MetricCategory,
    /// Brief description of the metric
    pub description: &'static str,
    /// Acceptable concept keys, primary first
    pub concept_keys: &'static [&'static str],
}

/// Get all available metric info
pub fn available_metrics() -> Vec<MetricInfo> {
    vec![
        // Income metrics
        MetricInfo {
            name: "revenue",
            category: MetricCategory::Income,
            description: "Total revenue (net sales)",
            concept_keys: &[
                income_statement::REVENUES,
                income_statement::REVENUE_FROM_CONTRACT,
                income_statement::REVENUE_FROM_CONTRACT_INCL_TAX,
                income_statement::SALES_REVENUE_NET,
            ],
        },
        MetricInfo {
            name: "net_income",
            category: MetricCategory::Income,
            description: "Net income (earnings)",
            concept_keys: &[
                income_statement::NET_INCOME,
                income_statement::PROFIT_LOSS,
                income_statement::NET_INCOME_TO_COMMON,
            ],
        },
        MetricInfo {
            name: "gross_profit",
            category: MetricCategory::Income,
            description: "Revenue less cost of revenue",
            concept_keys: &[income_statement::GROSS_PROFIT],
        },
        MetricInfo {
            name: "operating_income",
            category: MetricCategory::Income,
            description: "Operating income (loss)",
            concept_keys: &[income_statement::OPERATING_INCOME],
        },
        // Expense metrics
        MetricInfo {
            name: "cost_of_revenue",
            category: MetricCategory::Expense,
            description: "Cost of revenue (cost of goods and services sold)",
            concept_keys: &[
                income_statement::COST_OF_REVENUE,
                income_statement::COST_OF_GOODS_AND_SERVICES,
            ],
        },
        MetricInfo {
            name: "research_and_development",
            category: MetricCategory::Expense,
            description: "Research and development expense",
            concept_keys: &[income_statement::RESEARCH_AND_DEVELOPMENT],
        },
        // Cash flow metrics
        MetricInfo {
            name: "operating_cash_flow",
            category: MetricCategory::CashFlow,
            description: "Net cash provided by operating activities",
            concept_keys: &[
                cash_flow::OPERATING_CASH_FLOW,
                cash_flow::OPERATING_CASH_FLOW_CONTINUING,
            ],
        },
        MetricInfo {
            name: "capital_expenditures",
            category: MetricCategory::CashFlow,
            description: "Payments to acquire property, plant and equipment",
            concept_keys: &[
                cash_flow::CAPITAL_EXPENDITURES,
                cash_flow::CAPITAL_EXPENDITURES_ALT,
            ],
        },
    ]
}

/// Get metric info by name
pub fn get_metric_info(name: &str) -> Option<MetricInfo> {
    available_metrics().into_iter().find(|m| m.name == name)
}

/// Get all metrics in a specific category
pub fn metrics_by_category(category: MetricCategory) -> Vec<MetricInfo> {
    available_metrics()
        .into_iter()
        .filter(|m| m.category == category)
        .collect()
}
