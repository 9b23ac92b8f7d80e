//! Per-symbol summary tables of classified correlations.

use serde::Serialize;

use crate::domain::{Category, CorrelationRecord};
use crate::risk::RiskLevel;

/// Column headers for rendering a [`SummaryTable`].
pub const SUMMARY_HEADERS: [&str; 6] = [
    "Symbol",
    "Category",
    "Parameter",
    "Value",
    "Risk Level",
    "Color",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable<'a> {
    pub symbol: String,
    pub title: String,
    pub records: Vec<&'a CorrelationRecord>,
}

impl<'a> SummaryTable<'a> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        self.records.iter().filter(|r| r.risk_level == level).count()
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.records.iter().filter(|r| r.category == category).count()
    }

    /// Mean correlation, `None` when empty.
    pub fn mean_value(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let sum: f64 = self.records.iter().map(|r| r.value).sum();
        Some(sum / self.records.len() as f64)
    }

    /// Cells for each row, aligned with [`SUMMARY_HEADERS`].
    pub fn rows(&self) -> Vec<[String; 6]> {
        self.records
            .iter()
            .map(|r| {
                [
                    r.symbol.clone(),
                    r.category.label().to_string(),
                    r.parameter.clone(),
                    format!("{:.3}", r.value),
                    r.risk_level.label().to_string(),
                    r.color.name().to_string(),
                ]
            })
            .collect()
    }
}

/// Records belonging to `symbol`, in aggregation order.
pub fn summary_for_symbol<'a>(records: &'a [CorrelationRecord], symbol: &str) -> SummaryTable<'a> {
    SummaryTable {
        symbol: symbol.to_string(),
        title: format!("Inflation correlation for {symbol}:"),
        records: records.iter().filter(|r| r.symbol == symbol).collect(),
    }
}
