//! Domain types shared by the aggregator, chart renderers and front-ends.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::risk::{RiskColor, RiskLevel};

/// Placeholder used when a row has no `Parameter` cell.
pub const MISSING_PARAMETER: &str = "N/A";

/// Which source table a correlation record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Correlation against the CPI price-index table.
    PriceInflationCorrelation,
    /// Correlation against the income-statement table.
    IncomeInflationCorrelation,
}

impl Category {
    pub const ALL: [Category; 2] = [
        Category::PriceInflationCorrelation,
        Category::IncomeInflationCorrelation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::PriceInflationCorrelation => "Inflation Correlation",
            Category::IncomeInflationCorrelation => "Inflation Correlation (Income)",
        }
    }

    /// Short machine-friendly name used in exports.
    pub fn slug(self) -> &'static str {
        match self {
            Category::PriceInflationCorrelation => "price",
            Category::IncomeInflationCorrelation => "income",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One classified correlation, derived fresh on every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRecord {
    pub symbol: String,
    pub category: Category,
    pub parameter: String,
    pub value: f64,
    pub risk_level: RiskLevel,
    pub color: RiskColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_are_distinct() {
        assert_ne!(
            Category::PriceInflationCorrelation.label(),
            Category::IncomeInflationCorrelation.label()
        );
        assert_eq!(
            Category::IncomeInflationCorrelation.to_string(),
            "Inflation Correlation (Income)"
        );
    }

    #[test]
    fn record_serializes_color_lowercase() {
        let record = CorrelationRecord {
            symbol: "TCS".into(),
            category: Category::PriceInflationCorrelation,
            parameter: "CPI".into(),
            value: 0.1,
            risk_level: RiskLevel::Moderate,
            color: RiskColor::Orange,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"color\":\"orange\""));
        assert!(json.contains("\"risk_level\":\"Moderate\""));
    }
}
