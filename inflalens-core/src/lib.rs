//! InflaLens Core — inflation correlation risk analysis for equity symbols.
//!
//! This crate contains everything below the user interface:
//! - Table loading (Excel / CSV / Parquet) with a tolerant, per-row schema
//! - Three-bucket risk classification of correlation values
//! - Correlation aggregation across the price-index and income-statement tables
//! - Chart specifications for risk pies and trend lines
//! - Per-symbol summary tables, report export and TOML configuration

pub mod aggregate;
pub mod charts;
pub mod config;
pub mod data;
pub mod domain;
pub mod export;
pub mod risk;
pub mod summary;

pub use aggregate::{calculate_inflation_correlation, CorrelationAggregator};
pub use charts::{
    plot_inflation_trends, plot_risk_pie_chart, PieChart, PieChartSpec, PieSlice, TrendChart,
    TrendChartSpec, TrendSeries,
};
pub use config::{AppConfig, ConfigError, DataConfig};
pub use data::{DataError, Dataset, MetricRow, MetricTable, TrendRow, TrendTable};
pub use domain::{Category, CorrelationRecord};
pub use export::{ExportError, Report};
pub use risk::{categorize_risk, get_risk_color, RiskColor, RiskLevel, RiskThresholds};
pub use summary::{summary_for_symbol, SummaryTable};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the loaded dataset can be shared across threads
    /// without synchronization, and derived records can move between them.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Dataset>();
        require_sync::<Dataset>();
        require_send::<MetricTable>();
        require_sync::<MetricTable>();
        require_send::<TrendTable>();
        require_sync::<TrendTable>();
        require_send::<CorrelationRecord>();
        require_sync::<CorrelationRecord>();
        require_send::<PieChart>();
        require_send::<TrendChart>();
        require_send::<AppConfig>();
        require_sync::<AppConfig>();
    }

    #[test]
    fn aggregator_is_copy() {
        fn require_copy<T: Copy>() {}
        require_copy::<CorrelationAggregator<'static>>();
    }
}
