//! Correlation aggregation — joins both tables against the selected symbols.
//!
//! Output order: symbols in selection order; within a symbol, price-index
//! rows first, then income-statement rows, each in table order.

use tracing::debug;

use crate::data::{Dataset, MetricRow, MetricTable};
use crate::domain::{Category, CorrelationRecord, MISSING_PARAMETER};
use crate::risk::{categorize_risk, get_risk_color, RiskThresholds};

/// Borrowing view over the two correlation tables.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationAggregator<'a> {
    price_index: &'a MetricTable,
    income_statement: &'a MetricTable,
    thresholds: RiskThresholds,
}

impl<'a> CorrelationAggregator<'a> {
    pub fn new(
        price_index: &'a MetricTable,
        income_statement: &'a MetricTable,
        thresholds: RiskThresholds,
    ) -> Self {
        Self {
            price_index,
            income_statement,
            thresholds,
        }
    }

    pub fn from_dataset(dataset: &'a Dataset, thresholds: RiskThresholds) -> Self {
        Self::new(&dataset.price_index, &dataset.income_statement, thresholds)
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    /// Build one record per matching row, for each symbol in order.
    ///
    /// Symbols with no rows in a table contribute nothing for that table.
    pub fn calculate_inflation_correlation<S: AsRef<str>>(
        &self,
        symbols: &[S],
    ) -> Vec<CorrelationRecord> {
        let mut records = Vec::new();
        for symbol in symbols {
            let symbol = symbol.as_ref();
            self.collect(
                &mut records,
                self.price_index,
                symbol,
                Category::PriceInflationCorrelation,
            );
            self.collect(
                &mut records,
                self.income_statement,
                symbol,
                Category::IncomeInflationCorrelation,
            );
        }
        debug!(
            symbols = symbols.len(),
            records = records.len(),
            "aggregated correlations"
        );
        records
    }

    fn collect(
        &self,
        out: &mut Vec<CorrelationRecord>,
        table: &MetricTable,
        symbol: &str,
        category: Category,
    ) {
        for row in table.rows_for(symbol) {
            out.push(self.classify(row, symbol, category));
        }
    }

    fn classify(&self, row: &MetricRow, symbol: &str, category: Category) -> CorrelationRecord {
        let parameter = match &row.parameter {
            Some(p) => p.clone(),
            None => {
                debug!(symbol, table = category.slug(), "row without Parameter, using N/A");
                MISSING_PARAMETER.to_string()
            }
        };
        let value = match row.correlation {
            Some(v) => v,
            None => {
                debug!(symbol, table = category.slug(), "row without Correlation, using 0");
                0.0
            }
        };
        let risk_level = categorize_risk(value, self.thresholds);
        CorrelationRecord {
            symbol: symbol.to_string(),
            category,
            parameter,
            value,
            risk_level,
            color: get_risk_color(risk_level),
        }
    }
}

/// Aggregate against a loaded dataset.
pub fn calculate_inflation_correlation<S: AsRef<str>>(
    dataset: &Dataset,
    thresholds: RiskThresholds,
    symbols: &[S],
) -> Vec<CorrelationRecord> {
    CorrelationAggregator::from_dataset(dataset, thresholds).calculate_inflation_correlation(symbols)
}
