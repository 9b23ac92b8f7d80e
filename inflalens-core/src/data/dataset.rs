//! The loaded dataset: both correlation tables plus the derived trend table.

use tracing::info;

use super::ingest::{load_table, DataError};
use super::table::{MetricTable, TrendTable};
use crate::config::DataConfig;

pub const PRICE_INDEX_TABLE: &str = "price_index";
pub const INCOME_STATEMENT_TABLE: &str = "income_statement";

/// Immutable tables shared by every aggregation run.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub price_index: MetricTable,
    pub income_statement: MetricTable,
    /// Trend rows, derived from the price-index table.
    pub trends: TrendTable,
    /// BLAKE3 hash over both tables' rows.
    pub fingerprint: String,
}

impl Dataset {
    pub fn new(price_index: MetricTable, income_statement: MetricTable) -> Self {
        let trends = TrendTable::from_metric_table(&price_index);
        let fingerprint = compute_fingerprint(&[&price_index, &income_statement]);
        Self {
            price_index,
            income_statement,
            trends,
            fingerprint,
        }
    }

    /// Load both files. Any failure here is fatal for the caller.
    pub fn load(config: &DataConfig) -> Result<Self, DataError> {
        let price_index = load_table(PRICE_INDEX_TABLE, &config.price_index)?;
        let income_statement = load_table(INCOME_STATEMENT_TABLE, &config.income_statement)?;
        let dataset = Self::new(price_index, income_statement);
        info!(
            symbols = dataset.symbols().len(),
            trend_rows = dataset.trends.len(),
            fingerprint = %dataset.short_fingerprint(),
            "dataset ready"
        );
        Ok(dataset)
    }

    /// Symbols offered for selection: distinct price-index symbols.
    pub fn symbols(&self) -> Vec<&str> {
        self.price_index.symbols()
    }

    pub fn short_fingerprint(&self) -> &str {
        &self.fingerprint[..self.fingerprint.len().min(12)]
    }
}

/// Deterministic hash over table names and row contents, in row order.
fn compute_fingerprint(tables: &[&MetricTable]) -> String {
    let mut hasher = blake3::Hasher::new();
    for table in tables {
        hasher.update(table.name().as_bytes());
        for row in table.rows() {
            hasher.update(row.symbol.as_bytes());
            hasher.update(&[0]);
            if let Some(p) = &row.parameter {
                hasher.update(p.as_bytes());
            }
            hasher.update(&[0]);
            hasher.update(&row.correlation.unwrap_or(f64::NAN).to_le_bytes());
            if let Some(d) = row.date {
                hasher.update(d.to_string().as_bytes());
            }
            hasher.update(&row.value.unwrap_or(f64::NAN).to_le_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::MetricRow;

    fn tables(corr: f64) -> (MetricTable, MetricTable) {
        (
            MetricTable::new(
                PRICE_INDEX_TABLE,
                vec![],
                vec![MetricRow::correlation("TCS", "CPI", corr)],
            ),
            MetricTable::new(INCOME_STATEMENT_TABLE, vec![], vec![]),
        )
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let (p1, i1) = tables(0.4);
        let (p2, i2) = tables(0.4);
        assert_eq!(
            Dataset::new(p1, i1).fingerprint,
            Dataset::new(p2, i2).fingerprint
        );
    }

    #[test]
    fn fingerprint_changes_with_data() {
        let (p1, i1) = tables(0.4);
        let (p2, i2) = tables(0.41);
        assert_ne!(
            Dataset::new(p1, i1).fingerprint,
            Dataset::new(p2, i2).fingerprint
        );
    }

    #[test]
    fn short_fingerprint_is_prefix() {
        let (p, i) = tables(0.0);
        let ds = Dataset::new(p, i);
        assert_eq!(ds.short_fingerprint().len(), 12);
        assert!(ds.fingerprint.starts_with(ds.short_fingerprint()));
    }

    #[test]
    fn missing_file_fails_load() {
        let config = DataConfig {
            price_index: "/nonexistent/p.csv".into(),
            income_statement: "/nonexistent/i.csv".into(),
        };
        assert!(matches!(
            Dataset::load(&config),
            Err(DataError::NotFound { .. })
        ));
    }
}
