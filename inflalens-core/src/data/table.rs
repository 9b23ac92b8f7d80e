//! In-memory correlation and trend tables.
//!
//! Tables are built once at startup and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ingest::{DataError, RawTable};
use super::schema::{parse_date, parse_number, parse_text, ColumnMap};

/// One row of a price-index or income-statement file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub symbol: String,
    pub parameter: Option<String>,
    pub correlation: Option<f64>,
    pub date: Option<NaiveDate>,
    pub value: Option<f64>,
}

impl MetricRow {
    /// Row with only the correlation fields set.
    pub fn correlation(symbol: &str, parameter: &str, correlation: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            parameter: Some(parameter.to_string()),
            correlation: Some(correlation),
            date: None,
            value: None,
        }
    }
}

/// An ordered, immutable table of [`MetricRow`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<MetricRow>,
}

impl MetricTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<MetricRow>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Build a table from raw cells. Fails only when `Symbol` is absent.
    pub fn from_raw(name: &str, raw: RawTable) -> Result<Self, DataError> {
        let map = ColumnMap::resolve(name, &raw.headers)?;
        let cell = |row: &[Option<String>], idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| row.get(i).cloned().flatten())
        };

        let rows = raw
            .rows
            .iter()
            .map(|row| {
                let symbol = parse_text(cell(row, Some(map.symbol)).as_deref()).unwrap_or_default();
                MetricRow {
                    symbol,
                    parameter: parse_text(cell(row, map.parameter).as_deref()),
                    correlation: parse_number(cell(row, map.correlation).as_deref()),
                    date: parse_date(cell(row, map.date).as_deref()),
                    value: parse_number(cell(row, map.value).as_deref()),
                }
            })
            .collect();

        Ok(Self::new(name, raw.headers, rows))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names as they appeared in the source file.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct non-empty symbols in first-seen order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .map(|r| r.symbol.as_str())
            .filter(|s| !s.is_empty() && seen.insert(*s))
            .collect()
    }

    /// Rows for `symbol`, in table order. A blank symbol matches nothing.
    pub fn rows_for<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a MetricRow> + 'a {
        let blank = symbol.trim().is_empty();
        self.rows
            .iter()
            .filter(move |r| !blank && r.symbol == symbol)
    }
}

/// A dated observation of one parameter for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    pub symbol: String,
    pub parameter: Option<String>,
    pub date: NaiveDate,
    pub value: f64,
}

/// Rows used for trend plotting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendTable {
    rows: Vec<TrendRow>,
}

impl TrendTable {
    pub fn new(rows: Vec<TrendRow>) -> Self {
        Self { rows }
    }

    /// Keep the rows of `table` that carry both a date and a value.
    pub fn from_metric_table(table: &MetricTable) -> Self {
        let rows = table
            .rows()
            .iter()
            .filter_map(|r| {
                Some(TrendRow {
                    symbol: r.symbol.clone(),
                    parameter: r.parameter.clone(),
                    date: r.date?,
                    value: r.value?,
                })
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[TrendRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows_for<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a TrendRow> + 'a {
        let blank = symbol.trim().is_empty();
        self.rows
            .iter()
            .filter(move |r| !blank && r.symbol == symbol)
    }
}
