//! Table ingestion for CSV, Parquet and Excel workbook files.
//!
//! Every reader produces a [`RawTable`] of optional string cells so that the
//! same tolerant parsing applies regardless of the on-disk format.

use calamine::Reader as _;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::table::{MetricRow, MetricTable};

/// Errors from loading a source table. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported file format for {} (expected .csv, .parquet or .xlsx)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read parquet {}: {message}", path.display())]
    Parquet { path: PathBuf, message: String },

    #[error("failed to read workbook {}: {message}", path.display())]
    Spreadsheet { path: PathBuf, message: String },

    #[error("table '{table}' has no '{column}' column")]
    MissingColumn { table: String, column: String },
}

/// On-disk table format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
    Xlsx,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(TableFormat::Csv),
            "parquet" | "pq" => Some(TableFormat::Parquet),
            "xlsx" | "xlsm" | "xls" => Some(TableFormat::Xlsx),
            _ => None,
        }
    }
}

/// Header row plus optional string cells, row-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Load a correlation table from a CSV, Parquet or workbook file.
pub fn load_table(name: &str, path: &Path) -> Result<MetricTable, DataError> {
    if !path.exists() {
        return Err(DataError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = match TableFormat::from_path(path) {
        Some(TableFormat::Csv) => read_csv(path)?,
        Some(TableFormat::Parquet) => read_parquet(path)?,
        Some(TableFormat::Xlsx) => read_xlsx(path)?,
        None => {
            return Err(DataError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };
    let table = MetricTable::from_raw(name, raw)?;
    info!(
        table = name,
        path = %path.display(),
        rows = table.len(),
        columns = ?table.columns(),
        "loaded table"
    );
    Ok(table)
}

/// Read a CSV file with a header row. Ragged rows are allowed.
pub fn read_csv(path: &Path) -> Result<RawTable, DataError> {
    let csv_err = |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(
            (0..headers.len())
                .map(|i| record.get(i).map(String::from))
                .collect(),
        );
    }
    debug!(path = %path.display(), rows = rows.len(), "read csv");
    Ok(RawTable { headers, rows })
}

/// Read a Parquet file, casting every column to strings.
pub fn read_parquet(path: &Path) -> Result<RawTable, DataError> {
    let parquet_err = |e: PolarsError| DataError::Parquet {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let file = fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let df = ParquetReader::new(file).finish().map_err(parquet_err)?;

    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.as_str().to_string())
        .collect();

    let mut columns: Vec<Vec<Option<String>>> = Vec::with_capacity(headers.len());
    for name in &headers {
        let as_text = df
            .column(name.as_str())
            .map_err(parquet_err)?
            .cast(&DataType::String)
            .map_err(parquet_err)?;
        let values = as_text
            .as_materialized_series()
            .str()
            .map_err(parquet_err)?
            .into_iter()
            .map(|v| v.map(String::from))
            .collect();
        columns.push(values);
    }

    let rows = (0..df.height())
        .map(|i| columns.iter().map(|col| col[i].clone()).collect())
        .collect();
    debug!(path = %path.display(), rows = df.height(), "read parquet");
    Ok(RawTable { headers, rows })
}

/// Read the first sheet of a workbook. The first row holds the headers.
pub fn read_xlsx(path: &Path) -> Result<RawTable, DataError> {
    let sheet_err = |message: String| DataError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook =
        calamine::open_workbook_auto(path).map_err(|e| sheet_err(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| sheet_err("workbook has no sheets".to_string()))?
        .map_err(|e| sheet_err(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .map(|row| {
            row.iter()
                .map(|c| sheet_cell(c).unwrap_or_default().trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let rows: Vec<Vec<Option<String>>> = sheet_rows
        .map(|row| {
            (0..headers.len())
                .map(|i| row.get(i).and_then(sheet_cell))
                .collect()
        })
        .collect();
    debug!(path = %path.display(), rows = rows.len(), "read workbook");
    Ok(RawTable { headers, rows })
}

/// Render a workbook cell as text. Date cells become `YYYY-MM-DD`.
fn sheet_cell(cell: &calamine::Data) -> Option<String> {
    use calamine::Data;
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => dt.as_datetime().map(|d| d.date().to_string()),
    }
}

/// Write a table as CSV with the full five-column schema.
pub fn write_csv(path: &Path, table: &MetricTable) -> Result<(), DataError> {
    let csv_err = |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer
        .write_record(["Symbol", "Parameter", "Correlation", "Date", "Value"])
        .map_err(csv_err)?;
    for row in table.rows() {
        writer
            .write_record(metric_row_cells(row))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Write a table as Parquet with the full five-column schema.
pub fn write_parquet(path: &Path, table: &MetricTable) -> Result<(), DataError> {
    let parquet_err = |e: PolarsError| DataError::Parquet {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let rows = table.rows();
    let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
    let parameters: Vec<Option<&str>> = rows.iter().map(|r| r.parameter.as_deref()).collect();
    let correlations: Vec<Option<f64>> = rows.iter().map(|r| r.correlation).collect();
    let dates: Vec<Option<String>> = rows.iter().map(|r| r.date.map(|d| d.to_string())).collect();
    let values: Vec<Option<f64>> = rows.iter().map(|r| r.value).collect();

    let mut df = DataFrame::new(vec![
        Column::new("Symbol".into(), symbols),
        Column::new("Parameter".into(), parameters),
        Column::new("Correlation".into(), correlations),
        Column::new("Date".into(), dates),
        Column::new("Value".into(), values),
    ])
    .map_err(parquet_err)?;

    let file = fs::File::create(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ParquetWriter::new(file)
        .finish(&mut df)
        .map_err(parquet_err)?;
    Ok(())
}

fn metric_row_cells(row: &MetricRow) -> [String; 5] {
    [
        row.symbol.clone(),
        row.parameter.clone().unwrap_or_default(),
        row.correlation.map(|c| c.to_string()).unwrap_or_default(),
        row.date.map(|d| d.to_string()).unwrap_or_default(),
        row.value.map(|v| v.to_string()).unwrap_or_default(),
    ]
}
