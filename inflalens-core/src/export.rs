//! Report export — CSV of classified records and a JSON bundle of chart specs.
//!
//! A report directory `report_{timestamp}/` contains:
//! - `correlations.csv` — one row per record
//! - `report.json` — selection, thresholds, records, pie and trend specs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::aggregate::CorrelationAggregator;
use crate::charts::{plot_inflation_trends, plot_risk_pie_chart, PieChart, TrendChart};
use crate::data::Dataset;
use crate::domain::{Category, CorrelationRecord};
use crate::risk::RiskThresholds;

/// Bumped whenever the report layout changes incompatibly.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv output is not valid UTF-8")]
    Utf8,

    #[error("unsupported report schema version {found} (max supported: {max})")]
    UnsupportedVersion { found: u32, max: u32 },
}

/// Everything shown on the dashboard for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: u32,
    pub generated_at: chrono::NaiveDateTime,
    pub dataset_fingerprint: String,
    pub symbols: Vec<String>,
    pub thresholds: RiskThresholds,
    pub records: Vec<CorrelationRecord>,
    pub pies: Vec<PieChart>,
    pub trends: Vec<TrendChart>,
}

impl Report {
    /// Run the full pipeline for `symbols`.
    pub fn build(dataset: &Dataset, thresholds: RiskThresholds, symbols: &[String]) -> Self {
        let records = CorrelationAggregator::from_dataset(dataset, thresholds)
            .calculate_inflation_correlation(symbols);
        let pies = Category::ALL
            .iter()
            .map(|c| plot_risk_pie_chart(&records, *c))
            .collect();
        let trends = symbols
            .iter()
            .map(|s| plot_inflation_trends(&dataset.trends, s))
            .collect();
        Self {
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: chrono::Local::now().naive_local(),
            dataset_fingerprint: dataset.fingerprint.clone(),
            symbols: symbols.to_vec(),
            thresholds,
            records,
            pies,
            trends,
        }
    }
}

/// Serialize records as CSV.
///
/// Columns: symbol, category, parameter, value, risk_level, color
pub fn records_to_csv(records: &[CorrelationRecord]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["symbol", "category", "parameter", "value", "risk_level", "color"])?;
    for r in records {
        let value = format!("{:.6}", r.value);
        wtr.write_record([
            r.symbol.as_str(),
            r.category.label(),
            r.parameter.as_str(),
            value.as_str(),
            r.risk_level.label(),
            r.color.name(),
        ])?;
    }
    let data = wtr.into_inner().map_err(|e| ExportError::Csv(e.into_error().into()))?;
    String::from_utf8(data).map_err(|_| ExportError::Utf8)
}

pub fn report_to_json(report: &Report) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Parse a report, rejecting newer schema versions.
pub fn report_from_json(json: &str) -> Result<Report, ExportError> {
    let report: Report = serde_json::from_str(json)?;
    if report.schema_version > REPORT_SCHEMA_VERSION {
        return Err(ExportError::UnsupportedVersion {
            found: report.schema_version,
            max: REPORT_SCHEMA_VERSION,
        });
    }
    Ok(report)
}

/// Write `correlations.csv` and `report.json` under a fresh directory in
/// `output_dir`. Returns the directory path.
pub fn write_report(report: &Report, output_dir: &Path) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let dir = create_report_dir(output_dir, &report.generated_at)?;

    write_file(&dir.join("correlations.csv"), &records_to_csv(&report.records)?)?;
    write_file(&dir.join("report.json"), &report_to_json(report)?)?;

    info!(dir = %dir.display(), records = report.records.len(), "report written");
    Ok(dir)
}

/// Create `report_{timestamp}`, or `report_{timestamp}_N` when an export in
/// the same second already took the name. Existing reports are never reused.
fn create_report_dir(
    output_dir: &Path,
    generated_at: &chrono::NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    let stem = format!("report_{}", generated_at.format("%Y%m%d_%H%M%S"));
    let mut suffix = 1u32;
    let mut dir = output_dir.join(&stem);
    loop {
        match std::fs::create_dir(&dir) {
            Ok(()) => return Ok(dir),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                suffix += 1;
                dir = output_dir.join(format!("{stem}_{suffix}"));
            }
            Err(source) => return Err(ExportError::Io { path: dir, source }),
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ExportError> {
    std::fs::write(path, content).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MetricRow, MetricTable};

    fn dataset() -> Dataset {
        Dataset::new(
            MetricTable::new(
                "price_index",
                vec![],
                vec![
                    MetricRow::correlation("TCS", "CPI", -0.7),
                    MetricRow::correlation("TCS", "WPI, All", 0.2),
                ],
            ),
            MetricTable::new(
                "income_statement",
                vec![],
                vec![MetricRow::correlation("TCS", "Revenue", 0.9)],
            ),
        )
    }

    #[test]
    fn csv_has_header_and_quotes_commas() {
        let report = Report::build(&dataset(), RiskThresholds::default(), &["TCS".to_string()]);
        let csv = records_to_csv(&report.records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "symbol,category,parameter,value,risk_level,color");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("TCS,Inflation Correlation,CPI,-0.700000,High Risk,red"));
        assert!(lines[2].contains("\"WPI, All\""));
    }

    #[test]
    fn report_has_two_pies_and_one_trend_per_symbol() {
        let report = Report::build(
            &dataset(),
            RiskThresholds::default(),
            &["TCS".to_string(), "ZZZ".to_string()],
        );
        assert_eq!(report.pies.len(), 2);
        assert_eq!(report.trends.len(), 2);
        // No dated rows in this dataset.
        assert!(report.trends.iter().all(|t| t.spec().is_none()));
    }

    #[test]
    fn json_roundtrip_and_version_guard() {
        let report = Report::build(&dataset(), RiskThresholds::default(), &["TCS".to_string()]);
        let json = report_to_json(&report).unwrap();
        assert_eq!(report_from_json(&json).unwrap(), report);

        let mut future = report.clone();
        future.schema_version = REPORT_SCHEMA_VERSION + 1;
        let json = report_to_json(&future).unwrap();
        assert!(matches!(
            report_from_json(&json),
            Err(ExportError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn write_report_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let report = Report::build(&dataset(), RiskThresholds::default(), &["TCS".to_string()]);
        let out = write_report(&report, dir.path()).unwrap();
        assert!(out.join("correlations.csv").exists());
        assert!(out.join("report.json").exists());
    }

    #[test]
    fn reports_in_the_same_second_get_separate_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let first = Report::build(&dataset(), RiskThresholds::default(), &["TCS".to_string()]);
        let mut second = Report::build(&dataset(), RiskThresholds::default(), &["ZZZ".to_string()]);
        second.generated_at = first.generated_at;

        let a = write_report(&first, dir.path()).unwrap();
        let b = write_report(&second, dir.path()).unwrap();
        assert_ne!(a, b);
        assert!(b.file_name().unwrap().to_string_lossy().ends_with("_2"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);

        let first_csv = std::fs::read_to_string(a.join("correlations.csv")).unwrap();
        assert!(first_csv.contains("TCS"));
    }
}
