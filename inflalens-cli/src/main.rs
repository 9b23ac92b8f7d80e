//! InflaLens CLI — inspect, analyze and export inflation correlation risk.
//!
//! Commands:
//! - `symbols` — list the symbols of the price-index table
//! - `analyze` — print risk pies, trend summaries and per-symbol tables
//! - `export` — write `correlations.csv` and `report.json` for a selection
//! - `check` — load both tables and report columns, row counts, fingerprint
//! - `sample` — write a deterministic demo dataset and a matching config

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use inflalens_core::config::DEFAULT_CONFIG_FILE;
use inflalens_core::data::{generate_sample, write_csv, write_parquet, SampleOptions};
use inflalens_core::export::write_report;
use inflalens_core::summary::SUMMARY_HEADERS;
use inflalens_core::{
    summary_for_symbol, AppConfig, DataConfig, Dataset, MetricTable, PieChart, Report,
    RiskThresholds, TrendChart,
};

#[derive(Parser)]
#[command(
    name = "inflalens",
    about = "InflaLens CLI — inflation correlation risk for equity symbols"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./inflalens.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List distinct symbols of the price-index table.
    Symbols,
    /// Print risk distributions, trends and summary tables.
    Analyze {
        /// Symbols to analyze, in display order.
        #[arg(required = true)]
        symbols: Vec<String>,
    },
    /// Write correlations.csv and report.json for the given symbols.
    Export {
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Parent directory of the report directory.
        #[arg(long, default_value = "reports")]
        output_dir: PathBuf,
    },
    /// Load both tables and report their shape.
    Check,
    /// Write a synthetic dataset and a config pointing at it.
    Sample {
        #[arg(long, default_value = "sample")]
        output_dir: PathBuf,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Monthly observations per price-index parameter.
        #[arg(long, default_value_t = 12)]
        months: u32,

        #[arg(long, value_enum, default_value_t = SampleFormat::Csv)]
        format: SampleFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SampleFormat {
    Csv,
    Parquet,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Symbols => run_symbols(config_path),
        Commands::Analyze { symbols } => run_analyze(config_path, &symbols),
        Commands::Export {
            symbols,
            output_dir,
        } => run_export(config_path, &symbols, &output_dir),
        Commands::Check => run_check(config_path),
        Commands::Sample {
            output_dir,
            seed,
            months,
            format,
        } => run_sample(&output_dir, seed, months, format),
    }
}

fn load(config_path: Option<&Path>) -> Result<(Dataset, RiskThresholds)> {
    let config = AppConfig::discover(config_path).context("failed to load configuration")?;
    let thresholds = config.thresholds().context("invalid risk thresholds")?;
    let dataset = Dataset::load(&config.data).context("failed to load data")?;
    Ok((dataset, thresholds))
}

fn run_symbols(config_path: Option<&Path>) -> Result<()> {
    let (dataset, _) = load(config_path)?;
    for symbol in dataset.symbols() {
        println!("{symbol}");
    }
    Ok(())
}

fn run_analyze(config_path: Option<&Path>, symbols: &[String]) -> Result<()> {
    let (dataset, thresholds) = load(config_path)?;
    let report = Report::build(&dataset, thresholds, symbols);

    for pie in &report.pies {
        print_pie(pie);
        println!();
    }
    for trend in &report.trends {
        print_trend(trend);
        println!();
    }
    for symbol in symbols {
        print_summary(&report, symbol);
        println!();
    }
    Ok(())
}

fn print_pie(pie: &PieChart) {
    match pie {
        PieChart::Chart(spec) => {
            println!("{} ({} records)", spec.title, spec.total);
            for slice in &spec.slices {
                println!(
                    "  {:<14} {:>5}  {:>6}  {}",
                    slice.label,
                    slice.count,
                    slice.percentage_label(),
                    slice.color
                );
            }
        }
        PieChart::Empty { category, notice } => {
            println!("Risk Distribution: {category}");
            println!("  {notice}");
        }
    }
}

fn print_trend(trend: &TrendChart) {
    match trend {
        TrendChart::Chart(spec) => {
            println!("{}", spec.title);
            for series in &spec.series {
                let first = series.points.first();
                let last = series.points.last();
                let (lo, hi) = series.value_range().unwrap_or((f64::NAN, f64::NAN));
                match (first, last) {
                    (Some((d0, _)), Some((d1, _))) => println!(
                        "  {:<28} {:>3} points  {} .. {}  range {:.2} .. {:.2}",
                        series.parameter,
                        series.points.len(),
                        d0,
                        d1,
                        lo,
                        hi
                    ),
                    _ => println!("  {:<28} no points", series.parameter),
                }
            }
        }
        TrendChart::NoData { notice, .. } => println!("{notice}"),
    }
}

fn print_summary(report: &Report, symbol: &str) {
    let table = summary_for_symbol(&report.records, symbol);
    println!("{}", table.title);
    if table.is_empty() {
        println!("  (no records)");
        return;
    }
    println!(
        "{:<10} {:<32} {:<28} {:>8} {:<14} {:<6}",
        SUMMARY_HEADERS[0],
        SUMMARY_HEADERS[1],
        SUMMARY_HEADERS[2],
        SUMMARY_HEADERS[3],
        SUMMARY_HEADERS[4],
        SUMMARY_HEADERS[5]
    );
    println!("{}", "-".repeat(103));
    for [sym, category, parameter, value, level, color] in table.rows() {
        println!("{sym:<10} {category:<32} {parameter:<28} {value:>8} {level:<14} {color:<6}");
    }
}

fn run_export(config_path: Option<&Path>, symbols: &[String], output_dir: &Path) -> Result<()> {
    let (dataset, thresholds) = load(config_path)?;
    let report = Report::build(&dataset, thresholds, symbols);
    if report.records.is_empty() {
        eprintln!("warning: no records matched {}", symbols.join(", "));
    }
    let dir = write_report(&report, output_dir)?;
    println!(
        "Report with {} records saved to: {}",
        report.records.len(),
        dir.display()
    );
    Ok(())
}

fn run_check(config_path: Option<&Path>) -> Result<()> {
    let (dataset, thresholds) = load(config_path)?;
    print_table(&dataset.price_index);
    print_table(&dataset.income_statement);
    println!("Symbols: {}", dataset.symbols().len());
    println!("Trend points: {}", dataset.trends.len());
    println!("Thresholds: low {} high {}", thresholds.low, thresholds.high);
    println!("Fingerprint: {}", dataset.fingerprint);
    Ok(())
}

fn print_table(table: &MetricTable) {
    println!("{}: {} rows", table.name(), table.len());
    println!("  columns: {}", table.columns().join(", "));
}

fn run_sample(output_dir: &Path, seed: u64, months: u32, format: SampleFormat) -> Result<()> {
    if months == 0 {
        bail!("--months must be at least 1");
    }
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let opts = SampleOptions {
        seed,
        months,
        ..SampleOptions::default()
    };
    let (price, income) = generate_sample(&opts);

    let ext = match format {
        SampleFormat::Csv => "csv",
        SampleFormat::Parquet => "parquet",
    };
    let price_file = PathBuf::from(format!("price_index.{ext}"));
    let income_file = PathBuf::from(format!("income_statement.{ext}"));
    for (file, table) in [(&price_file, &price), (&income_file, &income)] {
        let path = output_dir.join(file);
        match format {
            SampleFormat::Csv => write_csv(&path, table)?,
            SampleFormat::Parquet => write_parquet(&path, table)?,
        }
        info!(path = %path.display(), rows = table.len(), "sample table written");
    }

    // Paths in the config are relative to the config file.
    let config = AppConfig {
        data: DataConfig {
            price_index: price_file,
            income_statement: income_file,
        },
        ..AppConfig::default()
    };
    let config_path = output_dir.join(DEFAULT_CONFIG_FILE);
    std::fs::write(&config_path, config.to_toml_string()?)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    println!(
        "Sample data for {} symbols written to: {}",
        opts.symbols.len(),
        output_dir.display()
    );
    println!("Try: inflalens --config {} analyze TCS", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["inflalens", "analyze", "TCS", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Commands::Analyze { ref symbols } if symbols == &["TCS"]));
    }

    #[test]
    fn analyze_requires_a_symbol() {
        assert!(Cli::try_parse_from(["inflalens", "analyze"]).is_err());
    }

    #[test]
    fn sample_writes_loadable_dataset() {
        let dir = tempfile::tempdir().unwrap();
        run_sample(dir.path(), 7, 3, SampleFormat::Csv).unwrap();

        let config_path = dir.path().join(DEFAULT_CONFIG_FILE);
        let (dataset, thresholds) = load(Some(&config_path)).unwrap();
        assert_eq!(thresholds, RiskThresholds::default());
        assert!(!dataset.symbols().is_empty());
        assert!(!dataset.trends.is_empty());
    }

    #[test]
    fn sample_rejects_zero_months() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run_sample(dir.path(), 1, 0, SampleFormat::Csv).is_err());
    }
}
