//! TOML configuration: data file locations and risk thresholds.
//!
//! ```toml
//! [data]
//! price_index = "India Inflation CPI Price Index.xlsx"
//! income_statement = "India Inflation CPI IncomeStatement.xlsx"
//!
//! [risk]
//! low = -0.5
//! high = 0.5
//! ```
//!
//! Every key is optional. Relative data paths resolve against the directory
//! containing the config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::risk::{RiskThresholds, ThresholdError};

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "inflalens.toml";

pub const DEFAULT_PRICE_INDEX_FILE: &str = "India Inflation CPI Price Index.xlsx";
pub const DEFAULT_INCOME_STATEMENT_FILE: &str = "India Inflation CPI IncomeStatement.xlsx";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid risk thresholds: {0}")]
    Thresholds(#[from] ThresholdError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Locations of the two source tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub price_index: PathBuf,
    pub income_statement: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            price_index: PathBuf::from(DEFAULT_PRICE_INDEX_FILE),
            income_statement: PathBuf::from(DEFAULT_INCOME_STATEMENT_FILE),
        }
    }
}

/// Raw threshold values as written in the file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub low: f64,
    pub high: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        let t = RiskThresholds::default();
        Self {
            low: t.low,
            high: t.high,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub risk: RiskConfig,
}

impl AppConfig {
    /// Parse from a TOML string without resolving paths.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.thresholds()?;
        Ok(config)
    }

    /// Load from a file and resolve relative data paths against its directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content, path)?;
        if let Some(base) = path.parent() {
            config.data.price_index = resolve(base, &config.data.price_index);
            config.data.income_statement = resolve(base, &config.data.income_statement);
        }
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, else `inflalens.toml` if present, else defaults.
    ///
    /// An explicitly requested file must exist.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn thresholds(&self) -> Result<RiskThresholds, ThresholdError> {
        RiskThresholds::new(self.risk.low, self.risk.high)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("", Path::new("x.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.thresholds().unwrap(), RiskThresholds::default());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let config = AppConfig::from_toml_str(
            "[risk]\nlow = -0.3\n",
            Path::new("x.toml"),
        )
        .unwrap();
        assert_eq!(config.risk.low, -0.3);
        assert_eq!(config.risk.high, 0.5);
        assert_eq!(
            config.data.price_index,
            PathBuf::from(DEFAULT_PRICE_INDEX_FILE)
        );
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let err = AppConfig::from_toml_str("[risk]\nlow = 0.9\nhigh = 0.1\n", Path::new("x.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Thresholds(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[risk\nlow = ", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inflalens.toml");
        std::fs::write(
            &path,
            "[data]\nprice_index = \"prices.csv\"\nincome_statement = \"/abs/income.csv\"\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.data.price_index, dir.path().join("prices.csv"));
        assert_eq!(
            config.data.income_statement,
            PathBuf::from("/abs/income.csv")
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = AppConfig::discover(Some(Path::new("/nonexistent/inflalens.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn toml_roundtrip() {
        let config = AppConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = AppConfig::from_toml_str(&text, Path::new("x.toml")).unwrap();
        assert_eq!(parsed, config);
    }
}
