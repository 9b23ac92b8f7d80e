//! Risk classification — maps a correlation value to one of three risk buckets.
//!
//! A strongly negative correlation with inflation means the metric moves
//! against price levels, which is treated as the riskiest case:
//! - `value < low`            → High
//! - `low <= value <= high`   → Moderate (both boundaries inclusive)
//! - `value > high`           → Low

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Risk bucket for a single correlation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Moderate, RiskLevel::Low];

    /// Display label, e.g. "High Risk".
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::Low => "Low Risk",
        }
    }

    /// Parse a free-form label. Accepts "High Risk", "high", "MODERATE", etc.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        let stem = normalized
            .strip_suffix(" risk")
            .unwrap_or(normalized.as_str());
        match stem {
            "high" => Some(RiskLevel::High),
            "moderate" => Some(RiskLevel::Moderate),
            "low" => Some(RiskLevel::Low),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display color for a risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Red,
    Orange,
    Green,
    Gray,
}

impl RiskColor {
    pub fn name(self) -> &'static str {
        match self {
            RiskColor::Red => "red",
            RiskColor::Orange => "orange",
            RiskColor::Green => "green",
            RiskColor::Gray => "gray",
        }
    }
}

impl fmt::Display for RiskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ThresholdError {
    #[error("risk thresholds must be finite (got low={low}, high={high})")]
    NotFinite { low: f64, high: f64 },

    #[error("low threshold {low} is greater than high threshold {high}")]
    Inverted { low: f64, high: f64 },
}

/// The `(low, high)` pair used to bucket correlation values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub low: f64,
    pub high: f64,
}

impl RiskThresholds {
    pub fn new(low: f64, high: f64) -> Result<Self, ThresholdError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ThresholdError::NotFinite { low, high });
        }
        if low > high {
            return Err(ThresholdError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: -0.5,
            high: 0.5,
        }
    }
}

/// Classify a correlation value.
///
/// NaN fails both comparisons and lands in `Low`.
pub fn categorize_risk(value: f64, thresholds: RiskThresholds) -> RiskLevel {
    if value < thresholds.low {
        RiskLevel::High
    } else if thresholds.low <= value && value <= thresholds.high {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Color lookup for a risk level.
pub fn get_risk_color(level: RiskLevel) -> RiskColor {
    match level {
        RiskLevel::High => RiskColor::Red,
        RiskLevel::Moderate => RiskColor::Orange,
        RiskLevel::Low => RiskColor::Green,
    }
}

/// Color lookup for a textual risk label; unknown labels map to gray.
pub fn risk_color_for_label(label: &str) -> RiskColor {
    RiskLevel::from_label(label)
        .map(get_risk_color)
        .unwrap_or(RiskColor::Gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_with_default_thresholds() {
        let t = RiskThresholds::default();
        assert_eq!(categorize_risk(-0.9, t), RiskLevel::High);
        assert_eq!(categorize_risk(-0.5000001, t), RiskLevel::High);
        assert_eq!(categorize_risk(0.0, t), RiskLevel::Moderate);
        assert_eq!(categorize_risk(0.5000001, t), RiskLevel::Low);
        assert_eq!(categorize_risk(0.99, t), RiskLevel::Low);
    }

    #[test]
    fn boundaries_are_moderate() {
        let t = RiskThresholds::default();
        assert_eq!(categorize_risk(-0.5, t), RiskLevel::Moderate);
        assert_eq!(categorize_risk(0.5, t), RiskLevel::Moderate);
    }

    #[test]
    fn nan_falls_through_to_low() {
        assert_eq!(
            categorize_risk(f64::NAN, RiskThresholds::default()),
            RiskLevel::Low
        );
    }

    #[test]
    fn infinities() {
        let t = RiskThresholds::default();
        assert_eq!(categorize_risk(f64::NEG_INFINITY, t), RiskLevel::High);
        assert_eq!(categorize_risk(f64::INFINITY, t), RiskLevel::Low);
    }

    #[test]
    fn color_table() {
        assert_eq!(get_risk_color(RiskLevel::High), RiskColor::Red);
        assert_eq!(get_risk_color(RiskLevel::Moderate), RiskColor::Orange);
        assert_eq!(get_risk_color(RiskLevel::Low), RiskColor::Green);
    }

    #[test]
    fn label_colors_default_to_gray() {
        assert_eq!(risk_color_for_label("High Risk"), RiskColor::Red);
        assert_eq!(risk_color_for_label("moderate"), RiskColor::Orange);
        assert_eq!(risk_color_for_label(" LOW RISK "), RiskColor::Green);
        assert_eq!(risk_color_for_label("Extreme Risk"), RiskColor::Gray);
        assert_eq!(risk_color_for_label(""), RiskColor::Gray);
    }

    #[test]
    fn label_roundtrip() {
        for level in RiskLevel::ALL {
            assert_eq!(RiskLevel::from_label(level.label()), Some(level));
        }
    }

    #[test]
    fn threshold_validation() {
        assert!(RiskThresholds::new(-0.3, 0.3).is_ok());
        assert!(RiskThresholds::new(0.2, 0.2).is_ok());
        assert_eq!(
            RiskThresholds::new(0.5, -0.5),
            Err(ThresholdError::Inverted {
                low: 0.5,
                high: -0.5
            })
        );
        assert!(matches!(
            RiskThresholds::new(f64::NAN, 0.5),
            Err(ThresholdError::NotFinite { .. })
        ));
    }

    #[test]
    fn custom_thresholds() {
        let t = RiskThresholds::new(-0.2, 0.8).unwrap();
        assert_eq!(categorize_risk(-0.3, t), RiskLevel::High);
        assert_eq!(categorize_risk(0.6, t), RiskLevel::Moderate);
        assert_eq!(categorize_risk(0.81, t), RiskLevel::Low);
    }
}
