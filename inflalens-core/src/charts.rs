//! Chart renderers — turn records and trend rows into chart specifications.
//!
//! The specs are plain data; front-ends (ratatui, text, JSON export) decide
//! how to draw them. Empty inputs produce explicit notices instead of specs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::TrendTable;
use crate::domain::{Category, CorrelationRecord, MISSING_PARAMETER};
use crate::risk::{get_risk_color, RiskColor, RiskLevel};

/// Pie slices start at 12 o'clock.
pub const PIE_START_ANGLE_DEG: f64 = 90.0;

/// One slice of a risk distribution pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub level: RiskLevel,
    pub label: String,
    pub count: usize,
    /// Share of the total in percent, 0..=100.
    pub percentage: f64,
    pub color: RiskColor,
}

impl PieSlice {
    /// Percentage formatted with one decimal, e.g. "33.3%".
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChartSpec {
    pub title: String,
    pub category: Category,
    pub total: usize,
    pub start_angle_deg: f64,
    /// Ordered by count descending; ties keep first-seen order.
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PieChart {
    Chart(PieChartSpec),
    Empty { category: Category, notice: String },
}

impl PieChart {
    pub fn spec(&self) -> Option<&PieChartSpec> {
        match self {
            PieChart::Chart(spec) => Some(spec),
            PieChart::Empty { .. } => None,
        }
    }
}

/// Risk distribution of the records in `category`.
pub fn plot_risk_pie_chart(records: &[CorrelationRecord], category: Category) -> PieChart {
    let mut counts: Vec<(RiskLevel, usize)> = Vec::new();
    for record in records.iter().filter(|r| r.category == category) {
        match counts.iter_mut().find(|(level, _)| *level == record.risk_level) {
            Some((_, n)) => *n += 1,
            None => counts.push((record.risk_level, 1)),
        }
    }

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return PieChart::Empty {
            category,
            notice: format!("No records for {}", category.label()),
        };
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let slices = counts
        .into_iter()
        .map(|(level, count)| PieSlice {
            level,
            label: level.label().to_string(),
            count,
            percentage: count as f64 * 100.0 / total as f64,
            color: get_risk_color(level),
        })
        .collect();

    PieChart::Chart(PieChartSpec {
        title: format!("Risk Distribution: {}", category.label()),
        category,
        total,
        start_angle_deg: PIE_START_ANGLE_DEG,
        slices,
    })
}

/// One line in a trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub parameter: String,
    /// `(date, value)` in source order.
    pub points: Vec<(NaiveDate, f64)>,
}

impl TrendSeries {
    pub fn value_range(&self) -> Option<(f64, f64)> {
        range(self.points.iter().map(|(_, v)| *v))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChartSpec {
    pub title: String,
    pub symbol: String,
    pub x_label: String,
    pub y_label: String,
    /// One series (and legend entry) per distinct parameter.
    pub series: Vec<TrendSeries>,
}

impl TrendChartSpec {
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.series.iter().flat_map(|s| s.points.iter().map(|(d, _)| *d));
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        range(
            self.series
                .iter()
                .flat_map(|s| s.points.iter().map(|(_, v)| *v)),
        )
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendChart {
    Chart(TrendChartSpec),
    NoData { symbol: String, notice: String },
}

impl TrendChart {
    pub fn spec(&self) -> Option<&TrendChartSpec> {
        match self {
            TrendChart::Chart(spec) => Some(spec),
            TrendChart::NoData { .. } => None,
        }
    }
}

/// Trend lines for `symbol`, one per parameter. Points are not re-sorted.
pub fn plot_inflation_trends(table: &TrendTable, symbol: &str) -> TrendChart {
    let mut series: Vec<TrendSeries> = Vec::new();
    for row in table.rows_for(symbol) {
        let parameter = row.parameter.as_deref().unwrap_or(MISSING_PARAMETER);
        let point = (row.date, row.value);
        match series.iter_mut().find(|s| s.parameter == parameter) {
            Some(s) => s.points.push(point),
            None => series.push(TrendSeries {
                parameter: parameter.to_string(),
                points: vec![point],
            }),
        }
    }

    if series.is_empty() {
        return TrendChart::NoData {
            symbol: symbol.to_string(),
            notice: format!("No data available for {symbol}"),
        };
    }

    TrendChart::Chart(TrendChartSpec {
        title: format!("Inflation Trends for {symbol}"),
        symbol: symbol.to_string(),
        x_label: "Date".to_string(),
        y_label: "Value".to_string(),
        series,
    })
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
