//! Neon-on-charcoal palette and the style helpers the panels draw with.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, highlights)
//! - **Positive**: Neon green (low risk)
//! - **Warning**: Neon orange (moderate risk, alerts)
//! - **Negative**: Hot pink (high risk, errors)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (disabled, hints)

use ratatui::style::{Color, Modifier, Style};

use inflalens_core::RiskColor;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

/// Terminal color for a risk bucket color.
pub fn risk_color(color: RiskColor) -> Color {
    match color {
        RiskColor::Red => NEGATIVE,
        RiskColor::Orange => WARNING,
        RiskColor::Green => POSITIVE,
        RiskColor::Gray => TEXT_SECONDARY,
    }
}

pub fn risk(color: RiskColor) -> Style {
    Style::default().fg(risk_color(color))
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Cycled for trend series, one color per parameter.
pub const SERIES: [Color; 6] = [ACCENT, POSITIVE, WARNING, NEUTRAL, NEGATIVE, MUTED];

pub fn series_color(index: usize) -> Color {
    SERIES[index % SERIES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_colors_are_distinct() {
        let colors = [
            risk_color(RiskColor::Red),
            risk_color(RiskColor::Orange),
            risk_color(RiskColor::Green),
            risk_color(RiskColor::Gray),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn series_colors_cycle() {
        assert_eq!(series_color(0), series_color(SERIES.len()));
        assert_ne!(series_color(0), series_color(1));
    }
}
