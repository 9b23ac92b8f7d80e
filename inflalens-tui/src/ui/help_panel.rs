//! Panel 5 — Help: keyboard shortcuts and risk buckets.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use inflalens_core::{get_risk_color, RiskLevel};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-5", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "i", "Data info: columns and row counts");
    key(&mut lines, "e", "Open error history overlay");
    key(&mut lines, "x", "Export report for the current selection");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Symbols");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "g / G", "Jump to first / last symbol");
    key(&mut lines, "Space / Enter", "Toggle symbol selection");
    key(&mut lines, "a", "Select all visible symbols");
    key(&mut lines, "d", "Clear selection");
    key(&mut lines, "/ or s", "Filter the symbol list");
    key(&mut lines, "Esc", "Clear filter");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Risk");
    key(&mut lines, "", "Risk distribution per correlation category");
    lines.push(Line::from(""));

    section(&mut lines, "Panels 3 / 4 — Trends / Summary");
    key(&mut lines, "h / l", "Previous / next selected symbol");
    key(&mut lines, "j / k", "Scroll summary table");
    lines.push(Line::from(""));

    section(&mut lines, "Risk Buckets");
    let t = app.thresholds;
    bucket(&mut lines, RiskLevel::High, &format!("correlation < {}", t.low));
    bucket(
        &mut lines,
        RiskLevel::Moderate,
        &format!("{} <= correlation <= {}", t.low, t.high),
    );
    bucket(&mut lines, RiskLevel::Low, &format!("correlation > {}", t.high));

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}

fn bucket<'a>(lines: &mut Vec<Line<'a>>, level: RiskLevel, rule: &str) {
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {:>20}  ", level.label()),
            theme::risk(get_risk_color(level)),
        ),
        Span::styled(rule.to_string(), theme::muted()),
    ]));
}
