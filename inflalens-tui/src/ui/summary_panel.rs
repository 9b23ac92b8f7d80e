//! Panel 4 — Summary: classified correlations for the focused symbol.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use inflalens_core::summary::SUMMARY_HEADERS;
use inflalens_core::{get_risk_color, summary_for_symbol, RiskLevel};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(symbol) = app.focused_symbol() else {
        super::render_empty_selection(f, area);
        return;
    };
    let table = summary_for_symbol(&app.analysis.records, symbol);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    // Header: title plus per-level counts.
    let mut counts = vec![Span::styled(
        format!("{} records  ", table.records.len()),
        theme::muted(),
    )];
    for level in RiskLevel::ALL {
        let color = get_risk_color(level);
        counts.push(Span::styled(
            format!("{}: {}  ", level.label(), table.count(level)),
            theme::risk(color),
        ));
    }
    if let Some(mean) = table.mean_value() {
        counts.push(Span::styled(format!("mean {mean:.3}"), theme::neutral()));
    }
    let header = vec![
        Line::from(vec![
            Span::styled(table.title.as_str(), theme::accent_bold()),
            Span::styled(
                format!(
                    "  ({}/{})  [h/l]switch symbol [j/k]scroll",
                    app.analysis.focus + 1,
                    app.symbols.selected.len()
                ),
                theme::muted(),
            ),
        ]),
        Line::from(counts),
    ];
    f.render_widget(Paragraph::new(header), chunks[0]);

    if table.is_empty() {
        let notice = Paragraph::new(Span::styled(
            format!("No correlation records for {symbol}."),
            theme::muted(),
        ));
        f.render_widget(notice, chunks[1]);
        return;
    }

    let visible = (chunks[1].height as usize).saturating_sub(1).max(1);
    let skip = app
        .analysis
        .summary_scroll
        .min(table.records.len().saturating_sub(visible));

    let rows: Vec<Row> = table
        .records
        .iter()
        .zip(table.rows())
        .skip(skip)
        .map(|(record, cells)| {
            let style = theme::risk(record.color);
            let [sym, category, parameter, value, level, color] = cells;
            Row::new(vec![
                Cell::from(sym),
                Cell::from(category),
                Cell::from(parameter),
                Cell::from(value).style(theme::accent()),
                Cell::from(level).style(style),
                Cell::from(color).style(style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(32),
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(7),
    ];
    let header_row = Row::new(SUMMARY_HEADERS.iter().map(|h| Cell::from(*h))).style(theme::bold());
    let table_widget = Table::new(rows, widths)
        .header(header_row)
        .column_spacing(1);
    f.render_widget(table_widget, chunks[1]);
}
