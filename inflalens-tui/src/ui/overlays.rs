//! Overlay widgets — welcome, data info, error history, filter.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use inflalens_core::MetricTable;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to InflaLens ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Pick symbols in the Symbols panel with Space",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Press 2 for the risk distribution pies",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. Press 3 and 4 for trends and summary tables",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  4. Press x to export a report",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Loaded tables: columns and row counts.
pub fn render_data_info(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Data Info [Esc]close ")
        .title_style(theme::accent_bold());

    let dataset = &app.dataset;
    let mut lines: Vec<Line> = Vec::new();
    table_lines(&mut lines, &dataset.price_index);
    table_lines(&mut lines, &dataset.income_statement);

    info_line(&mut lines, "Symbols", dataset.symbols().len().to_string());
    info_line(&mut lines, "Trend points", dataset.trends.len().to_string());
    info_line(
        &mut lines,
        "Thresholds",
        format!("low {}  high {}", app.thresholds.low, app.thresholds.high),
    );
    info_line(&mut lines, "Fingerprint", dataset.short_fingerprint().to_string());

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

fn table_lines(lines: &mut Vec<Line<'_>>, table: &MetricTable) {
    lines.push(Line::from(Span::styled(
        table.name().to_string(),
        theme::accent_bold(),
    )));
    info_line(lines, "Rows", table.len().to_string());
    info_line(lines, "Columns", table.columns().join(", "));
    lines.push(Line::from(""));
}

fn info_line(lines: &mut Vec<Line<'_>>, label: &str, value: String) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>14}: ", label), theme::muted()),
        Span::styled(value, theme::accent()),
    ]));
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app
        .error_history
        .iter()
        .enumerate()
        .take(end)
        .skip(start)
    {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Symbol filter overlay.
pub fn render_search(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(50, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Filter Symbols [Enter]apply [Esc]clear ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Symbol contains:", theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];

    f.render_widget(Paragraph::new(text), inner);
}
