//! Panel 1 — Symbols: multi-select list of every symbol in the price index.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

/// Header lines above the list.
const HEADER_ROWS: usize = 2;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let symbols = &app.symbols;
    let visible = symbols.visible();
    let mut lines: Vec<Line> = Vec::new();

    // Header
    let mut header = vec![
        Span::styled("Selected: ", theme::muted()),
        Span::styled(
            format!("{}/{}", symbols.selected.len(), symbols.all.len()),
            theme::accent(),
        ),
    ];
    if !symbols.filter.is_empty() {
        header.push(Span::styled("  filter: ", theme::muted()));
        header.push(Span::styled(symbols.filter.as_str(), theme::warning()));
    }
    header.push(Span::styled(
        "  [Space]toggle [a]ll [d]eselect [/]filter [x]export",
        theme::muted(),
    ));
    lines.push(Line::from(header));
    lines.push(Line::from(""));

    if symbols.all.is_empty() {
        lines.push(Line::from(Span::styled(
            "The price index has no symbols.",
            theme::warning(),
        )));
    } else if visible.is_empty() {
        lines.push(Line::from(Span::styled(
            "No symbols match the filter.",
            theme::muted(),
        )));
    }

    // Keep the cursor on screen.
    let rows = (area.height as usize).saturating_sub(HEADER_ROWS).max(1);
    let offset = symbols.cursor.saturating_sub(rows - 1);

    for (i, symbol) in visible.iter().enumerate().skip(offset).take(rows) {
        let is_cursor = i == symbols.cursor;
        let pick = symbols.selected.iter().position(|s| s == symbol);

        let check = if pick.is_some() { "[x]" } else { "[ ]" };
        let style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if pick.is_some() {
            theme::accent()
        } else {
            theme::muted()
        };

        let mut spans = vec![Span::raw(" "), Span::raw(check), Span::raw(" ")];
        spans.push(Span::styled(format!("{symbol:<16}"), style));
        if let Some(n) = pick {
            spans.push(Span::styled(format!(" #{}", n + 1), theme::neutral()));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}
