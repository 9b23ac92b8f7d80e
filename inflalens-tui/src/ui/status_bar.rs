//! Bottom status bar — panel hints, selection size, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Panel, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];

    // Panel hints
    for i in 0..Panel::COUNT {
        let Some(panel) = Panel::from_index(i) else {
            continue;
        };
        let style = if panel == app.active_panel {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!("{}:{} ", i + 1, panel.label()), style));
    }

    spans.push(Span::raw("| "));
    spans.push(Span::styled(
        format!("{} selected ", app.symbols.selected.len()),
        theme::neutral(),
    ));
    spans.push(Span::raw("| "));

    // Status message
    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
