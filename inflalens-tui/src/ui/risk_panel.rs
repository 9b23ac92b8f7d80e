//! Panel 2 — Risk: one distribution pie per correlation category.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use inflalens_core::PieChart;

use crate::app::AppState;
use crate::theme;
use crate::ui::widgets::pie::RiskPie;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if app.analysis.pies.is_empty() {
        super::render_empty_selection(f, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, app.analysis.pies.len() as u32);
            app.analysis.pies.len()
        ])
        .split(area);

    for (pie, column) in app.analysis.pies.iter().zip(columns.iter()) {
        render_pie(f, *column, pie);
    }
}

fn render_pie(f: &mut Frame, area: Rect, pie: &PieChart) {
    let spec = match pie {
        PieChart::Chart(spec) => spec,
        PieChart::Empty { category, notice } => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme::muted())
                .title(format!(" {} ", category.label()))
                .title_style(theme::muted());
            let para = Paragraph::new(Span::styled(notice.as_str(), theme::muted()))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(para, area);
            return;
        }
    };

    let legend_height = spec.slices.len() as u16 + 1;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(legend_height)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {} ", spec.title))
        .title_style(theme::accent_bold());
    f.render_widget(RiskPie::new(spec).block(block), chunks[0]);

    let mut lines = vec![Line::from(Span::styled(
        format!(" {} records", spec.total),
        theme::muted(),
    ))];
    for slice in &spec.slices {
        lines.push(Line::from(vec![
            Span::styled(" ■ ", theme::risk(slice.color)),
            Span::styled(format!("{:<14}", slice.label), theme::risk(slice.color)),
            Span::styled(format!("{:>4}  ", slice.count), theme::accent()),
            Span::styled(slice.percentage_label(), theme::muted()),
        ]));
    }
    f.render_widget(Paragraph::new(lines), chunks[1]);
}
