//! Panel 3 — Trends: dated values per parameter for the focused symbol.
//!
//! The x axis is days since the Unix epoch so dates plot on a linear scale.

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use inflalens_core::{TrendChart, TrendChartSpec};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(chart) = app.analysis.trends.get(app.analysis.focus) else {
        super::render_empty_selection(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);

    render_header(f, chunks[0], app, chart);
    match chart {
        TrendChart::Chart(spec) => render_chart(f, chunks[1], spec),
        TrendChart::NoData { notice, .. } => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(notice.as_str(), theme::warning())),
            ];
            f.render_widget(Paragraph::new(lines), chunks[1]);
        }
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState, chart: &TrendChart) {
    let title = match chart {
        TrendChart::Chart(spec) => spec.title.clone(),
        TrendChart::NoData { symbol, .. } => symbol.clone(),
    };
    let line = Line::from(vec![
        Span::styled(title, theme::accent_bold()),
        Span::styled(
            format!(
                "  ({}/{})  [h/l]switch symbol",
                app.analysis.focus + 1,
                app.analysis.trends.len()
            ),
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_chart(f: &mut Frame, area: Rect, spec: &TrendChartSpec) {
    let (Some((first, last)), Some((min_y, max_y))) = (spec.date_range(), spec.value_range())
    else {
        return;
    };

    let padding = ((max_y - min_y).abs() * 0.05).max(0.5);
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_min = day_number(first);
    let x_max = day_number(last).max(x_min + 1.0);

    let data: Vec<Vec<(f64, f64)>> = spec
        .series
        .iter()
        .map(|s| s.points.iter().map(|(d, v)| (day_number(*d), *v)).collect())
        .collect();

    let datasets: Vec<Dataset> = spec
        .series
        .iter()
        .zip(data.iter())
        .enumerate()
        .map(|(i, (series, points))| {
            Dataset::default()
                .name(series.parameter.clone())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::series_color(i)))
                .graph_type(GraphType::Line)
                .data(points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled(spec.x_label.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::styled(first.format("%Y-%m-%d").to_string(), theme::muted()),
                    Span::styled(last.format("%Y-%m-%d").to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(spec.y_label.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.1}"), theme::muted()),
                    Span::styled(format!("{y_max:.1}"), theme::muted()),
                ]),
        )
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

    f.render_widget(chart, area);
}

fn day_number(date: NaiveDate) -> f64 {
    date.signed_duration_since(NaiveDate::default()).num_days() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_number_is_monotonic() {
        let a = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        let b = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
        assert_eq!(day_number(b) - day_number(a), 1.0);
        assert_eq!(day_number(NaiveDate::default()), 0.0);
    }
}
