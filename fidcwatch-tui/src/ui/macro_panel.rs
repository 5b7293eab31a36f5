//! Macro view — indicator selector plus the selected series over time.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::charts::{self, LineSeries};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(data) = &app.data else {
        charts::render_empty(f, area, "Dashboard unavailable — no data loaded.");
        return;
    };
    if data.macro_series.is_none() {
        charts::render_empty(
            f,
            area,
            "Macro dataset unavailable for this source layout (press e for details).",
        );
        return;
    }
    if data.macro_indicators.is_empty() {
        charts::render_empty(f, area, "The macro file carries no indicator columns.");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(20)])
        .split(area);

    render_indicator_list(f, chunks[0], app);

    let Some(indicator) = app.selected_indicator_name() else {
        charts::render_empty(f, chunks[1], "Select an indicator.");
        return;
    };
    let points = data.macro_points(indicator);
    if points.is_empty() {
        charts::render_empty(f, chunks[1], "No readings for this indicator.");
        return;
    }

    let axis = charts::date_axis(&[points.as_slice()]);
    let series = [LineSeries {
        name: indicator.to_string(),
        color: theme::ACCENT,
        points: charts::index_on(&axis, &points),
    }];
    charts::render_lines(f, chunks[1], &axis, &series, &|v| format!("{v:.2}"));
}

fn render_indicator_list(f: &mut Frame, area: Rect, app: &AppState) {
    let lines: Vec<Line> = app
        .macro_indicators()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == app.selected_indicator {
                Line::from(Span::styled(
                    format!("> {name}"),
                    theme::accent().add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(format!("  {name}"), theme::muted()))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}
