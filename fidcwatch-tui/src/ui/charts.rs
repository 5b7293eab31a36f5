//! Chart-building helpers shared by the data views.
//!
//! Terminal charts position points on an index x-axis; the calendar lives
//! in the axis labels. Dated series are mapped onto a shared date axis so
//! multiple lines stay aligned even when some cells were coerced to the
//! null sentinel and dropped.

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::theme;

/// One named line on a chart.
pub struct LineSeries {
    pub name: String,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
}

/// Sorted union of the dates appearing in any series.
pub fn date_axis(series: &[&[(NaiveDate, f64)]]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = series.iter().flat_map(|s| s.iter().map(|p| p.0)).collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Map a dated series onto positions along `axis`.
pub fn index_on(axis: &[NaiveDate], points: &[(NaiveDate, f64)]) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter_map(|(d, v)| axis.binary_search(d).ok().map(|i| (i as f64, *v)))
        .collect()
}

/// Render one or more line series over a shared date axis.
pub fn render_lines(
    f: &mut Frame,
    area: Rect,
    axis: &[NaiveDate],
    series: &[LineSeries],
    y_fmt: &dyn Fn(f64) -> String,
) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for s in series {
        for (_, y) in &s.points {
            min_y = min_y.min(*y);
            max_y = max_y.max(*y);
        }
    }
    if !min_y.is_finite() || !max_y.is_finite() {
        render_empty(f, area, "No chartable points for this selection.");
        return;
    }

    let padding = (max_y - min_y).abs().max(1e-9) * 0.05;
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = axis.len().saturating_sub(1).max(1) as f64;

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.name.clone())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(s.color))
                .graph_type(GraphType::Line)
                .data(&s.points)
        })
        .collect();

    let (first, last) = match (axis.first(), axis.last()) {
        (Some(a), Some(b)) => (
            a.format("%Y-%m").to_string(),
            b.format("%Y-%m").to_string(),
        ),
        _ => (String::new(), String::new()),
    };

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(first, theme::muted()),
                    Span::styled(last, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(y_fmt(y_min), theme::muted()),
                    Span::styled(y_fmt(y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// One date's bar values, one per bucket, in canonical bucket order.
pub struct GroupedBars {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// Render grouped bars with a colored bucket legend above the chart. The
/// group count is trimmed to fit the width, keeping the most recent dates.
pub fn render_grouped_bars(
    f: &mut Frame,
    area: Rect,
    buckets: &[String],
    groups: &[GroupedBars],
    value_fmt: &dyn Fn(f64) -> String,
) {
    if buckets.is_empty() || groups.is_empty() {
        render_empty(f, area, "No bucketed data for this selection.");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let mut legend: Vec<Span> = Vec::new();
    for (i, bucket) in buckets.iter().enumerate() {
        if i > 0 {
            legend.push(Span::raw("  "));
        }
        legend.push(Span::styled(
            format!("■ {bucket}"),
            Style::default().fg(theme::series_color(i)),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(legend)), chunks[0]);

    let bar_width = 3u16;
    let group_width = buckets.len() as u16 * (bar_width + 1) + 2;
    let max_groups = (chunks[1].width / group_width).max(1) as usize;
    let shown = &groups[groups.len().saturating_sub(max_groups)..];

    // BarChart heights are u64; rescale so the tallest bar keeps resolution.
    let max_v = shown
        .iter()
        .flat_map(|g| g.values.iter().flatten())
        .fold(0.0f64, |acc, v| acc.max(*v));
    let scale = if max_v > 0.0 { 1000.0 / max_v } else { 1.0 };

    let mut chart = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(1)
        .group_gap(2);
    for group in shown {
        let bars: Vec<Bar> = group
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let raw = v.unwrap_or(0.0);
                Bar::default()
                    .value((raw * scale).round() as u64)
                    .text_value(value_fmt(raw))
                    .style(Style::default().fg(theme::series_color(i)))
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(group.date.format("%y-%m").to_string()))
                .bars(&bars),
        );
    }
    f.render_widget(chart, chunks[1]);
}

/// Explanatory empty state, used where the original showed a warning box.
pub fn render_empty(f: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
