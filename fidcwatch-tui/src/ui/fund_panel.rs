//! Fund drill-down — fund selector, KPI header, and six switchable charts
//! mirroring the monitoring dashboard's per-fund graphics.

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use fidcwatch_core::domain::{CovenantStatus, FundId, FundRecord};
use fidcwatch_core::portfolio::PortfolioData;

use crate::app::{AppState, FundChart};
use crate::theme;
use crate::ui::charts::{self, GroupedBars, LineSeries};
use crate::ui::{fmt_millions, fmt_pct, fmt_signed_pct};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(data) = &app.data else {
        charts::render_empty(f, area, "Dashboard unavailable — no data loaded. Press r to retry.");
        return;
    };
    let Some(fund) = app.selected_fund_id() else {
        charts::render_empty(f, area, "No funds loaded.");
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(30)])
        .split(area);

    render_fund_list(f, chunks[0], app);

    let history = data.history(fund);
    let Some(latest) = history.last() else {
        charts::render_empty(f, chunks[1], "No rows for the selected fund.");
        return;
    };

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(5),
        ])
        .split(chunks[1]);

    render_kpis(f, right[0], data, fund, latest);
    render_chart_selector(f, right[1], app.fund_chart);

    match app.fund_chart {
        FundChart::Balance => render_balance(f, right[2], history),
        FundChart::Subordination => render_subordination(f, right[2], data, fund),
        FundChart::JuniorReturn => render_junior_return(f, right[2], data, fund),
        FundChart::Delinquency => render_delinquency(f, right[2], data, history),
        FundChart::Origination => render_origination(f, right[2], history),
        FundChart::Aging => render_aging(f, right[2], data, history),
    }
}

fn render_fund_list(f: &mut Frame, area: Rect, app: &AppState) {
    let lines: Vec<Line> = app
        .fund_ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            if i == app.selected_fund {
                Line::from(Span::styled(
                    format!("> {}", id.as_str()),
                    theme::accent().add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(format!("  {}", id.as_str()), theme::muted()))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn render_kpis(
    f: &mut Frame,
    area: Rect,
    data: &PortfolioData,
    fund: &FundId,
    latest: &FundRecord,
) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Net Worth ", theme::muted()),
            Span::raw(fmt_millions(latest.net_worth)),
            Span::styled("   PV ", theme::muted()),
            Span::raw(fmt_millions(latest.pv_credit_rights)),
            Span::styled("   PDD ", theme::muted()),
            Span::raw(fmt_millions(latest.pdd)),
        ]),
        Line::from(vec![
            Span::styled("Cum. junior return ", theme::muted()),
            Span::styled(
                fmt_signed_pct(latest.cumulative_return),
                Style::default().fg(theme::sign_color(latest.cumulative_return)),
            ),
            Span::styled("   Net allocation ", theme::muted()),
            Span::raw(fmt_pct(latest.net_allocation)),
            Span::styled("   Origination ", theme::muted()),
            Span::raw(fmt_millions(latest.origination)),
        ]),
    ];

    // Compliance flags for the latest month, colored per label.
    if latest.status.is_empty() {
        lines.push(Line::from(Span::styled("No compliance flags.", theme::muted())));
    } else {
        let mut spans: Vec<Span> = Vec::new();
        for (i, (name, value)) in latest.status.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("{name}: "), theme::muted()));
            spans.push(Span::styled(
                value.clone(),
                Style::default().fg(theme::flag_color(value)),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(covenant_summary(data, fund));

    f.render_widget(Paragraph::new(lines), area);
}

fn covenant_summary(data: &PortfolioData, fund: &FundId) -> Line<'static> {
    if data.covenants.is_none() {
        return Line::from(Span::styled("Covenants: unavailable", theme::muted()));
    }
    let records = data.covenants_for(fund);
    let flagged = records
        .iter()
        .filter(|c| c.status == CovenantStatus::Flag)
        .count();
    let style = if flagged > 0 {
        theme::negative()
    } else {
        theme::positive()
    };
    Line::from(vec![
        Span::styled("Covenants: ", theme::muted()),
        Span::styled(
            format!("{flagged} flagged of {} observations", records.len()),
            style,
        ),
    ])
}

fn render_chart_selector(f: &mut Frame, area: Rect, chart: FundChart) {
    let line = Line::from(vec![
        Span::styled("< ", theme::muted()),
        Span::styled(chart.label(), theme::accent().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" > ({}/{}, h/l to switch)", chart.index() + 1, FundChart::ALL.len()),
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Dated points for one fixed column of the history.
fn dated(
    history: &[FundRecord],
    get: impl Fn(&FundRecord) -> Option<f64>,
) -> Vec<(NaiveDate, f64)> {
    history
        .iter()
        .filter_map(|r| Some((r.reference_date?, get(r)?)))
        .collect()
}

fn millions_fmt(v: f64) -> String {
    format!("{:.1} M", v / 1.0e6)
}

fn pct_fmt(v: f64) -> String {
    format!("{:.1}%", v * 100.0)
}

/// Net worth and PV share one pane; PDD runs an order of magnitude smaller
/// and gets its own, standing in for the original's secondary axis.
fn render_balance(f: &mut Frame, area: Rect, history: &[FundRecord]) {
    let net_worth = dated(history, |r| r.net_worth);
    let pv = dated(history, |r| r.pv_credit_rights);
    let pdd = dated(history, |r| r.pdd);

    if net_worth.is_empty() && pv.is_empty() && pdd.is_empty() {
        charts::render_empty(f, area, "No balance columns in this dataset.");
        return;
    }

    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let axis = charts::date_axis(&[net_worth.as_slice(), pv.as_slice(), pdd.as_slice()]);
    let top = [
        LineSeries {
            name: "Net Worth".to_string(),
            color: theme::ACCENT,
            points: charts::index_on(&axis, &net_worth),
        },
        LineSeries {
            name: "PV Credit Rights".to_string(),
            color: theme::NEUTRAL,
            points: charts::index_on(&axis, &pv),
        },
    ];
    charts::render_lines(f, panes[0], &axis, &top, &millions_fmt);

    let bottom = [LineSeries {
        name: "PDD".to_string(),
        color: theme::WARNING,
        points: charts::index_on(&axis, &pdd),
    }];
    charts::render_lines(f, panes[1], &axis, &bottom, &millions_fmt);
}

fn render_subordination(f: &mut Frame, area: Rect, data: &PortfolioData, fund: &FundId) {
    let tranches = data.subordination_series(fund);
    if tranches.is_empty() {
        charts::render_empty(
            f,
            area,
            "No subordination metrics with thresholds defined for this fund.",
        );
        return;
    }

    let refs: Vec<&[(NaiveDate, f64)]> = tranches
        .iter()
        .flat_map(|t| [t.ratio.as_slice(), t.threshold.as_slice()])
        .collect();
    let axis = charts::date_axis(&refs);

    let mut series = Vec::with_capacity(tranches.len() * 2);
    for (i, tranche) in tranches.iter().enumerate() {
        series.push(LineSeries {
            name: tranche.tranche.clone(),
            color: theme::series_color(i),
            points: charts::index_on(&axis, &tranche.ratio),
        });
        series.push(LineSeries {
            name: format!("{} limit", tranche.tranche),
            color: theme::MUTED,
            points: charts::index_on(&axis, &tranche.threshold),
        });
    }
    charts::render_lines(f, area, &axis, &series, &pct_fmt);
}

fn render_junior_return(f: &mut Frame, area: Rect, data: &PortfolioData, fund: &FundId) {
    let points = data.cumulative_return_series(fund);
    if points.is_empty() {
        charts::render_empty(f, area, "No dated rows to chart for this fund.");
        return;
    }
    let color = theme::sign_color(points.last().map(|p| p.1).unwrap_or(0.0));
    let axis = charts::date_axis(&[points.as_slice()]);
    let series = [LineSeries {
        name: "Cumulative return".to_string(),
        color,
        points: charts::index_on(&axis, &points),
    }];
    charts::render_lines(f, area, &axis, &series, &pct_fmt);
}

fn render_delinquency(f: &mut Frame, area: Rect, data: &PortfolioData, history: &[FundRecord]) {
    let buckets: Vec<String> = data
        .schema
        .delinquency
        .iter()
        .map(|c| c.label.clone())
        .collect();
    if buckets.is_empty() {
        charts::render_empty(f, area, "No delinquency metrics for this fund.");
        return;
    }
    let groups: Vec<GroupedBars> = history
        .iter()
        .filter_map(|r| {
            let date = r.reference_date?;
            Some(GroupedBars {
                date,
                values: buckets.iter().map(|b| r.delinquency.get(b).copied()).collect(),
            })
        })
        .collect();
    charts::render_grouped_bars(f, area, &buckets, &groups, &|v| {
        format!("{:.1}", v * 100.0)
    });
}

/// Origination bars up top, net allocation below — the original's dual-axis
/// combo chart split into two panes.
fn render_origination(f: &mut Frame, area: Rect, history: &[FundRecord]) {
    let origination = dated(history, |r| r.origination);
    let allocation = dated(history, |r| r.net_allocation);
    if origination.is_empty() && allocation.is_empty() {
        charts::render_empty(f, area, "No origination or allocation columns in this dataset.");
        return;
    }

    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let axis = charts::date_axis(&[origination.as_slice(), allocation.as_slice()]);
    let top = [LineSeries {
        name: "Origination".to_string(),
        color: theme::ACCENT,
        points: charts::index_on(&axis, &origination),
    }];
    charts::render_lines(f, panes[0], &axis, &top, &millions_fmt);

    let bottom = [LineSeries {
        name: "Net allocation".to_string(),
        color: theme::POSITIVE,
        points: charts::index_on(&axis, &allocation),
    }];
    charts::render_lines(f, panes[1], &axis, &bottom, &pct_fmt);
}

fn render_aging(f: &mut Frame, area: Rect, data: &PortfolioData, history: &[FundRecord]) {
    let buckets: Vec<String> = data.schema.aging.iter().map(|c| c.label.clone()).collect();
    if buckets.is_empty() {
        charts::render_empty(f, area, "No receivables aging buckets for this fund.");
        return;
    }
    let groups: Vec<GroupedBars> = history
        .iter()
        .filter_map(|r| {
            let date = r.reference_date?;
            Some(GroupedBars {
                date,
                values: buckets.iter().map(|b| r.aging.get(b).copied()).collect(),
            })
        })
        .collect();
    charts::render_grouped_bars(f, area, &buckets, &groups, &|v| {
        format!("{:.0}", v / 1.0e6)
    });
}
