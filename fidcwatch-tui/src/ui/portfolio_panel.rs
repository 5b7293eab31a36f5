//! Portfolio view — one summary row per fund, latest month.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Cell, Row, Table, TableState};
use ratatui::Frame;

use fidcwatch_core::domain::FundRecord;

use crate::app::AppState;
use crate::theme;
use crate::ui::charts::render_empty;
use crate::ui::{fmt_millions, fmt_signed_pct};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(data) = &app.data else {
        render_empty(f, area, "Dashboard unavailable — no data loaded. Press r to retry.");
        return;
    };
    if data.is_empty() {
        render_empty(f, area, "The fund dataset is empty.");
        return;
    }

    let header = Row::new(["Fund", "Date", "Net Worth", "PV", "PDD", "Cum. Ret", "Status"])
        .style(theme::accent().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .fund_ids
        .iter()
        .filter_map(|id| data.latest(id))
        .map(summary_row)
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(18),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.portfolio_cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn summary_row(rec: &FundRecord) -> Row<'static> {
    let date = rec
        .reference_date
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_else(|| "-".to_string());
    let (flag, flag_color) = worst_flag(rec);

    Row::new(vec![
        Cell::from(rec.fund.as_str().to_string()),
        Cell::from(date).style(theme::muted()),
        Cell::from(fmt_millions(rec.net_worth)),
        Cell::from(fmt_millions(rec.pv_credit_rights)),
        Cell::from(fmt_millions(rec.pdd)),
        Cell::from(fmt_signed_pct(rec.cumulative_return))
            .style(Style::default().fg(theme::sign_color(rec.cumulative_return))),
        Cell::from(flag).style(Style::default().fg(flag_color)),
    ])
}

/// The worst compliance flag on a row: FLAG beats unknown labels, which
/// beat OK/N/A. Funds without status columns show a dash.
fn worst_flag(rec: &FundRecord) -> (String, ratatui::style::Color) {
    let mut worst: Option<&str> = None;
    let mut worst_rank = 0u8;
    for value in rec.status.values() {
        let rank = match value.trim().to_ascii_uppercase().as_str() {
            "FLAG" => 3,
            "OK" | "N/A" | "NA" => 1,
            _ => 2,
        };
        if rank > worst_rank {
            worst_rank = rank;
            worst = Some(value);
        }
    }
    match worst {
        Some(label) => (label.to_string(), theme::flag_color(label)),
        None => ("-".to_string(), theme::MUTED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidcwatch_core::domain::FundId;

    #[test]
    fn worst_flag_prefers_breach() {
        let mut rec = FundRecord::new(FundId::from("Alpha"));
        rec.status.insert("concentration".into(), "OK".into());
        rec.status.insert("liquidity".into(), "FLAG".into());
        let (label, color) = worst_flag(&rec);
        assert_eq!(label, "FLAG");
        assert_eq!(color, theme::NEGATIVE);
    }

    #[test]
    fn no_status_columns_shows_dash() {
        let rec = FundRecord::new(FundId::from("Alpha"));
        assert_eq!(worst_flag(&rec).0, "-");
    }

    #[test]
    fn unknown_label_outranks_ok() {
        let mut rec = FundRecord::new(FundId::from("Alpha"));
        rec.status.insert("a".into(), "OK".into());
        rec.status.insert("b".into(), "WATCH".into());
        assert_eq!(worst_flag(&rec).0, "WATCH");
    }
}
