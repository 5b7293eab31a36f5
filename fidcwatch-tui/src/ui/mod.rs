//! Top-level UI layout — active view plus a one-line status bar.

pub mod charts;
pub mod fund_panel;
pub mod help_panel;
pub mod macro_panel;
pub mod overlays;
pub mod portfolio_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, View};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_view(f, main_area, app);
    status_bar::render(f, status_area, app);

    if app.overlay == Overlay::ErrorHistory {
        overlays::render_error_history(f, main_area, app);
    }
}

fn draw_view(f: &mut Frame, area: Rect, app: &AppState) {
    let view = app.active_view;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", view.label(), view.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match view {
        View::Portfolio => portfolio_panel::render(f, inner, app),
        View::Fund => fund_panel::render(f, inner, app),
        View::Macro => macro_panel::render(f, inner, app),
        View::Help => help_panel::render(f, inner),
    }
}

/// A centered sub-rect, as a percentage of the surrounding area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

// ── Display formatting ──────────────────────────────────────────────

/// Currency in millions: `R$ 52.30 M`. Missing cells render as an em-free dash.
pub fn fmt_millions(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("R$ {:.2} M", v / 1.0e6),
        None => "-".to_string(),
    }
}

/// Ratio as a percentage: `91.20%`.
pub fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "-".to_string(),
    }
}

/// Signed percentage for returns: `+4.52%`.
pub fn fmt_signed_pct(value: f64) -> String {
    format!("{:+.2}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millions_formatting() {
        assert_eq!(fmt_millions(Some(52_300_000.0)), "R$ 52.30 M");
        assert_eq!(fmt_millions(None), "-");
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(fmt_pct(Some(0.912)), "91.20%");
        assert_eq!(fmt_signed_pct(0.0452), "+4.52%");
        assert_eq!(fmt_signed_pct(-0.015), "-1.50%");
    }

    #[test]
    fn centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 50, area);
        assert!(inner.width <= 60);
        assert!(inner.height <= 20);
        assert!(inner.x >= 20);
    }
}
