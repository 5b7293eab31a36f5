//! Help view — key reference.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let key = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("  {k:<12}"), theme::accent()),
            Span::raw(desc.to_string()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Navigation", theme::warning())),
        key("1-4", "jump to Portfolio / Fund / Macro / Help"),
        key("Tab, S-Tab", "cycle views"),
        key("j/k, arrows", "move cursor (funds, indicators)"),
        key("Enter", "drill into the fund under the cursor"),
        Line::from(""),
        Line::from(Span::styled("Fund view", theme::warning())),
        key("h/l, [ ]", "previous / next chart"),
        Line::from(""),
        Line::from(Span::styled("Data", theme::warning())),
        key("r", "reload (served from the session cache)"),
        key("R", "refresh (clear the cache, re-read the files)"),
        key("e", "show load issues"),
        Line::from(""),
        key("q", "quit"),
    ];

    f.render_widget(Paragraph::new(lines), area);
}
