//! Overlays drawn above the active view.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Error history — most recent first.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Load issues (Esc to close) ")
        .title_style(theme::panel_title(true));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.errors.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No issues recorded this session.",
                theme::muted(),
            ))),
            inner,
        );
        return;
    }

    let visible = inner.height as usize;
    let lines: Vec<Line> = app
        .errors
        .iter()
        .rev()
        .take(visible)
        .map(|rec| {
            Line::from(vec![
                Span::styled(rec.timestamp.format("%H:%M:%S ").to_string(), theme::muted()),
                Span::styled(rec.message.clone(), theme::warning()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
