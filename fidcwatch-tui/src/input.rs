//! Keyboard input dispatch — overlays first, then global keys, then the
//! active view's handler.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, Overlay, View};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    if app.overlay == Overlay::ErrorHistory {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
                app.overlay = Overlay::None;
            }
            _ => {}
        }
        return;
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => {
            app.active_view = View::Portfolio;
            return;
        }
        KeyCode::Char('2') => {
            app.active_view = View::Fund;
            return;
        }
        KeyCode::Char('3') => {
            app.active_view = View::Macro;
            return;
        }
        KeyCode::Char('4') => {
            app.active_view = View::Help;
            return;
        }
        KeyCode::Tab => {
            app.active_view = app.active_view.next();
            return;
        }
        KeyCode::BackTab => {
            app.active_view = app.active_view.prev();
            return;
        }
        KeyCode::Char('r') => {
            // Session-cache hit unless the sources changed identity.
            app.reload(false);
            return;
        }
        KeyCode::Char('R') => {
            // Explicit cache clear, then a real re-read.
            app.reload(true);
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        _ => {}
    }

    // 3. View-specific keys.
    match app.active_view {
        View::Portfolio => handle_portfolio_key(app, key),
        View::Fund => handle_fund_key(app, key),
        View::Macro => handle_macro_key(app, key),
        View::Help => {}
    }
}

fn handle_portfolio_key(app: &mut AppState, key: KeyEvent) {
    let count = app.fund_ids.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down if count > 0 => {
            app.portfolio_cursor = (app.portfolio_cursor + 1) % count;
        }
        KeyCode::Char('k') | KeyCode::Up if count > 0 => {
            app.portfolio_cursor = (app.portfolio_cursor + count - 1) % count;
        }
        KeyCode::Enter if count > 0 => {
            app.selected_fund = app.portfolio_cursor;
            app.active_view = View::Fund;
        }
        _ => {}
    }
}

fn handle_fund_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_fund(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_fund(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char(']') => {
            app.fund_chart = app.fund_chart.next();
        }
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('[') => {
            app.fund_chart = app.fund_chart.prev();
        }
        _ => {}
    }
}

fn handle_macro_key(app: &mut AppState, key: KeyEvent) {
    let count = app.macro_indicators().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down if count > 0 => {
            app.selected_indicator = (app.selected_indicator + 1) % count;
        }
        KeyCode::Char('k') | KeyCode::Up if count > 0 => {
            app.selected_indicator = (app.selected_indicator + count - 1) % count;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use fidcwatch_core::data::SourceLayout;
    use fidcwatch_core::domain::FundId;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> AppState {
        let mut app = AppState::new(SourceLayout::split("/nonexistent"));
        app.fund_ids = vec![FundId::from("A"), FundId::from("B")];
        app
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn digits_switch_views() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(app.active_view, View::Macro);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.active_view, View::Help);
    }

    #[test]
    fn enter_on_portfolio_drills_into_fund() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.active_view, View::Fund);
        assert_eq!(app.selected_fund, 1);
    }

    #[test]
    fn bracket_cycles_fund_chart() {
        let mut app = app();
        app.active_view = View::Fund;
        let before = app.fund_chart;
        handle_key(&mut app, press(KeyCode::Char(']')));
        assert_ne!(app.fund_chart, before);
        handle_key(&mut app, press(KeyCode::Char('[')));
        assert_eq!(app.fund_chart, before);
    }

    #[test]
    fn error_overlay_consumes_input() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('e')));
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.portfolio_cursor, 0);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }
}
