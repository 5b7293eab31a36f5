//! FidcWatch TUI — terminal dashboard for FIDC portfolio monitoring.
//!
//! Views:
//! 1. Portfolio — one summary row per fund with the latest KPIs
//! 2. Fund — drill-down with KPI header and six switchable charts
//! 3. Macro — macroeconomic indicator series
//! 4. Help — keyboard reference
//!
//! Usage: `fidcwatch-tui [PATH]` where PATH is a split-layout data
//! directory (default `./data`) or a consolidated export file.

mod app;
mod data_loader;
mod input;
mod persistence;
mod theme;
mod ui;

use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::AppState;

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let arg = std::env::args().nth(1);
    let layout = data_loader::resolve_layout(arg.as_deref());

    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fidcwatch")
        .join("state.json");
    let persisted = persistence::load(&state_path);

    let mut app = AppState::new(layout);
    // One synchronous load per session; later interactions hit the cache.
    app.reload(false);
    persistence::apply(&mut app, persisted);

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    let _ = persistence::save(&state_path, &persistence::extract(&app));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut AppState) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }
    }
    Ok(())
}
