//! Terminal setup and teardown
//!
//! Initializes and restores the terminal, including a panic hook that puts
//! the terminal back before the panic message is printed.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::audit::AuditHistory;
use crate::config::Settings;
use crate::services::Ledger;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI until the user quits
///
/// The ledger is borrowed for the session so the caller can still read it
/// (for example to print a snapshot) once the UI has closed.
pub fn run_tui(ledger: &mut Ledger, settings: &Settings, history: AuditHistory) -> Result<()> {
    let mut terminal = init_terminal()?;
    tracing::info!("session started");

    let result = event_loop(&mut terminal, ledger, settings, history);

    restore_terminal()?;
    tracing::info!(expenses = ledger.len(), "session ended");
    result
}

fn event_loop(
    terminal: &mut Tui,
    ledger: &mut Ledger,
    settings: &Settings,
    history: AuditHistory,
) -> Result<()> {
    let mut app = App::new(ledger, settings, history);
    let events = EventHandler::default();

    while !app.should_quit {
        app.refresh();
        terminal.draw(|frame| super::views::render(frame, &app))?;
        handle_event(&mut app, events.next()?)?;
    }

    Ok(())
}
