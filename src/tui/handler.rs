//! Event handler for the TUI
//!
//! Routes keyboard events to the open dialog, or to the expense list when
//! no dialog is open.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, App};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => app.on_tick(Instant::now()),
        Event::Resize(_, _) => {}
    }
    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.active_dialog {
        ActiveDialog::None => handle_list_key(app, key),
        ActiveDialog::AddExpense => handle_form_key(app, key),
        ActiveDialog::ConfirmDelete(id) => {
            if let Some(confirmed) = confirmation(key) {
                if confirmed {
                    app.confirm_delete(id);
                } else {
                    app.close_dialog();
                }
            }
        }
        ActiveDialog::ConfirmClear => {
            if let Some(confirmed) = confirmation(key) {
                if confirmed {
                    app.confirm_clear();
                } else {
                    app.close_dialog();
                }
            }
        }
        ActiveDialog::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter
            ) {
                app.close_dialog();
            }
        }
    }
}

/// `Some(true)` for yes, `Some(false)` for no or cancel, `None` to ignore
fn confirmation(key: KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_add_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('C') => app.request_clear(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.submit_expense(),
        code => edit_form(app, code),
    }
}

fn edit_form(app: &mut App, code: KeyCode) {
    let form = &mut app.expense_form;
    match code {
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.prev_field(),
        KeyCode::Backspace => form.focused_input().backspace(),
        KeyCode::Delete => form.focused_input().delete(),
        KeyCode::Left => form.focused_input().move_left(),
        KeyCode::Right => form.focused_input().move_right(),
        KeyCode::Home => form.focused_input().move_start(),
        KeyCode::End => form.focused_input().move_end(),
        KeyCode::Char(c) => {
            form.clear_error();
            form.focused_input().insert(c);
        }
        _ => {}
    }
}
