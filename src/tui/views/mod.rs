//! TUI views
//!
//! Header, expense table, summary panel and status bar, with any open
//! dialog and the current toast drawn on top.

pub mod expense_list;
pub mod status_bar;
pub mod summary;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::{toast_rect, AppLayout};
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);
    expense_list::render(frame, app, layout.expenses);
    summary::render(frame, app, layout.summary);
    status_bar::render(frame, app, layout.status_bar);

    render_dialog(frame, app);

    if let Some(notification) = app.notifications.current() {
        let area = toast_rect(44, 4, frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let line = Line::from(vec![
        Span::styled(
            "Expense Ledger",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            app.today_long(),
            Style::default().fg(Color::White),
        ),
        Span::raw("   "),
        Span::styled("Total ", Style::default().fg(Color::White)),
        Span::styled(
            app.statistics().total.format_with_symbol(app.currency_symbol()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_dialog(frame: &mut Frame, app: &App) {
    match app.active_dialog {
        ActiveDialog::None => {}
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::AddExpense => dialogs::expense::render(frame, app),
        ActiveDialog::ConfirmDelete(_) => {
            if let Some(message) = app.confirmation_message() {
                dialogs::confirm::render(frame, "Delete expense", &message);
            }
        }
        ActiveDialog::ConfirmClear => {
            if let Some(message) = app.confirmation_message() {
                dialogs::confirm::render(frame, "Clear all", &message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, DEFAULT_HISTORY_CAPACITY};
    use crate::config::Settings;
    use crate::models::ExpenseDraft;
    use crate::services::{FixedClock, Ledger, ValidationLimits};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_list_and_summary() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut ledger = Ledger::with_clock(ValidationLimits::default(), FixedClock::new(today));
        let (logger, history) = AuditLogger::new(DEFAULT_HISTORY_CAPACITY);
        ledger.subscribe(logger);
        ledger.add(ExpenseDraft::new("Coffee", 4.5, today)).unwrap();
        ledger
            .add(ExpenseDraft::new("Groceries", 62.1, today.pred_opt().unwrap()))
            .unwrap();

        let settings = Settings {
            stats_interval_secs: 0,
            ..Settings::default()
        };
        let app = App::new(&mut ledger, &settings, history);

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Expenses (2)"));
        assert!(text.contains("Friday, March 14, 2025"));
        assert!(text.contains("Today"));
        assert!(text.contains("Yesterday"));
        assert!(text.contains("$66.60"));
        assert!(text.contains("CREATE exp-"));
    }

    #[test]
    fn test_render_empty_with_help_open() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut ledger = Ledger::with_clock(ValidationLimits::default(), FixedClock::new(today));
        let settings = Settings {
            stats_interval_secs: 0,
            ..Settings::default()
        };
        let mut app = App::new(&mut ledger, &settings, Default::default());
        app.toggle_help();

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Help"));
        assert!(text.contains("Add an expense"));
    }
}
