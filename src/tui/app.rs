//! Application state for the TUI
//!
//! The App holds the ledger for the session plus everything needed to draw
//! it: the cached display rows, selection, open dialog and pending toasts.
//! The cache is rebuilt when the ledger reports a change.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use chrono::NaiveDate;

use crate::audit::AuditHistory;
use crate::config::Settings;
use crate::display::{date_label, long_date};
use crate::models::{Expense, ExpenseId};
use crate::services::{Ledger, LedgerEvent, Statistics, StatsReporter, SubscriptionId};

use super::dialogs::expense::ExpenseFormState;
use super::widgets::notification::{Notification, NotificationQueue};

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddExpense,
    ConfirmDelete(ExpenseId),
    ConfirmClear,
    Help,
}

/// Main application state
pub struct App<'a> {
    ledger: &'a mut Ledger,

    pub settings: &'a Settings,

    /// Recent audit entries, shown in the summary panel
    pub history: AuditHistory,

    pub should_quit: bool,

    pub active_dialog: ActiveDialog,

    /// Index into the display rows
    pub selected_index: usize,

    pub expense_form: ExpenseFormState,

    pub notifications: NotificationQueue,

    rows: Vec<Expense>,
    statistics: Statistics,
    today: NaiveDate,
    select_after_refresh: Option<ExpenseId>,
    dirty: Rc<Cell<bool>>,
    subscription: SubscriptionId,
    reporter: Option<StatsReporter>,
}

impl<'a> App<'a> {
    /// Create the app and subscribe it to ledger changes
    pub fn new(ledger: &'a mut Ledger, settings: &'a Settings, history: AuditHistory) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = ledger.subscribe(move |_: &LedgerEvent| flag.set(true));
        let today = ledger.today();
        let reporter = settings
            .stats_interval()
            .map(|interval| StatsReporter::new(interval, Instant::now()));

        let mut app = Self {
            ledger,
            settings,
            history,
            should_quit: false,
            active_dialog: ActiveDialog::None,
            selected_index: 0,
            expense_form: ExpenseFormState::new(today),
            notifications: NotificationQueue::new(),
            rows: Vec::new(),
            statistics: Statistics::default(),
            today,
            select_after_refresh: None,
            dirty,
            subscription,
            reporter,
        };
        app.refresh();
        app
    }

    /// Rebuild the cached rows if the ledger changed since the last call
    pub fn refresh(&mut self) {
        if !self.dirty.replace(false) {
            return;
        }

        self.rows = self
            .ledger
            .sorted_for_display()
            .into_iter()
            .cloned()
            .collect();
        self.statistics = self.ledger.statistics();
        self.today = self.ledger.today();

        if let Some(id) = self.select_after_refresh.take() {
            if let Some(index) = self.rows.iter().position(|e| e.id() == id) {
                self.selected_index = index;
            }
        }
        self.selected_index = self.selected_index.min(self.rows.len().saturating_sub(1));
    }

    /// Expenses in display order, as of the last refresh
    pub fn rows(&self) -> &[Expense] {
        &self.rows
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn currency_symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Label for an expense date: "Today", "Yesterday" or the long form
    pub fn date_label(&self, date: NaiveDate) -> String {
        date_label(date, self.today, &self.settings.long_date_format)
    }

    /// Today's date in the configured long format
    pub fn today_long(&self) -> String {
        long_date(self.today, &self.settings.long_date_format)
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.rows.get(self.selected_index)
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn toggle_help(&mut self) {
        self.active_dialog = match self.active_dialog {
            ActiveDialog::Help => ActiveDialog::None,
            _ => ActiveDialog::Help,
        };
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.rows.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.rows.len().saturating_sub(1);
    }

    /// Open an empty add-expense form
    pub fn open_add_form(&mut self) {
        self.expense_form = ExpenseFormState::new(self.ledger.today());
        self.active_dialog = ActiveDialog::AddExpense;
    }

    /// Hand the form to the ledger; on rejection the form stays open
    pub fn submit_expense(&mut self) {
        let draft = self.expense_form.to_draft(self.ledger.today());
        match self.ledger.add(draft) {
            Ok(expense) => {
                let message = format!(
                    "Added {} {} ({})",
                    expense.description(),
                    expense.amount().format_with_symbol(&self.settings.currency_symbol),
                    self.date_label(expense.date())
                );
                self.select_after_refresh = Some(expense.id());
                self.close_dialog();
                self.notifications.push(Notification::success(message));
            }
            Err(reason) => {
                self.expense_form.set_error(reason.to_string());
                self.notifications.push(Notification::error(reason.to_string()));
            }
        }
    }

    /// Ask before deleting the selected expense
    pub fn request_delete(&mut self) {
        match self.selected_expense().map(|e| e.id()) {
            Some(id) => self.active_dialog = ActiveDialog::ConfirmDelete(id),
            None => self.notifications.push(Notification::info("Nothing to delete")),
        }
    }

    pub fn confirm_delete(&mut self, id: ExpenseId) {
        self.close_dialog();
        match self.ledger.delete(id) {
            Ok(removed) => self.notifications.push(Notification::success(format!(
                "Deleted {} {}",
                removed.description(),
                removed.amount().format_with_symbol(&self.settings.currency_symbol)
            ))),
            Err(e) => self.notifications.push(Notification::error(e.to_string())),
        }
    }

    /// Ask before clearing everything
    pub fn request_clear(&mut self) {
        if self.ledger.is_empty() {
            self.notifications.push(Notification::info("Nothing to clear"));
        } else {
            self.active_dialog = ActiveDialog::ConfirmClear;
        }
    }

    pub fn confirm_clear(&mut self) {
        self.close_dialog();
        let removed = self.ledger.clear();
        self.selected_index = 0;
        self.notifications
            .push(Notification::success(format!("Cleared {} expense(s)", removed)));
    }

    /// Message for the open confirmation dialog
    pub fn confirmation_message(&self) -> Option<String> {
        match self.active_dialog {
            ActiveDialog::ConfirmDelete(id) => {
                let expense = self.rows.iter().find(|e| e.id() == id)?;
                Some(format!(
                    "Delete \"{}\" ({})?",
                    expense.description(),
                    expense.amount().format_with_symbol(&self.settings.currency_symbol)
                ))
            }
            ActiveDialog::ConfirmClear => Some(format!(
                "Delete all {} expense(s)? This cannot be undone.",
                self.ledger.len()
            )),
            _ => None,
        }
    }

    /// Periodic housekeeping: toasts, statistics log, date rollover
    pub fn on_tick(&mut self, now: Instant) {
        self.notifications.tick(now);

        if let Some(reporter) = self.reporter.as_mut() {
            reporter.poll(now, self.ledger);
        }

        if self.ledger.today() != self.today {
            self.dirty.set(true);
        }
    }
}

impl Drop for App<'_> {
    fn drop(&mut self) {
        self.ledger.unsubscribe(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseDraft;
    use crate::services::{FixedClock, ValidationLimits};
    use crate::tui::dialogs::expense::ExpenseField;
    use crate::tui::widgets::NotificationType;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn settings() -> Settings {
        Settings {
            stats_interval_secs: 0,
            ..Settings::default()
        }
    }

    fn ledger() -> Ledger {
        Ledger::with_clock(ValidationLimits::default(), FixedClock::new(day(14)))
    }

    fn type_into(app: &mut App, field: ExpenseField, text: &str) {
        app.expense_form.set_focus(field);
        app.expense_form.focused_input().clear();
        for c in text.chars() {
            app.expense_form.focused_input().insert(c);
        }
    }

    #[test]
    fn test_add_through_form() {
        let mut ledger = ledger();
        let settings = settings();
        let mut app = App::new(&mut ledger, &settings, AuditHistory::default());

        app.open_add_form();
        type_into(&mut app, ExpenseField::Description, "Coffee");
        type_into(&mut app, ExpenseField::Amount, "4.50");
        app.submit_expense();
        app.refresh();

        assert_eq!(app.active_dialog, ActiveDialog::None);
        assert_eq!(app.rows().len(), 1);
        assert_eq!(app.statistics().total.cents(), 450);
        let toast = app.notifications.current().unwrap();
        assert_eq!(toast.notification_type, NotificationType::Success);
        assert!(toast.message.contains("Coffee $4.50 (Today)"));
    }

    #[test]
    fn test_rejected_form_stays_open() {
        let mut ledger = ledger();
        let settings = settings();
        let mut app = App::new(&mut ledger, &settings, AuditHistory::default());

        app.open_add_form();
        type_into(&mut app, ExpenseField::Description, "Coffee");
        type_into(&mut app, ExpenseField::Amount, "-2");
        app.submit_expense();
        app.refresh();

        assert_eq!(app.active_dialog, ActiveDialog::AddExpense);
        assert_eq!(
            app.expense_form.error_message.as_deref(),
            Some("Amount must be a number greater than zero")
        );
        assert!(app.rows().is_empty());
    }

    #[test]
    fn test_new_expense_is_selected() {
        let mut ledger = ledger();
        ledger.add(ExpenseDraft::new("Old", 1.0, day(10))).unwrap();
        ledger.add(ExpenseDraft::new("Older", 1.0, day(9))).unwrap();
        let settings = settings();
        let mut app = App::new(&mut ledger, &settings, AuditHistory::default());
        app.select_last();

        app.open_add_form();
        type_into(&mut app, ExpenseField::Description, "New");
        type_into(&mut app, ExpenseField::Amount, "3");
        app.submit_expense();
        app.refresh();

        assert_eq!(app.selected_expense().unwrap().description(), "New");
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_delete_with_confirmation() {
        let mut ledger = ledger();
        ledger.add(ExpenseDraft::new("Coffee", 4.5, day(14))).unwrap();
        ledger.add(ExpenseDraft::new("Lunch", 12.0, day(13))).unwrap();
        let settings = settings();
        let mut app = App::new(&mut ledger, &settings, AuditHistory::default());

        app.move_down();
        app.request_delete();
        let id = match app.active_dialog {
            ActiveDialog::ConfirmDelete(id) => id,
            other => panic!("unexpected dialog {:?}", other),
        };
        assert!(app.confirmation_message().unwrap().contains("Lunch"));

        app.confirm_delete(id);
        app.refresh();
        assert_eq!(app.rows().len(), 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.rows()[0].description(), "Coffee");
    }

    #[test]
    fn test_delete_on_empty_list_informs() {
        let mut ledger = ledger();
        let settings = settings();
        let mut app = App::new(&mut ledger, &settings, AuditHistory::default());

        app.request_delete();
        assert_eq!(app.active_dialog, ActiveDialog::None);
        assert_eq!(
            app.notifications.current().unwrap().notification_type,
            NotificationType::Info
        );
    }

    #[test]
    fn test_clear_all() {
        let mut ledger = ledger();
        ledger.add(ExpenseDraft::new("Coffee", 4.5, day(14))).unwrap();
        ledger.add(ExpenseDraft::new("Lunch", 12.0, day(13))).unwrap();
        let settings = settings();
        let mut app = App::new(&mut ledger, &settings, AuditHistory::default());

        app.request_clear();
        assert_eq!(app.active_dialog, ActiveDialog::ConfirmClear);
        app.confirm_clear();
        app.refresh();

        assert!(app.rows().is_empty());
        assert!(app.statistics().total.is_zero());
        assert_eq!(
            app.notifications.current().unwrap().message,
            "Cleared 2 expense(s)"
        );
    }

    #[test]
    fn test_dropping_app_unsubscribes() {
        let mut ledger = ledger();
        let settings = settings();
        {
            let _app = App::new(&mut ledger, &settings, AuditHistory::default());
        }
        assert!(format!("{:?}", ledger).contains("observers: 0"));
    }
}
