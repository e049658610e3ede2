//! The expense ledger
//!
//! Owns the session's expenses in insertion order. A ledger is created when
//! a session starts and dropped when it ends; nothing is written to disk.
//! Display order, totals and statistics are derived from the records each
//! time they are asked for.

use crate::error::{LedgerError, LedgerResult};
use crate::export::Snapshot;
use crate::models::{Expense, ExpenseDraft, ExpenseId, Money};

use super::clock::{Clock, SystemClock};
use super::observer::{LedgerEvent, LedgerObserver, SubscriptionId};
use super::statistics::Statistics;
use super::validator::{RejectionReason, ValidationLimits, Validator};

/// In-memory owner of the expense collection
pub struct Ledger {
    expenses: Vec<Expense>,
    validator: Validator,
    clock: Box<dyn Clock>,
    observers: Vec<(SubscriptionId, Box<dyn LedgerObserver>)>,
    next_sequence: u64,
    next_subscription: u64,
}

impl Ledger {
    /// Create an empty ledger using the system clock
    pub fn new(limits: ValidationLimits) -> Self {
        Self::with_clock(limits, SystemClock)
    }

    /// Create an empty ledger with a specific clock
    pub fn with_clock(limits: ValidationLimits, clock: impl Clock + 'static) -> Self {
        Self {
            expenses: Vec::new(),
            validator: Validator::new(limits),
            clock: Box::new(clock),
            observers: Vec::new(),
            next_sequence: 0,
            next_subscription: 0,
        }
    }

    /// Validate a draft and append it as a new expense
    ///
    /// On rejection the ledger is untouched and observers are not notified.
    pub fn add(&mut self, draft: ExpenseDraft) -> Result<Expense, RejectionReason> {
        let valid = match self.validator.validate(&draft, self.clock.today()) {
            Ok(valid) => valid,
            Err(reason) => {
                tracing::warn!(?reason, description = %draft.description, "expense rejected");
                return Err(reason);
            }
        };

        let expense = Expense::new(
            valid.description,
            valid.amount,
            valid.date,
            self.clock.now(),
            self.next_sequence,
        );
        self.next_sequence += 1;
        self.expenses.push(expense.clone());

        tracing::info!(
            id = %expense.id(),
            amount = %expense.amount(),
            date = %expense.date(),
            "expense added"
        );
        self.notify(&LedgerEvent::Added(expense.clone()));

        Ok(expense)
    }

    /// Remove an expense by ID, returning the removed record
    pub fn delete(&mut self, id: ExpenseId) -> LedgerResult<Expense> {
        let Some(index) = self.expenses.iter().position(|e| e.id() == id) else {
            tracing::debug!(%id, "delete of unknown expense");
            return Err(LedgerError::expense_not_found(id.to_string()));
        };

        let removed = self.expenses.remove(index);
        tracing::info!(id = %removed.id(), amount = %removed.amount(), "expense deleted");
        self.notify(&LedgerEvent::Deleted(removed.clone()));

        Ok(removed)
    }

    /// Remove every expense, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.expenses.len();
        self.expenses.clear();

        tracing::info!(removed, "ledger cleared");
        self.notify(&LedgerEvent::Cleared { removed });

        removed
    }

    /// Sum of all current amounts
    pub fn total(&self) -> Money {
        self.expenses.iter().map(Expense::amount).sum()
    }

    /// Expenses ordered for display
    ///
    /// Most recent date first; within a date, most recently added first.
    /// Insertion sequence decides ties, not `created_at`, since the wall
    /// clock may step backwards. The stored order is not changed.
    pub fn sorted_for_display(&self) -> Vec<&Expense> {
        let mut view: Vec<&Expense> = self.expenses.iter().collect();
        view.sort_by(|a, b| {
            b.date()
                .cmp(&a.date())
                .then_with(|| b.sequence().cmp(&a.sequence()))
        });
        view
    }

    /// Count, total, average, extremes and today's subset
    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.expenses, self.clock.today())
    }

    /// Point-in-time copy of the ledger for external inspection
    pub fn export(&self) -> Snapshot {
        Snapshot::new(
            self.expenses.clone(),
            self.statistics(),
            self.clock.now(),
        )
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    /// Resolve user input to an expense
    ///
    /// Accepts a full UUID, the `exp-xxxxxxxx` display form, or any prefix
    /// that matches exactly one expense.
    pub fn find(&self, identifier: &str) -> LedgerResult<&Expense> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self
                .get(id)
                .ok_or_else(|| LedgerError::expense_not_found(identifier));
        }

        let mut matches = self.expenses.iter().filter(|e| e.id().matches_prefix(identifier));
        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(expense),
            (Some(_), Some(_)) => Err(LedgerError::Ambiguous {
                identifier: identifier.trim().to_string(),
            }),
            (None, _) => Err(LedgerError::expense_not_found(identifier.trim())),
        }
    }

    /// Expenses in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Calendar day the ledger considers "today"
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub fn limits(&self) -> &ValidationLimits {
        self.validator.limits()
    }

    /// Register an observer for successful mutations
    pub fn subscribe(&mut self, observer: impl LedgerObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns false if it was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self, event: &LedgerEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer.on_change(event);
        }
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("expenses", &self.expenses)
            .field("limits", self.validator.limits())
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::FixedClock;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn yesterday() -> NaiveDate {
        today().pred_opt().unwrap()
    }

    fn tomorrow() -> NaiveDate {
        today().succ_opt().unwrap()
    }

    fn ledger() -> Ledger {
        Ledger::with_clock(ValidationLimits::default(), FixedClock::new(today()))
    }

    fn descriptions(ledger: &Ledger) -> Vec<&str> {
        ledger
            .sorted_for_display()
            .into_iter()
            .map(Expense::description)
            .collect()
    }

    #[test]
    fn test_add_single_coffee() {
        let mut ledger = ledger();
        let coffee = ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();

        assert_eq!(coffee.amount(), Money::from_cents(450));
        assert_eq!(ledger.total(), Money::from_cents(450));

        let stats = ledger.statistics();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.average, Money::from_cents(450));
    }

    #[test]
    fn test_same_day_later_insertion_first() {
        let mut ledger = ledger();
        ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();
        ledger.add(ExpenseDraft::new("Lunch", 12.00, today())).unwrap();

        assert_eq!(ledger.total(), Money::from_cents(1650));
        assert_eq!(descriptions(&ledger), vec!["Lunch", "Coffee"]);
    }

    /// Clock whose instant moves five seconds backwards on every read
    struct RewindingClock {
        today: NaiveDate,
        now: std::cell::Cell<chrono::DateTime<chrono::Utc>>,
    }

    impl Clock for RewindingClock {
        fn now(&self) -> chrono::DateTime<chrono::Utc> {
            let now = self.now.get();
            self.now.set(now - chrono::Duration::seconds(5));
            now
        }

        fn today(&self) -> NaiveDate {
            self.today
        }
    }

    #[test]
    fn test_same_day_order_survives_clock_stepping_back() {
        let clock = RewindingClock {
            today: today(),
            now: std::cell::Cell::new(today().and_hms_opt(18, 0, 0).unwrap().and_utc()),
        };
        let mut ledger = Ledger::with_clock(ValidationLimits::default(), clock);
        let coffee = ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();
        let lunch = ledger.add(ExpenseDraft::new("Lunch", 12.00, today())).unwrap();

        assert!(lunch.created_at() < coffee.created_at());
        assert_eq!(descriptions(&ledger), vec!["Lunch", "Coffee"]);
    }

    #[test]
    fn test_date_descending() {
        let mut ledger = ledger();
        ledger.add(ExpenseDraft::new("Rent", 1200.0, yesterday())).unwrap();
        ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();

        assert_eq!(descriptions(&ledger), vec!["Coffee", "Rent"]);
    }

    #[test]
    fn test_sorting_does_not_mutate_storage() {
        let mut ledger = ledger();
        ledger.add(ExpenseDraft::new("Rent", 1200.0, yesterday())).unwrap();
        ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();

        let _ = ledger.sorted_for_display();
        let stored: Vec<&str> = ledger.iter().map(Expense::description).collect();
        assert_eq!(stored, vec!["Rent", "Coffee"]);
    }

    #[test]
    fn test_future_date_rejected() {
        let mut ledger = ledger();
        let result = ledger.add(ExpenseDraft::new("Concert", 50.0, tomorrow()));

        assert_eq!(result, Err(RejectionReason::FutureDate));
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), Money::zero());
    }

    #[test]
    fn test_added_record_appears_once() {
        let mut ledger = ledger();
        ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();
        let added = ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();

        let hits = ledger
            .sorted_for_display()
            .into_iter()
            .filter(|e| e.id() == added.id())
            .count();
        assert_eq!(hits, 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_delete_returns_record() {
        let mut ledger = ledger();
        let coffee = ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();
        ledger.add(ExpenseDraft::new("Lunch", 12.00, today())).unwrap();

        let removed = ledger.delete(coffee.id()).unwrap();
        assert_eq!(removed, coffee);
        assert_eq!(ledger.total(), Money::from_cents(1200));
        assert!(ledger.get(coffee.id()).is_none());
    }

    #[test]
    fn test_delete_missing_leaves_ledger_unchanged() {
        let mut ledger = ledger();
        ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();

        let err = ledger.delete(ExpenseId::new()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total(), Money::from_cents(450));

        // Deleting twice reports the second one
        let id = ledger.iter().next().unwrap().id();
        ledger.delete(id).unwrap();
        assert!(ledger.delete(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_clear() {
        let mut ledger = ledger();
        ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();
        ledger.add(ExpenseDraft::new("Rent", 1200.0, yesterday())).unwrap();

        assert_eq!(ledger.clear(), 2);
        assert_eq!(ledger.total(), Money::zero());
        assert!(ledger.sorted_for_display().is_empty());
        assert_eq!(ledger.clear(), 0);
    }

    #[test]
    fn test_total_tracks_any_sequence() {
        let mut ledger = ledger();
        let mut ids = Vec::new();
        for (i, amount) in [4.5, 12.0, 0.99, 250.0, 33.33].into_iter().enumerate() {
            let e = ledger
                .add(ExpenseDraft::new(format!("item {i}"), amount, today()))
                .unwrap();
            ids.push(e.id());
        }
        ledger.delete(ids[1]).unwrap();
        ledger.delete(ids[3]).unwrap();
        ledger.add(ExpenseDraft::new("late", 7.01, yesterday())).unwrap();

        let expected: i64 = ledger.iter().map(|e| e.amount().cents()).sum();
        assert_eq!(ledger.total().cents(), expected);
        assert_eq!(ledger.total(), Money::from_cents(450 + 99 + 3333 + 701));
        assert_eq!(ledger.statistics().total, ledger.total());
    }

    #[test]
    fn test_statistics_today_follows_clock() {
        let clock = Rc::new(FixedClock::new(today()));
        let mut ledger = Ledger::with_clock(ValidationLimits::default(), Rc::clone(&clock));
        ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();
        ledger.add(ExpenseDraft::new("Rent", 1200.0, yesterday())).unwrap();

        let stats = ledger.statistics();
        assert_eq!(stats.today_count, 1);
        assert_eq!(stats.today_total, Money::from_cents(450));

        clock.set_today(tomorrow());
        assert_eq!(ledger.statistics().today_count, 0);
        assert_eq!(ledger.statistics().count, 2);
    }

    #[test]
    fn test_observers_see_successful_mutations_only() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut ledger = ledger();
        let sink = Rc::clone(&events);
        ledger.subscribe(move |event: &LedgerEvent| sink.borrow_mut().push(event.kind()));

        let coffee = ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();
        let _ = ledger.add(ExpenseDraft::new("", 4.50, today()));
        let _ = ledger.delete(ExpenseId::new());
        ledger.delete(coffee.id()).unwrap();
        ledger.clear();

        assert_eq!(*events.borrow(), vec!["added", "deleted", "cleared"]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut ledger = ledger();
        let sink = Rc::clone(&count);
        let id = ledger.subscribe(move |_: &LedgerEvent| *sink.borrow_mut() += 1);

        ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();
        assert!(ledger.unsubscribe(id));
        assert!(!ledger.unsubscribe(id));
        ledger.add(ExpenseDraft::new("Lunch", 12.0, today())).unwrap();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_find_by_prefix() {
        let mut ledger = ledger();
        let coffee = ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();

        let display = coffee.id().to_string();
        assert_eq!(ledger.find(&display).unwrap().id(), coffee.id());
        assert_eq!(
            ledger.find(&coffee.id().as_uuid().to_string()).unwrap().id(),
            coffee.id()
        );
        assert!(ledger.find("exp-zzzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_export_snapshot() {
        let mut ledger = ledger();
        ledger.add(ExpenseDraft::new("Coffee", 4.50, today())).unwrap();

        let snapshot = ledger.export();
        assert_eq!(snapshot.expenses.len(), 1);
        assert_eq!(snapshot.statistics.total, Money::from_cents(450));
        assert_eq!(ledger.len(), 1);
    }
}
