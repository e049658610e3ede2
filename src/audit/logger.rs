//! Audit logger observer
//!
//! Subscribed to the ledger, it turns every successful mutation into an
//! [`AuditEntry`], writes it to the log as a structured event and keeps the
//! most recent entries for the session's activity view.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::Utc;

use crate::services::{LedgerEvent, LedgerObserver};

use super::entry::AuditEntry;

/// Default number of entries kept in the activity history
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Read handle on the entries recorded by an [`AuditLogger`]
#[derive(Debug, Clone, Default)]
pub struct AuditHistory {
    entries: Rc<RefCell<VecDeque<AuditEntry>>>,
}

impl AuditHistory {
    /// Most recent entries, newest first
    pub fn recent(&self, count: usize) -> Vec<AuditEntry> {
        self.entries.borrow().iter().rev().take(count).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Ledger observer that logs each mutation
pub struct AuditLogger {
    history: AuditHistory,
    capacity: usize,
}

impl AuditLogger {
    /// Create a logger and the handle used to read its history
    pub fn new(capacity: usize) -> (Self, AuditHistory) {
        let history = AuditHistory::default();
        let logger = Self {
            history: history.clone(),
            capacity,
        };
        (logger, history)
    }

    fn record(&mut self, entry: AuditEntry) {
        let mut entries = self.history.entries.borrow_mut();
        entries.push_back(entry);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }
}

impl LedgerObserver for AuditLogger {
    fn on_change(&mut self, event: &LedgerEvent) {
        let entry = AuditEntry::from_event(event, Utc::now());

        match serde_json::to_string(&entry) {
            Ok(json) => tracing::info!(
                target: "expense_ledger::audit",
                operation = %entry.operation,
                entry = %json,
                "{}",
                entry.summary()
            ),
            Err(e) => tracing::warn!(
                target: "expense_ledger::audit",
                error = %e,
                "failed to serialize audit entry"
            ),
        }

        if self.capacity > 0 {
            self.record(entry);
        }
    }
}
