//! Audit logging for the expense ledger
//!
//! Records every successful add, delete and clear as a structured log event.
//! Nothing is persisted by the audit system itself; where log lines end up
//! is decided by the subscriber installed in `main`.
//!
//! # Example
//!
//! ```rust
//! use expense_ledger::audit::{AuditLogger, DEFAULT_HISTORY_CAPACITY};
//! use expense_ledger::services::{Ledger, ValidationLimits};
//!
//! let mut ledger = Ledger::new(ValidationLimits::default());
//! let (logger, history) = AuditLogger::new(DEFAULT_HISTORY_CAPACITY);
//! ledger.subscribe(logger);
//! assert!(history.is_empty());
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::{AuditHistory, AuditLogger, DEFAULT_HISTORY_CAPACITY};
