//! Service layer for the expense ledger
//!
//! Validation, the ledger itself, its derived views and the hooks the
//! presentation layer uses to follow it.

pub mod clock;
pub mod ledger;
pub mod observer;
pub mod statistics;
pub mod stats_reporter;
pub mod validator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger::Ledger;
pub use observer::{LedgerEvent, LedgerObserver, SubscriptionId};
pub use statistics::Statistics;
pub use stats_reporter::StatsReporter;
pub use validator::{RejectionReason, ValidExpense, ValidationLimits, Validator};
