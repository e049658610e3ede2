//! Expense Ledger - single-session expense tracking for the terminal
//!
//! This library provides the core of the `expenses` application: a ledger
//! that validates and holds expenses for one session, derives the running
//! total, display order and statistics from them, and notifies subscribers
//! when it changes. Nothing is written to disk; when the session ends the
//! expenses are gone.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, money, IDs)
//! - `services`: Validation, the ledger, statistics and change notification
//! - `audit`: Structured log of every successful mutation
//! - `display`: Date labels and plain-text tables
//! - `export`: Read-only session snapshots (JSON, YAML)
//! - `cli`: Line-oriented shell
//! - `tui`: Full-screen terminal UI
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use expense_ledger::models::ExpenseDraft;
//! use expense_ledger::services::{FixedClock, Ledger, ValidationLimits};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//! let mut ledger = Ledger::with_clock(ValidationLimits::default(), FixedClock::new(today));
//!
//! ledger.add(ExpenseDraft::new("Coffee", 4.50, today)).unwrap();
//! ledger.add(ExpenseDraft::new("Lunch", 12.00, today)).unwrap();
//! assert_eq!(ledger.total().to_string(), "$16.50");
//!
//! let rejected = ledger.add(ExpenseDraft::new("", 3.00, today));
//! assert!(rejected.is_err());
//! assert_eq!(ledger.len(), 2);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod tui;

pub use error::{LedgerError, LedgerResult};
