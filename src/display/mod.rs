//! Display formatting for terminal output
//!
//! Date labels shared by both front ends, and plain-text tables for the shell.

pub mod date;
pub mod expense;

pub use date::{date_label, long_date, DEFAULT_LONG_DATE_FORMAT};
pub use expense::{format_expense_short, format_expense_table, format_statistics, truncate};
