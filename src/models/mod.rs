//! Core data models for the expense ledger

pub mod expense;
pub mod ids;
pub mod money;

pub use expense::{Expense, ExpenseDraft, INPUT_DATE_FORMAT};
pub use ids::ExpenseId;
pub use money::Money;
