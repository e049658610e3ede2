//! Expense model
//!
//! An `Expense` is only ever built by the ledger from a validated draft, and
//! its fields cannot change afterwards: there are getters but no setters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::ids::ExpenseId;
use super::money::Money;

/// Date format accepted in form input
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expense {
    id: ExpenseId,
    description: String,
    amount: Money,
    date: NaiveDate,
    created_at: DateTime<Utc>,

    /// Insertion order within the ledger; breaks ties between equal timestamps
    #[serde(skip)]
    sequence: u64,
}

impl Expense {
    pub(crate) fn new(
        description: String,
        amount: Money,
        date: NaiveDate,
        created_at: DateTime<Utc>,
        sequence: u64,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            description,
            amount,
            date,
            created_at,
            sequence,
        }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Calendar day the expense happened on
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// When the expense was added to the ledger
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Candidate values for a new expense, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub date: Option<NaiveDate>,
}

impl ExpenseDraft {
    /// Create a draft from already-typed values
    pub fn new(description: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            amount,
            date: Some(date),
        }
    }

    /// Create a draft from raw form text
    ///
    /// Nothing is rejected here: an unreadable amount becomes NaN and an
    /// unreadable date becomes `None`, so the validator reports the reason.
    /// The words `today` and `yesterday` are accepted for the date.
    pub fn from_raw(description: &str, amount: &str, date: &str, today: NaiveDate) -> Self {
        Self {
            description: description.to_string(),
            amount: parse_amount(amount),
            date: parse_date(date, today),
        }
    }
}

fn parse_amount(input: &str) -> f64 {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim();
    match input.to_lowercase().as_str() {
        "" => None,
        "today" => Some(today),
        "yesterday" => today.pred_opt(),
        _ => NaiveDate::parse_from_str(input, INPUT_DATE_FORMAT).ok(),
    }
}
