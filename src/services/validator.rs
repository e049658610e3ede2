//! Expense validation
//!
//! A pure check of a candidate (description, amount, date) against the
//! configured limits and the current calendar day. Rules run in a fixed
//! order and the first failure is reported.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::models::{ExpenseDraft, Money};

/// Why a candidate expense was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
pub enum RejectionReason {
    #[error("Description is required")]
    EmptyDescription,

    #[error("Description is too long")]
    DescriptionTooLong,

    #[error("Amount must be a number greater than zero")]
    InvalidAmount,

    #[error("Amount is too large")]
    AmountTooLarge,

    #[error("Date is required (YYYY-MM-DD)")]
    MissingDate,

    #[error("Date cannot be in the future")]
    FutureDate,
}

/// Product thresholds applied by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    /// Maximum description length, in characters, after trimming
    pub max_description_len: usize,
    /// Largest accepted amount
    pub max_amount: Money,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_description_len: 100,
            max_amount: Money::from_cents(99_999_999),
        }
    }
}

/// A draft that passed every rule, normalized for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidExpense {
    /// Trimmed description
    pub description: String,
    /// Amount rounded to cents
    pub amount: Money,
    pub date: NaiveDate,
}

/// Checks candidate expenses against [`ValidationLimits`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    limits: ValidationLimits,
}

impl Validator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Validate a draft as of the calendar day `today`
    ///
    /// Amount rules are checked on the value rounded to cents, so anything
    /// that would be stored as `0.00` is an `InvalidAmount`.
    pub fn validate(
        &self,
        draft: &ExpenseDraft,
        today: NaiveDate,
    ) -> Result<ValidExpense, RejectionReason> {
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(RejectionReason::EmptyDescription);
        }
        if description.chars().count() > self.limits.max_description_len {
            return Err(RejectionReason::DescriptionTooLong);
        }

        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(RejectionReason::InvalidAmount);
        }
        // Finite and positive, so `None` only means it overflows cents
        let amount =
            Money::from_decimal(draft.amount).ok_or(RejectionReason::AmountTooLarge)?;
        if !amount.is_positive() {
            return Err(RejectionReason::InvalidAmount);
        }
        if amount > self.limits.max_amount {
            return Err(RejectionReason::AmountTooLarge);
        }

        let date = draft.date.ok_or(RejectionReason::MissingDate)?;
        if date > today {
            return Err(RejectionReason::FutureDate);
        }

        Ok(ValidExpense {
            description: description.to_string(),
            amount,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn draft(description: &str, amount: f64) -> ExpenseDraft {
        ExpenseDraft::new(description, amount, today())
    }

    fn check(draft: &ExpenseDraft) -> Result<ValidExpense, RejectionReason> {
        Validator::default().validate(draft, today())
    }

    #[test]
    fn test_accepts_valid_draft() {
        let valid = check(&draft("  Coffee  ", 4.5)).unwrap();
        assert_eq!(valid.description, "Coffee");
        assert_eq!(valid.amount, Money::from_cents(450));
        assert_eq!(valid.date, today());
    }

    #[test]
    fn test_empty_description() {
        assert_eq!(check(&draft("", 4.5)), Err(RejectionReason::EmptyDescription));
        assert_eq!(check(&draft(" \t\n", 4.5)), Err(RejectionReason::EmptyDescription));
    }

    #[test]
    fn test_description_length_boundary() {
        let exact = "a".repeat(100);
        assert!(check(&draft(&exact, 1.0)).is_ok());

        let over = "a".repeat(101);
        assert_eq!(check(&draft(&over, 1.0)), Err(RejectionReason::DescriptionTooLong));
    }

    #[test]
    fn test_description_length_counts_characters() {
        let accented = "é".repeat(100);
        assert!(check(&draft(&accented, 1.0)).is_ok());
    }

    #[test]
    fn test_description_measured_after_trim() {
        let padded = format!("  {}  ", "a".repeat(100));
        assert!(check(&draft(&padded, 1.0)).is_ok());
    }

    #[test]
    fn test_invalid_amounts() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.004] {
            assert_eq!(
                check(&draft("Coffee", amount)),
                Err(RejectionReason::InvalidAmount),
                "amount {amount}"
            );
        }
    }

    #[test]
    fn test_amount_boundary() {
        assert!(check(&draft("Laptop", 999_999.99)).is_ok());
        assert_eq!(
            check(&draft("Laptop", 1_000_000.00)),
            Err(RejectionReason::AmountTooLarge)
        );
        assert_eq!(check(&draft("Laptop", 1e300)), Err(RejectionReason::AmountTooLarge));
    }

    #[test]
    fn test_missing_date() {
        let mut d = draft("Coffee", 4.5);
        d.date = None;
        assert_eq!(check(&d), Err(RejectionReason::MissingDate));
    }

    #[test]
    fn test_future_date() {
        let tomorrow = today().succ_opt().unwrap();
        let d = ExpenseDraft::new("Coffee", 4.5, tomorrow);
        assert_eq!(check(&d), Err(RejectionReason::FutureDate));

        let yesterday = today().pred_opt().unwrap();
        assert!(check(&ExpenseDraft::new("Coffee", 4.5, yesterday)).is_ok());
    }

    #[test]
    fn test_first_failure_wins() {
        let d = ExpenseDraft {
            description: String::new(),
            amount: -1.0,
            date: None,
        };
        assert_eq!(check(&d), Err(RejectionReason::EmptyDescription));

        let d = ExpenseDraft {
            description: "Coffee".into(),
            amount: 0.0,
            date: None,
        };
        assert_eq!(check(&d), Err(RejectionReason::InvalidAmount));
    }

    #[test]
    fn test_custom_limits() {
        let validator = Validator::new(ValidationLimits {
            max_description_len: 5,
            max_amount: Money::from_cents(1000),
        });
        assert_eq!(
            validator.validate(&draft("Groceries", 1.0), today()),
            Err(RejectionReason::DescriptionTooLong)
        );
        assert_eq!(
            validator.validate(&draft("Milk", 10.01), today()),
            Err(RejectionReason::AmountTooLarge)
        );
        assert!(validator.validate(&draft("Milk", 10.0), today()).is_ok());
    }
}
