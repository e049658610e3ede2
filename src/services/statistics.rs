//! Derived statistics over the current expenses
//!
//! Always computed from the records on demand; nothing here is cached.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Expense, Money};

/// Summary numbers for a set of expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Statistics {
    pub count: usize,
    pub total: Money,
    /// `total / count`, zero when there are no expenses
    pub average: Money,
    /// Largest amount, zero when there are no expenses
    pub max: Money,
    /// Smallest amount, zero when there are no expenses
    pub min: Money,
    /// Number of expenses dated today
    pub today_count: usize,
    /// Sum of expenses dated today
    pub today_total: Money,
}

impl Statistics {
    /// Compute statistics for `expenses` as of the calendar day `today`
    pub fn compute<'a, I>(expenses: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut stats = Statistics::default();
        let mut max: Option<Money> = None;
        let mut min: Option<Money> = None;

        for expense in expenses {
            let amount = expense.amount();
            stats.count += 1;
            stats.total += amount;
            max = Some(max.map_or(amount, |m| m.max(amount)));
            min = Some(min.map_or(amount, |m| m.min(amount)));

            if expense.date() == today {
                stats.today_count += 1;
                stats.today_total += amount;
            }
        }

        stats.average = Money::average(stats.total, stats.count);
        stats.max = max.unwrap_or_default();
        stats.min = min.unwrap_or_default();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn expense(cents: i64, date: NaiveDate) -> Expense {
        Expense::new("x".into(), Money::from_cents(cents), date, Utc::now(), 0)
    }

    #[test]
    fn test_empty() {
        let none: Vec<Expense> = Vec::new();
        let stats = Statistics::compute(&none, day(14));
        assert_eq!(stats, Statistics::default());
        assert_eq!(stats.average, Money::zero());
        assert_eq!(stats.max, Money::zero());
        assert_eq!(stats.min, Money::zero());
    }

    #[test]
    fn test_mixed_days() {
        let expenses = vec![
            expense(450, day(14)),
            expense(1200, day(14)),
            expense(120_000, day(13)),
        ];
        let stats = Statistics::compute(&expenses, day(14));

        assert_eq!(stats.count, 3);
        assert_eq!(stats.total, Money::from_cents(121_650));
        assert_eq!(stats.average, Money::from_cents(40_550));
        assert_eq!(stats.max, Money::from_cents(120_000));
        assert_eq!(stats.min, Money::from_cents(450));
        assert_eq!(stats.today_count, 2);
        assert_eq!(stats.today_total, Money::from_cents(1650));
    }

    #[test]
    fn test_nothing_today() {
        let expenses = vec![expense(500, day(10))];
        let stats = Statistics::compute(&expenses, day(14));
        assert_eq!(stats.today_count, 0);
        assert_eq!(stats.today_total, Money::zero());
        assert_eq!(stats.min, stats.max);
    }
}
