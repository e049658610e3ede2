//! Time source for the ledger
//!
//! "Today" is always the local calendar day. Injecting the clock keeps the
//! future-date rule and the "today" statistics testable.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// Supplies the current instant and the current local calendar day
pub trait Clock {
    /// Current instant, used for creation timestamps
    fn now(&self) -> DateTime<Utc>;

    /// Current local calendar day
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the process's local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a given day, for tests and scripted sessions
///
/// `now()` reports noon UTC of the pinned day. The day can be moved with
/// [`FixedClock::set_today`]; share it through an `Rc` to keep a handle.
#[derive(Debug)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    /// Move the clock to another day
    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today
            .get()
            .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default())
            .and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let clock = FixedClock::new(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.now().date_naive(), day);

        let next = day.succ_opt().unwrap();
        clock.set_today(next);
        assert_eq!(clock.today(), next);
    }

    #[test]
    fn test_shared_fixed_clock() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let clock = Rc::new(FixedClock::new(day));
        let handle = Rc::clone(&clock);

        handle.set_today(day.pred_opt().unwrap());
        assert_eq!(Clock::today(&clock), day.pred_opt().unwrap());
    }
}
