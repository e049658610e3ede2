//! Periodic statistics logging
//!
//! Polled from the adapter's tick. It only ever sees `&Ledger`, so it
//! cannot change the ledger it reports on.

use std::time::{Duration, Instant};

use super::ledger::Ledger;
use super::statistics::Statistics;

/// Emits a statistics log line at most once per interval
#[derive(Debug, Clone)]
pub struct StatsReporter {
    interval: Duration,
    last_report: Instant,
    reports: u64,
}

impl StatsReporter {
    /// Create a reporter whose first report is due one interval after `start`
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last_report: start,
            reports: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of reports emitted so far
    pub fn reports(&self) -> u64 {
        self.reports
    }

    /// Whether a report is due at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_report) >= self.interval
    }

    /// Log statistics if the interval has elapsed, returning what was logged
    pub fn poll(&mut self, now: Instant, ledger: &Ledger) -> Option<Statistics> {
        if !self.is_due(now) {
            return None;
        }
        self.last_report = now;
        self.reports += 1;

        let stats = ledger.statistics();
        tracing::info!(
            count = stats.count,
            total = %stats.total,
            average = %stats.average,
            max = %stats.max,
            min = %stats.min,
            today_count = stats.today_count,
            today_total = %stats.today_total,
            "expense statistics"
        );
        Some(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseDraft, Money};
    use crate::services::clock::FixedClock;
    use crate::services::validator::ValidationLimits;
    use chrono::NaiveDate;

    #[test]
    fn test_reports_once_per_interval() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut ledger = Ledger::with_clock(ValidationLimits::default(), FixedClock::new(today));
        ledger.add(ExpenseDraft::new("Coffee", 4.5, today)).unwrap();

        let start = Instant::now();
        let mut reporter = StatsReporter::new(Duration::from_secs(30), start);

        assert!(reporter.poll(start + Duration::from_secs(10), &ledger).is_none());

        let stats = reporter.poll(start + Duration::from_secs(30), &ledger).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.total, Money::from_cents(450));

        assert!(reporter.poll(start + Duration::from_secs(45), &ledger).is_none());
        assert!(reporter.poll(start + Duration::from_secs(60), &ledger).is_some());
        assert_eq!(reporter.reports(), 2);
        assert_eq!(ledger.len(), 1);
    }
}
