//! Change notification for ledger subscribers
//!
//! Presentation layers subscribe to re-render after a successful mutation.
//! Observers are called synchronously, after the change is applied, and
//! never for a rejected add or a failed delete.

use serde::Serialize;

use crate::models::Expense;

/// A successful mutation of the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// An expense was appended
    Added(Expense),
    /// An expense was removed
    Deleted(Expense),
    /// The ledger was emptied
    Cleared { removed: usize },
}

impl LedgerEvent {
    /// Short lowercase name, used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Added(_) => "added",
            Self::Deleted(_) => "deleted",
            Self::Cleared { .. } => "cleared",
        }
    }
}

/// Receives [`LedgerEvent`]s
pub trait LedgerObserver {
    fn on_change(&mut self, event: &LedgerEvent);
}

impl<F> LedgerObserver for F
where
    F: FnMut(&LedgerEvent),
{
    fn on_change(&mut self, event: &LedgerEvent) {
        self(event)
    }
}

/// Handle returned by `Ledger::subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |event: &LedgerEvent| seen.push(event.kind());
            observer.on_change(&LedgerEvent::Cleared { removed: 2 });
        }
        assert_eq!(seen, vec!["cleared"]);
    }

    #[test]
    fn test_cleared_event_serialization() {
        let json = serde_json::to_value(LedgerEvent::Cleared { removed: 3 }).unwrap();
        assert_eq!(json["event"], "cleared");
        assert_eq!(json["removed"], 3);
    }
}
