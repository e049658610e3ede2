//! JSON snapshot export
//!
//! A snapshot is a read-only copy of the session: expenses in insertion
//! order, their statistics, and the instant it was taken.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;
use crate::services::Statistics;

/// Current snapshot schema version
pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.0.0";

/// Point-in-time copy of a ledger
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Schema version for consumers
    pub schema_version: String,

    /// Application version that produced the snapshot
    pub app_version: String,

    /// When the snapshot was taken
    pub exported_at: DateTime<Utc>,

    /// All expenses, in the order they were added
    pub expenses: Vec<Expense>,

    /// Statistics at the time of export
    pub statistics: Statistics,
}

impl Snapshot {
    pub fn new(expenses: Vec<Expense>, statistics: Statistics, exported_at: DateTime<Utc>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at,
            expenses,
            statistics,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write a snapshot as pretty JSON followed by a newline
pub fn export_snapshot_json<W: Write>(snapshot: &Snapshot, writer: &mut W) -> LedgerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, snapshot)?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseDraft, Money};
    use crate::services::{FixedClock, Ledger, ValidationLimits};
    use chrono::NaiveDate;

    fn ledger_with_two() -> Ledger {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut ledger = Ledger::with_clock(ValidationLimits::default(), FixedClock::new(today));
        ledger.add(ExpenseDraft::new("Coffee", 4.5, today)).unwrap();
        ledger
            .add(ExpenseDraft::new("Rent", 1200.0, today.pred_opt().unwrap()))
            .unwrap();
        ledger
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = ledger_with_two().export();
        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();

        assert_eq!(value["schema_version"], SNAPSHOT_SCHEMA_VERSION);
        assert_eq!(value["expenses"].as_array().unwrap().len(), 2);
        assert_eq!(value["expenses"][0]["description"], "Coffee");
        assert_eq!(value["statistics"]["count"], 2);
        assert_eq!(value["statistics"]["total"], 120_450);
        assert!(value["exported_at"].as_str().unwrap().starts_with("2025-03-14"));
    }

    #[test]
    fn test_export_to_writer() {
        let snapshot = ledger_with_two().export();
        let mut output = Vec::new();
        export_snapshot_json(&snapshot, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"Rent\""));
        assert_eq!(snapshot.statistics.max, Money::from_cents(120_000));
    }
}
