//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{ExpenseId, Money};
use crate::services::LedgerEvent;

/// Types of operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// An expense was added
    Create,
    /// An expense was deleted
    Delete,
    /// The whole ledger was cleared
    Clear,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Clear => write!(f, "CLEAR"),
        }
    }
}

/// A single audited mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    /// When the mutation was observed (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// The affected expense, absent for `Clear`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<ExpenseId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    /// Number of expenses removed by a `Clear`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<usize>,
}

impl AuditEntry {
    /// Build an entry describing a ledger event
    pub fn from_event(event: &LedgerEvent, timestamp: DateTime<Utc>) -> Self {
        let (operation, expense, removed) = match event {
            LedgerEvent::Added(expense) => (Operation::Create, Some(expense), None),
            LedgerEvent::Deleted(expense) => (Operation::Delete, Some(expense), None),
            LedgerEvent::Cleared { removed } => (Operation::Clear, None, Some(*removed)),
        };

        Self {
            timestamp,
            operation,
            expense_id: expense.map(|e| e.id()),
            description: expense.map(|e| e.description().to_string()),
            amount: expense.map(|e| e.amount()),
            removed,
        }
    }

    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        match (self.operation, self.expense_id, &self.description, self.amount) {
            (Operation::Clear, _, _, _) => {
                format!("CLEAR {} expense(s)", self.removed.unwrap_or_default())
            }
            (op, Some(id), Some(description), Some(amount)) => {
                format!("{} {} \"{}\" {}", op, id, description, amount)
            }
            (op, _, _, _) => op.to_string(),
        }
    }
}
