//! YAML snapshot export
//!
//! Same content as the JSON snapshot, in a form that is easier to read.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::Snapshot;

/// Write a snapshot as YAML with a short header comment
pub fn export_snapshot_yaml<W: Write>(snapshot: &Snapshot, writer: &mut W) -> LedgerResult<()> {
    writeln!(writer, "# Expense ledger snapshot")
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# Taken: {}", snapshot.exported_at)
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, snapshot)?;

    Ok(())
}
