//! Line-oriented front end
//!
//! A plain text shell over the ledger, for terminals without full-screen
//! support and for scripted sessions.

pub mod shell;

pub use shell::{ExportFormat, Shell, ShellCommand};
