//! Modal dialogs for the TUI

pub mod confirm;
pub mod expense;
pub mod help;
