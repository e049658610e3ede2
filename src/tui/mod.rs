//! Terminal User Interface module
//!
//! Full-screen front end built on ratatui: the expense table, a statistics
//! panel, and dialogs for adding, deleting and clearing expenses.

pub mod app;
pub mod dialogs;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
