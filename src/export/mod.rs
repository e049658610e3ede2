//! Snapshot export
//!
//! Renders a [`Snapshot`] of the ledger for inspection:
//! - JSON: machine-readable
//! - YAML: human-readable
//!
//! Both write to any `Write`; choosing a destination is up to the caller.

pub mod json;
pub mod yaml;

pub use json::{export_snapshot_json, Snapshot, SNAPSHOT_SCHEMA_VERSION};
pub use yaml::export_snapshot_yaml;
