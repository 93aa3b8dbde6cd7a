//! Repository implementations
//!
//! Each repository implements one domain port over the shared connection
//! pool. Row structs live next to the repository that owns them.

pub mod catalog;
pub mod reconciliation;
