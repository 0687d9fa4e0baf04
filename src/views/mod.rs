//! View controllers consumed by a presentation layer.
//!
//! # Responsibilities
//! - Compose the repository feed with the edit session for the client list
//! - Ask the user before destructive actions (confirm.rs)
//!
//! # Design Decisions
//! - Controllers expose read-only predicates; the presentation layer never mutates state directly
//! - No polling: rows change only when the repository publishes a new snapshot

pub mod confirm;
pub mod list;

pub use confirm::Confirm;
pub use list::{ClientListView, DeleteOutcome};
