//! Form models.
//!
//! # Data Flow
//! ```text
//! user input
//!     → fields.rs (value, touched, dirty per field)
//!     → validation rules (computed on read, never cached)
//!     → creation.rs submit  → repository.create
//!     → edit_session.rs commit → repository.update
//! ```
//!
//! # Design Decisions
//! - Errors are only shown for touched fields; submit/commit touch everything first
//! - Nothing reaches the repository while any field is invalid
//! - The edit session is a tagged enum, so a working copy without a field model cannot exist

pub mod creation;
pub mod edit_session;
pub mod fields;

pub use creation::{CreationForm, SubmitOutcome};
pub use edit_session::{CommitOutcome, EditSession, PendingCommit};
pub use fields::FieldSet;
