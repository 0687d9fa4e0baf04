//! Field validation and input sanitization.
//!
//! # Responsibilities
//! - One pure rule per client field (rules.rs)
//! - Per-field input clean-up applied while editing rows (sanitize.rs)
//!
//! # Design Decisions
//! - Both forms call the same functions, so creation and edit accept exactly the same records
//! - Rules never touch the network and never hold state
//! - Sanitizers are idempotent: running them twice changes nothing

pub mod rules;
pub mod sanitize;

pub use rules::{validate, validate_fields, ErrorKind, FieldError};
pub use sanitize::{keep_digits, sanitize, strip_digits};
