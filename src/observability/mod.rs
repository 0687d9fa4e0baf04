//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (ids, generations, request ids)
//!
//! Consumers:
//!     → logging.rs fmt layer on stderr
//! ```
//!
//! # Design Decisions
//! - Request ID flows from each backend call into its log lines
//! - Failures are logged where they happen and again surfaced as notices

pub mod logging;
