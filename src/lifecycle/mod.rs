//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → HTTP backend → Reload bus → Repository → Controllers
//!
//! Signals (signals.rs):
//!     SIGINT → stop long-running commands
//! ```

pub mod signals;
pub mod startup;

pub use startup::Services;
