//! Domain types for client records.
//!
//! # Design Decisions
//! - `Cliente` serializes as the flat JSON object the backend stores
//! - The id is optional: records built locally have none until the backend assigns one
//! - `ClientField` names every editable field so forms can be indexed without strings

pub mod client;

pub use client::{ClientField, ClientFields, ClientId, Cliente, Sexo};
