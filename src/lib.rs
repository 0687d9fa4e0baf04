//! Client record management engine.
//!
//! Forms, validation, inline row editing and a reload-on-mutation list feed
//! over a REST `/clientes` resource.

pub mod config;
pub mod domain;
pub mod forms;
pub mod lifecycle;
pub mod notifications;
pub mod observability;
pub mod repository;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use domain::{ClientField, ClientFields, ClientId, Cliente, Sexo};
pub use lifecycle::Services;
pub use repository::ClientRepository;
