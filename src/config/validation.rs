//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Backend URL must parse and use http or https
//! - Value ranges (timeouts > 0, notice durations > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::AppConfig;

/// One semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Check a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let backend = &config.backend;

    match Url::parse(&backend.base_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::new(
                "backend.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(url) if url.cannot_be_a_base() => {
            errors.push(ValidationError::new("backend.base_url", "cannot be used as a base URL"));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::new("backend.base_url", e.to_string())),
    }

    if backend.resource.trim().is_empty() {
        errors.push(ValidationError::new("backend.resource", "must not be empty"));
    } else if backend.resource.contains('/') {
        errors.push(ValidationError::new("backend.resource", "must be a single path segment"));
    }

    if backend.request_timeout_secs == 0 {
        errors.push(ValidationError::new("backend.request_timeout_secs", "must be greater than 0"));
    }

    for (name, ms) in config.notifications.durations() {
        if ms == 0 {
            errors.push(ValidationError::new(
                format!("notifications.{}", name),
                "must be greater than 0",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
