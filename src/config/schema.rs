//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.
//! Every field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Where the client records resource lives.
    pub backend: BackendConfig,

    /// How long transient notices stay on screen.
    pub notifications: NotificationConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Backend resource configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the REST server (e.g., "http://localhost:3000").
    pub base_url: String,

    /// Collection name appended to the base URL.
    pub resource: String,

    /// Total time allowed for one request, in seconds.
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    /// `{base_url}/{resource}`.
    pub fn collection_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.resource);
        }
        Ok(url)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            resource: "clientes".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Time-to-live of each transient notice, in milliseconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub create_success_ms: u64,
    pub create_error_ms: u64,
    pub update_success_ms: u64,
    pub update_error_ms: u64,
    pub delete_success_ms: u64,
    pub delete_error_ms: u64,
    /// Shown when the client list cannot be loaded.
    pub list_error_ms: u64,
}

impl NotificationConfig {
    /// All durations, labelled, for validation and logging.
    pub fn durations(&self) -> [(&'static str, u64); 7] {
        [
            ("create_success_ms", self.create_success_ms),
            ("create_error_ms", self.create_error_ms),
            ("update_success_ms", self.update_success_ms),
            ("update_error_ms", self.update_error_ms),
            ("delete_success_ms", self.delete_success_ms),
            ("delete_error_ms", self.delete_error_ms),
            ("list_error_ms", self.list_error_ms),
        ]
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            create_success_ms: 3500,
            create_error_ms: 4000,
            update_success_ms: 3000,
            update_error_ms: 4000,
            delete_success_ms: 3000,
            delete_error_ms: 4000,
            list_error_ms: 4000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive. `RUST_LOG` takes precedence when set.
    pub log_filter: String,

    /// Colored output.
    pub ansi: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "client_records=info".to_string(),
            ansi: true,
        }
    }
}
