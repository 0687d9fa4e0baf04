//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the HTTP backend from validated configuration
//! - Wire the reload bus into the repository
//! - Hand out controllers sharing one repository and one notice slot
//!
//! # Design Decisions
//! - Fail fast: an unusable backend configuration is fatal
//! - Subsystems initialize in dependency order, leaves first

use std::sync::Arc;

use crate::config::AppConfig;
use crate::forms::CreationForm;
use crate::notifications::Notifier;
use crate::repository::{ClientRepository, HttpBackend, ReloadBus, TransportError};
use crate::views::ClientListView;

/// Shared services of one process.
#[derive(Clone)]
pub struct Services {
    pub repository: ClientRepository,
    pub notifier: Notifier,
    config: AppConfig,
}

impl Services {
    /// Wire everything against the configured HTTP backend.
    pub fn from_config(config: AppConfig) -> Result<Self, TransportError> {
        let backend = HttpBackend::new(&config.backend)?;
        let repository = ClientRepository::new(Arc::new(backend), ReloadBus::new());

        tracing::info!(
            base_url = %config.backend.base_url,
            resource = %config.backend.resource,
            "Services initialized"
        );

        Ok(Self {
            repository,
            notifier: Notifier::new(),
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The "new client" form.
    pub fn creation_form(&self) -> CreationForm {
        CreationForm::new(
            self.repository.clone(),
            self.notifier.clone(),
            self.config.notifications.clone(),
        )
    }

    /// The client list. Starts the list feed if nothing else has.
    pub fn list_view(&self) -> ClientListView {
        ClientListView::new(
            self.repository.clone(),
            self.notifier.clone(),
            self.config.notifications.clone(),
        )
    }
}
