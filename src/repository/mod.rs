//! Record repository subsystem.
//!
//! # Data Flow
//! ```text
//! create / update / delete
//!     → backend.rs (POST / PUT / DELETE)
//!     → on success: reload.rs pulse
//!     → feed.rs task refetches (GET)
//!     → new Snapshot published to every ClientFeed
//! ```
//!
//! # Design Decisions
//! - The list is never patched locally; a pulse and a refetch is the only way it changes
//! - One feed task per repository, started on the first `list()` call, shared by all subscribers
//! - Update and delete refuse to send a request when the id is missing
//! - Failed mutations never pulse

pub mod backend;
pub mod error;
pub mod feed;
pub mod reload;

#[cfg(test)]
pub(crate) mod memory;

use std::sync::{Arc, OnceLock};
use tokio::sync::watch;

use crate::domain::{ClientFields, ClientId, Cliente};

pub use backend::{ClientBackend, HttpBackend};
pub use error::{RepositoryError, RepositoryResult, TransportError};
pub use feed::{ClientFeed, LoadFailure, Snapshot};
pub use reload::ReloadBus;

/// Data access for client records plus the live list feed.
///
/// Cheap to clone; clones share the backend, the reload bus and the feed.
#[derive(Clone)]
pub struct ClientRepository {
    inner: Arc<Inner>,
}

type FeedReceivers = (watch::Receiver<Option<Snapshot>>, watch::Receiver<Option<LoadFailure>>);

struct Inner {
    backend: Arc<dyn ClientBackend>,
    reload: ReloadBus,
    feed: OnceLock<FeedReceivers>,
}

impl ClientRepository {
    /// Create a repository publishing reloads on `reload`.
    pub fn new(backend: Arc<dyn ClientBackend>, reload: ReloadBus) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                reload,
                feed: OnceLock::new(),
            }),
        }
    }

    /// The reload bus this repository pulses.
    pub fn reload_bus(&self) -> &ReloadBus {
        &self.inner.reload
    }

    /// Subscribe to the live list.
    ///
    /// The first call spawns the feed task, so it must run inside a Tokio
    /// runtime. Later calls share that task.
    pub fn list(&self) -> ClientFeed {
        let (rx, failures) = self.inner.feed.get_or_init(|| {
            let (tx, rx) = watch::channel(None);
            let (failure_tx, failures) = watch::channel(None);
            let pulses = self.inner.reload.subscribe();
            tokio::spawn(feed::run_feed(self.inner.backend.clone(), pulses, tx, failure_tx));
            tracing::debug!("Client list feed started");
            (rx, failures)
        });
        ClientFeed::new(rx.clone(), failures.clone())
    }

    /// Create a record. Pulses reload on success.
    pub async fn create(&self, fields: ClientFields) -> RepositoryResult<Cliente> {
        let created = self.inner.backend.insert(&fields).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create client");
            e
        })?;
        tracing::info!(id = ?created.id, "Client created");
        self.inner.reload.pulse();
        Ok(created)
    }

    /// Replace a stored record. Pulses reload on success.
    pub async fn update(&self, record: Cliente) -> RepositoryResult<Cliente> {
        let id = record
            .usable_id()
            .cloned()
            .ok_or(RepositoryError::MissingIdentifier)?;

        let updated = self.inner.backend.replace(&id, &record).await.map_err(|e| {
            tracing::error!(%id, error = %e, "Failed to update client");
            e
        })?;
        tracing::info!(%id, "Client updated");
        self.inner.reload.pulse();
        Ok(updated)
    }

    /// Delete a stored record. Pulses reload on success.
    pub async fn delete(&self, id: Option<&ClientId>) -> RepositoryResult<()> {
        let id = id
            .filter(|id| id.is_usable())
            .ok_or(RepositoryError::MissingIdentifier)?;

        self.inner.backend.remove(id).await.map_err(|e| {
            tracing::error!(%id, error = %e, "Failed to delete client");
            e
        })?;
        tracing::info!(%id, "Client deleted");
        self.inner.reload.pulse();
        Ok(())
    }
}
