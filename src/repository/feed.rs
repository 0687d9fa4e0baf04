//! Live list feed driven by reload pulses.

use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::Cliente;
use crate::repository::backend::ClientBackend;

/// One emission of the feed: the full collection as of a reload generation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub generation: u64,
    pub clients: Arc<Vec<Cliente>>,
}

/// A list load that failed. The previous snapshot stays published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub generation: u64,
    pub message: String,
}

/// Subscriber handle onto the shared list feed.
///
/// Every handle observes the same emissions; none of them triggers a fetch
/// on its own.
#[derive(Debug, Clone)]
pub struct ClientFeed {
    rx: watch::Receiver<Option<Snapshot>>,
    failures: watch::Receiver<Option<LoadFailure>>,
}

impl ClientFeed {
    pub(crate) fn new(
        rx: watch::Receiver<Option<Snapshot>>,
        failures: watch::Receiver<Option<LoadFailure>>,
    ) -> Self {
        Self { rx, failures }
    }

    /// Failure of the most recent fetch. Cleared by the next successful load.
    pub fn last_failure(&self) -> Option<LoadFailure> {
        self.failures.borrow().clone()
    }

    /// Every change of the failure slot, for views that report it.
    pub fn failures(&self) -> watch::Receiver<Option<LoadFailure>> {
        self.failures.clone()
    }

    /// Latest emission, if the first load finished.
    pub fn latest(&self) -> Option<Snapshot> {
        self.rx.borrow().clone()
    }

    /// Wait for an emission this handle has not seen yet.
    ///
    /// Returns `None` once the feed task has stopped.
    pub async fn next(&mut self) -> Option<Snapshot> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(snapshot) = self.rx.borrow_and_update().clone() {
                return Some(snapshot);
            }
        }
    }

    /// Wait until an emission at or after `generation` is available.
    pub async fn wait_for(&mut self, generation: u64) -> Option<Snapshot> {
        if let Some(snapshot) = self.latest().filter(|s| s.generation >= generation) {
            return Some(snapshot);
        }
        loop {
            let snapshot = self.next().await?;
            if snapshot.generation >= generation {
                return Some(snapshot);
            }
        }
    }
}

/// Fetch the collection on every pulse and publish it.
///
/// A pulse arriving while a fetch is in flight drops that fetch and starts
/// over, so an older collection never replaces a newer one. A failed fetch
/// is published on `failures` and leaves the last snapshot in place. The
/// task ends once every handle on the reload bus is gone.
pub(crate) async fn run_feed(
    backend: Arc<dyn ClientBackend>,
    mut pulses: watch::Receiver<u64>,
    out: watch::Sender<Option<Snapshot>>,
    failures: watch::Sender<Option<LoadFailure>>,
) {
    loop {
        let generation = *pulses.borrow_and_update();

        tokio::select! {
            result = backend.fetch_all() => {
                match result {
                    Ok(clients) => {
                        tracing::debug!(generation, count = clients.len(), "Client list loaded");
                        failures.send_if_modified(|slot| slot.take().is_some());
                        out.send_replace(Some(Snapshot {
                            generation,
                            clients: Arc::new(clients),
                        }));
                    }
                    Err(e) => {
                        tracing::error!(generation, error = %e, "Failed to load client list. Keeping previous list.");
                        failures.send_replace(Some(LoadFailure {
                            generation,
                            message: e.to_string(),
                        }));
                    }
                }
                if pulses.changed().await.is_err() {
                    break;
                }
            }
            changed = pulses.changed() => {
                if changed.is_err() {
                    break;
                }
                tracing::debug!(generation, "Client list fetch superseded by newer pulse");
            }
        }
    }

    tracing::debug!("Client list feed stopped");
}
