//! Client list controller: rows, inline edit, delete.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::NotificationConfig;
use crate::domain::{ClientField, ClientId, Cliente};
use crate::forms::{CommitOutcome, EditSession};
use crate::notifications::{Notice, Notifier};
use crate::repository::{
    ClientFeed, ClientRepository, LoadFailure, RepositoryError, RepositoryResult, Snapshot,
};
use crate::views::confirm::Confirm;

/// Result of [`ClientListView::delete_row`].
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The user said no. Nothing was sent.
    Declined,
    Deleted,
    Failed(RepositoryError),
}

/// Marks a row as being deleted until dropped.
struct DeletingGuard(Arc<watch::Sender<Option<ClientId>>>);

impl DeletingGuard {
    fn mark(marker: &Arc<watch::Sender<Option<ClientId>>>, id: ClientId) -> Self {
        marker.send_replace(Some(id));
        Self(marker.clone())
    }
}

impl Drop for DeletingGuard {
    fn drop(&mut self) {
        self.0.send_replace(None);
    }
}

/// Turn list load failures into error notices until the feed stops.
async fn report_load_failures(
    mut failures: watch::Receiver<Option<LoadFailure>>,
    notifier: Notifier,
    ttl: Duration,
) {
    loop {
        let failure = failures.borrow_and_update().clone();
        if let Some(failure) = failure {
            notifier.error(format!("Could not load clients: {}", failure.message), ttl);
        }
        if failures.changed().await.is_err() {
            break;
        }
    }
}

/// Everything the list screen renders and every action it can take.
///
/// Failed list loads show up as error notices while the view is alive.
pub struct ClientListView {
    repository: ClientRepository,
    feed: ClientFeed,
    session: EditSession,
    deleting: Arc<watch::Sender<Option<ClientId>>>,
    notifier: Notifier,
    notices: NotificationConfig,
    failure_reporter: JoinHandle<()>,
}

impl ClientListView {
    /// Subscribe to the repository's list. Must run inside a Tokio runtime.
    pub fn new(repository: ClientRepository, notifier: Notifier, notices: NotificationConfig) -> Self {
        let feed = repository.list();
        let (deleting, _) = watch::channel(None);
        let failure_reporter = tokio::spawn(report_load_failures(
            feed.failures(),
            notifier.clone(),
            Duration::from_millis(notices.list_error_ms),
        ));
        Self {
            repository,
            feed,
            session: EditSession::new(),
            deleting: Arc::new(deleting),
            notifier,
            notices,
            failure_reporter,
        }
    }

    /// Failure of the latest list load, if it failed.
    pub fn load_failure(&self) -> Option<LoadFailure> {
        self.feed.last_failure()
    }

    /// Another handle on the rows feed, for renderers that redraw on change.
    pub fn feed(&self) -> ClientFeed {
        self.feed.clone()
    }

    /// Rows of the latest snapshot. Empty until the first load completes.
    pub fn rows(&self) -> Arc<Vec<Cliente>> {
        self.feed
            .latest()
            .map(|s| s.clients)
            .unwrap_or_default()
    }

    /// Wait for the next snapshot.
    pub async fn next_snapshot(&mut self) -> Option<Snapshot> {
        self.feed.next().await
    }

    /// Wait until the rows reflect at least `generation`.
    pub async fn wait_for(&mut self, generation: u64) -> Option<Snapshot> {
        self.feed.wait_for(generation).await
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn is_editing(&self, id: &ClientId) -> bool {
        self.session.editing_id() == Some(id)
    }

    pub fn is_deleting(&self, id: &ClientId) -> bool {
        self.deleting.borrow().as_ref() == Some(id)
    }

    pub fn deleting_id(&self) -> Option<ClientId> {
        self.deleting.borrow().clone()
    }

    pub fn subscribe_deleting(&self) -> watch::Receiver<Option<ClientId>> {
        self.deleting.subscribe()
    }

    /// Error text for a field of the row being edited.
    pub fn field_error(&self, field: ClientField) -> Option<&'static str> {
        self.session.field_error(field)
    }

    pub fn is_row_valid(&self) -> bool {
        self.session.is_row_valid()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notifier.current()
    }

    pub fn start_edit(&mut self, record: &Cliente) -> RepositoryResult<()> {
        self.session.start_edit(record)
    }

    pub fn cancel(&mut self) -> bool {
        self.session.cancel()
    }

    pub fn field_input(&mut self, field: ClientField, raw: &str) -> Option<&str> {
        self.session.on_field_input(field, raw)
    }

    /// Save the row being edited and report the result as a notice.
    pub async fn commit(&mut self) -> CommitOutcome {
        let outcome = self.session.commit(&self.repository).await;
        match &outcome {
            CommitOutcome::Committed(updated) | CommitOutcome::Superseded(Ok(updated)) => {
                self.notifier.success(
                    format!("Client {} updated", updated.fields.nombre),
                    Duration::from_millis(self.notices.update_success_ms),
                );
            }
            CommitOutcome::Failed(e) | CommitOutcome::Superseded(Err(e)) => {
                self.notifier.error(
                    format!("Could not update client: {}", e),
                    Duration::from_millis(self.notices.update_error_ms),
                );
            }
            CommitOutcome::NotEditing | CommitOutcome::Invalid => {}
        }
        outcome
    }

    /// Delete a row after the user confirms.
    ///
    /// If that row is being edited, the edit session is closed once the
    /// backend confirms the delete.
    pub async fn delete_row<C>(&mut self, record: &Cliente, confirm: &C) -> DeleteOutcome
    where
        C: Confirm + ?Sized,
    {
        let prompt = format!("Delete client {}?", record.display_name().trim_end());
        if !confirm.confirm(&prompt) {
            tracing::debug!(id = ?record.id, "Delete declined");
            return DeleteOutcome::Declined;
        }

        let id = record.usable_id().cloned();
        let result = {
            let _marker = id.clone().map(|id| DeletingGuard::mark(&self.deleting, id));
            self.repository.delete(id.as_ref()).await
        };

        match result {
            Ok(()) => {
                if id.is_some() && self.session.editing_id() == id.as_ref() {
                    self.session.cancel();
                }
                self.notifier.success(
                    format!("Client {} deleted", record.fields.nombre),
                    Duration::from_millis(self.notices.delete_success_ms),
                );
                DeleteOutcome::Deleted
            }
            Err(e) => {
                self.notifier.error(
                    format!("Could not delete client: {}", e),
                    Duration::from_millis(self.notices.delete_error_ms),
                );
                DeleteOutcome::Failed(e)
            }
        }
    }
}

impl Drop for ClientListView {
    fn drop(&mut self) {
        self.failure_reporter.abort();
    }
}
