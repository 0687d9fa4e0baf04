//! New-client form.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::config::NotificationConfig;
use crate::domain::{ClientField, Cliente};
use crate::forms::fields::FieldSet;
use crate::notifications::Notifier;
use crate::repository::{ClientRepository, RepositoryError};

/// Result of [`CreationForm::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// A field failed validation. Nothing was sent.
    Rejected,
    /// The backend stored the record; the form was reset.
    Created(Cliente),
    /// The backend call failed; the values are kept for a retry.
    Failed(RepositoryError),
}

/// Lowers the loading flag when dropped, whichever way submit ends.
struct LoadingGuard(Arc<watch::Sender<bool>>);

impl LoadingGuard {
    fn raise(flag: &Arc<watch::Sender<bool>>) -> Self {
        flag.send_replace(true);
        Self(flag.clone())
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

/// Form bound to the "new client" use case.
pub struct CreationForm {
    fields: FieldSet,
    repository: ClientRepository,
    notifier: Notifier,
    notices: NotificationConfig,
    loading: Arc<watch::Sender<bool>>,
}

impl CreationForm {
    pub fn new(repository: ClientRepository, notifier: Notifier, notices: NotificationConfig) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            fields: FieldSet::empty(),
            repository,
            notifier,
            notices,
            loading: Arc::new(loading),
        }
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Store what the user typed. Creation applies no sanitization.
    pub fn input(&mut self, field: ClientField, value: impl Into<String>) {
        self.fields.set_value(field, value.into());
    }

    /// The user left the control.
    pub fn touch(&mut self, field: ClientField) {
        self.fields.touch(field);
    }

    pub fn field_error(&self, field: ClientField) -> Option<&'static str> {
        self.fields.visible_error(field)
    }

    pub fn is_valid(&self) -> bool {
        self.fields.is_valid()
    }

    /// True while a submit is waiting on the backend. Views disable the
    /// submit control with it.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Validate and send the form.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.fields.mark_all_touched();

        let Some(values) = self.fields.to_fields() else {
            tracing::debug!("Creation form invalid, submit aborted");
            return SubmitOutcome::Rejected;
        };

        let _loading = LoadingGuard::raise(&self.loading);
        match self.repository.create(values).await {
            Ok(created) => {
                self.fields.reset();
                self.notifier.success(
                    format!("Client {} saved", created.fields.nombre),
                    Duration::from_millis(self.notices.create_success_ms),
                );
                SubmitOutcome::Created(created)
            }
            Err(e) => {
                self.notifier.error(
                    format!("Could not save client: {}", e),
                    Duration::from_millis(self.notices.create_error_ms),
                );
                SubmitOutcome::Failed(e)
            }
        }
    }
}
