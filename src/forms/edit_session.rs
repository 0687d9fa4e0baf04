//! Inline edit session for list rows.
//!
//! # States
//! - Idle: no row is being edited
//! - Editing: one row, with its working copy and field model
//!
//! # State Transitions
//! ```text
//! any     → Editing: start_edit(record)   previous session discarded
//! Editing → Idle:    cancel()
//! Editing → Editing: on_field_input(), invalid commit(), failed commit()
//! Editing → Idle:    successful commit()
//! ```
//!
//! # Design Decisions
//! - The epoch counter changes on every transition in or out of Editing,
//!   so a commit result arriving after the user moved on is recognised as stale
//! - Field writes are silent: no change event is raised, so sanitizing cannot loop

use crate::domain::{ClientField, ClientId, Cliente};
use crate::forms::fields::FieldSet;
use crate::repository::{ClientRepository, RepositoryError, RepositoryResult};
use crate::validation::sanitize;

/// The row currently being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEdit {
    id: ClientId,
    working_copy: Cliente,
    fields: FieldSet,
}

impl ActiveEdit {
    pub fn id(&self) -> &ClientId {
        &self.id
    }

    pub fn working_copy(&self) -> &Cliente {
        &self.working_copy
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Editing(ActiveEdit),
}

/// A validated update waiting on the backend.
#[derive(Debug, Clone)]
pub struct PendingCommit {
    epoch: u64,
    record: Cliente,
}

impl PendingCommit {
    /// The merged record to send.
    pub fn record(&self) -> &Cliente {
        &self.record
    }
}

/// Result of a commit attempt.
#[derive(Debug)]
pub enum CommitOutcome {
    /// No row was being edited.
    NotEditing,
    /// A field failed validation. Nothing was sent; the session stays open.
    Invalid,
    /// Stored. The session is idle again.
    Committed(Cliente),
    /// The backend call failed. The session stays open with the edits.
    Failed(RepositoryError),
    /// The session was cancelled or restarted while the call was in flight.
    /// The mutation still happened (or failed); the session was left alone.
    Superseded(RepositoryResult<Cliente>),
}

/// At most one inline edit at a time.
#[derive(Debug, Default)]
pub struct EditSession {
    state: SessionState,
    epoch: u64,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn active(&self) -> Option<&ActiveEdit> {
        match &self.state {
            SessionState::Editing(active) => Some(active),
            SessionState::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.active().is_some()
    }

    pub fn editing_id(&self) -> Option<&ClientId> {
        self.active().map(|a| &a.id)
    }

    pub fn working_copy(&self) -> Option<&Cliente> {
        self.active().map(|a| &a.working_copy)
    }

    pub fn fields(&self) -> Option<&FieldSet> {
        self.active().map(|a| &a.fields)
    }

    /// Start editing `record`, dropping any session in progress.
    ///
    /// A record without a usable id cannot be targeted by an update, so it is
    /// refused and the current session is kept.
    pub fn start_edit(&mut self, record: &Cliente) -> RepositoryResult<()> {
        let id = record
            .usable_id()
            .cloned()
            .ok_or(RepositoryError::MissingIdentifier)?;

        if let Some(previous) = self.editing_id() {
            tracing::debug!(previous = %previous, next = %id, "Discarding previous edit session");
        }

        self.epoch += 1;
        self.state = SessionState::Editing(ActiveEdit {
            fields: FieldSet::seeded(&record.fields),
            working_copy: record.clone(),
            id,
        });
        tracing::debug!(epoch = self.epoch, "Edit session started");
        Ok(())
    }

    /// Leave the row without saving. Returns whether a session was open.
    pub fn cancel(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.epoch += 1;
        self.state = SessionState::Idle;
        tracing::debug!(epoch = self.epoch, "Edit session cancelled");
        true
    }

    /// Apply one input event to the open row.
    ///
    /// The sanitized value goes to both the working copy and the field model.
    /// `sexo` is a two-way choice; anything else is ignored. Returns the
    /// stored value, or `None` if nothing was stored.
    pub fn on_field_input(&mut self, field: ClientField, raw: &str) -> Option<&str> {
        let SessionState::Editing(active) = &mut self.state else {
            return None;
        };

        let value = sanitize(field, raw);
        if active.working_copy.fields.set(field, value.clone()).is_err() {
            tracing::debug!(field = %field, "Ignoring unknown choice");
            return None;
        }
        active.fields.set_value(field, value);
        active.fields.touch(field);
        Some(active.fields.value(field))
    }

    /// Aggregate validity of the open row. `false` when idle.
    pub fn is_row_valid(&self) -> bool {
        self.fields().is_some_and(FieldSet::is_valid)
    }

    /// Message for a touched invalid field of the open row.
    pub fn field_error(&self, field: ClientField) -> Option<&'static str> {
        self.fields().and_then(|f| f.visible_error(field))
    }

    /// Touch every field and, if they all pass, build the update to send.
    pub fn begin_commit(&mut self) -> Result<PendingCommit, CommitOutcome> {
        let SessionState::Editing(active) = &mut self.state else {
            return Err(CommitOutcome::NotEditing);
        };

        active.fields.mark_all_touched();
        let Some(values) = active.fields.to_fields() else {
            tracing::debug!(id = %active.id, "Row invalid, commit skipped");
            return Err(CommitOutcome::Invalid);
        };

        // Field model values take precedence over the working copy.
        let mut record = active.working_copy.clone();
        record.fields = values;
        record.id = Some(active.id.clone());

        Ok(PendingCommit { epoch: self.epoch, record })
    }

    /// Apply the backend's answer to a commit started with [`begin_commit`](Self::begin_commit).
    pub fn finish_commit(
        &mut self,
        pending: PendingCommit,
        result: RepositoryResult<Cliente>,
    ) -> CommitOutcome {
        if pending.epoch != self.epoch || !self.is_editing() {
            tracing::debug!(
                pending_epoch = pending.epoch,
                epoch = self.epoch,
                "Commit result arrived for a closed session"
            );
            return CommitOutcome::Superseded(result);
        }

        match result {
            Ok(updated) => {
                self.epoch += 1;
                self.state = SessionState::Idle;
                tracing::debug!(epoch = self.epoch, "Edit session committed");
                CommitOutcome::Committed(updated)
            }
            Err(e) => {
                tracing::error!(error = %e, "Commit failed, edits kept");
                CommitOutcome::Failed(e)
            }
        }
    }

    /// Validate the open row and send it as an update.
    pub async fn commit(&mut self, repository: &ClientRepository) -> CommitOutcome {
        let pending = match self.begin_commit() {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };
        let result = repository.update(pending.record.clone()).await;
        self.finish_commit(pending, result)
    }
}
