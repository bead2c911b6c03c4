//! List sessions: the fetch, dispatch and refresh protocol
//!
//! A [`ListSession`] owns everything one entity page needs: the latest
//! snapshot, the user's [`ViewState`], the [`EditDialog`] and a queue of
//! notifications. The displayed page is always
//! `derive_page(snapshot, state, config)`.
//!
//! Backend calls are split in three so a caller can drive them however it
//! likes (synchronously, from a worker, or out of order in tests):
//!
//! | step | fetch | mutation |
//! |------|-------|----------|
//! | start | [`begin_fetch`](ListSession::begin_fetch) | [`begin_submit`](ListSession::begin_submit) / [`begin_delete`](ListSession::begin_delete) |
//! | call backend | [`run_fetch`](ListSession::run_fetch) | [`run_mutation`](ListSession::run_mutation) |
//! | apply | [`complete_fetch`](ListSession::complete_fetch) | [`complete_mutation`](ListSession::complete_mutation) |
//!
//! [`refresh`](ListSession::refresh), [`submit`](ListSession::submit) and
//! [`delete`](ListSession::delete) run all three in a row.
//!
//! A successful mutation is followed by a refetch. A failed one leaves the
//! snapshot untouched and queues an error notification with the backend's
//! message. Nothing is retried.

use std::sync::Arc;

use roster_core::{ActiveFilter, FieldFilter, Record, RecordId, Value};
use roster_engine::EntitySchema;
use roster_view::{
    derive_page, DerivedPage, EditDialog, FetchSequencer, FetchTicket, ListConfig, Submission,
    ViewError, ViewState,
};
use tracing::{debug, warn};

use crate::notify::Notification;
use crate::validate::{prepare_patch, prepare_record};
use crate::{Command, Error, Executor, Output, Result};

/// Kind of write a [`PendingMutation`] performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    /// Insert from the dialog
    Create,
    /// Update from the dialog
    Update,
    /// Delete from a row action
    Delete,
}

/// A write that has been started but not completed
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    /// What kind of write
    pub action: MutationAction,
    /// Target record
    pub id: RecordId,
    /// Command sent to the executor
    pub command: Command,
}

/// State and protocol of one entity list page
pub struct ListSession {
    executor: Arc<Executor>,
    config: ListConfig,
    schema: Option<EntitySchema>,
    scope: Vec<FieldFilter>,
    state: ViewState,
    snapshot: Vec<Record>,
    fetched_active: ActiveFilter,
    sequencer: FetchSequencer,
    dialog: EditDialog,
    notifications: Vec<Notification>,
}

impl ListSession {
    /// Create a session with an empty snapshot
    ///
    /// Call [`refresh`](Self::refresh) to load the first snapshot.
    pub fn new(executor: Arc<Executor>, config: ListConfig) -> Result<Self> {
        config.validate()?;
        let schema = executor.database().schema(&config.collection).ok();
        let state = ViewState::for_config(&config);
        let fetched_active = state.active;
        Ok(ListSession {
            executor,
            config,
            schema,
            scope: Vec::new(),
            state,
            snapshot: Vec::new(),
            fetched_active,
            sequencer: FetchSequencer::new(),
            dialog: EditDialog::Closed,
            notifications: Vec::new(),
        })
    }

    /// Restrict every fetch with an extra equality filter (builder pattern)
    ///
    /// Used for nested lists such as the contracts of one client.
    pub fn scoped(mut self, filter: FieldFilter) -> Self {
        self.scope.push(filter);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Page definition
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Current user inputs
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Latest applied snapshot
    pub fn snapshot(&self) -> &[Record] {
        &self.snapshot
    }

    /// Status filter the snapshot was fetched with
    pub fn fetched_active(&self) -> ActiveFilter {
        self.fetched_active
    }

    /// Create/edit dialog
    pub fn dialog(&self) -> &EditDialog {
        &self.dialog
    }

    /// The displayed page
    pub fn page(&self) -> DerivedPage {
        derive_page(&self.snapshot, &self.state, &self.config)
    }

    /// A fetch is pending
    pub fn is_loading(&self) -> bool {
        self.sequencer.is_loading()
    }

    /// Nothing to show and nothing pending
    pub fn is_empty(&self) -> bool {
        !self.is_loading() && self.page().is_empty()
    }

    /// Queued notifications, oldest first
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Remove and return queued notifications
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // =========================================================================
    // Fetch
    // =========================================================================

    /// Start a fetch with the current status filter
    ///
    /// Any fetch still pending becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.sequencer.issue(self.state.active)
    }

    /// Perform the backend call for a ticket
    pub fn run_fetch(&self, ticket: &FetchTicket) -> Result<Vec<Record>> {
        let command = Command::List {
            collection: self.config.collection.clone(),
            active: ticket.active,
            filters: self.scope.clone(),
        };
        match self.executor.execute(command)? {
            Output::Records(rows) => Ok(rows),
            _ => Err(Error::unexpected_output("List")),
        }
    }

    /// Apply a fetch result
    ///
    /// Returns false when the ticket is stale; the result is then dropped
    /// without touching the snapshot or the notifications. A failed fetch
    /// puts the status filter back to the one the snapshot was fetched
    /// with.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Record>>) -> bool {
        if !self.sequencer.accept(&ticket) {
            return false;
        }
        match result {
            Ok(rows) => {
                debug!(
                    target: "roster::session",
                    collection = %self.config.collection,
                    seq = ticket.seq,
                    rows = rows.len(),
                    "fetch applied"
                );
                self.snapshot = rows;
                self.fetched_active = ticket.active;
            }
            Err(e) => {
                warn!(
                    target: "roster::session",
                    collection = %self.config.collection,
                    seq = ticket.seq,
                    error = %e,
                    "fetch failed"
                );
                self.state.active = self.fetched_active;
                self.notifications.push(Notification::error(&e));
            }
        }
        true
    }

    /// Fetch and apply in one step
    pub fn refresh(&mut self) -> Result<()> {
        let ticket = self.begin_fetch();
        let result = self.run_fetch(&ticket);
        let outcome = match &result {
            Ok(_) => Ok(()),
            Err(e) => Err(e.clone()),
        };
        self.complete_fetch(ticket, result);
        outcome
    }

    // =========================================================================
    // View inputs
    // =========================================================================

    /// Change the text query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
    }

    /// Change the status filter, refetching when it changed
    pub fn set_active(&mut self, active: ActiveFilter) -> Result<()> {
        if self.state.set_active(active) {
            self.refresh()?;
        }
        Ok(())
    }

    /// Header click
    pub fn toggle_sort(&mut self, column: &str) -> Result<()> {
        self.config.sortable_column(column)?;
        self.state.toggle_sort(column);
        Ok(())
    }

    /// Show or hide a column; returns whether it is now visible
    pub fn toggle_column(&mut self, key: &str) -> Result<bool> {
        self.config.column_def(key)?;
        Ok(self.state.toggle_column(key))
    }

    /// Next page; false on the last page
    pub fn next_page(&mut self) -> bool {
        let count = self.page().page.page_count;
        self.state.next_page(count)
    }

    /// Previous page; false on the first page
    pub fn prev_page(&mut self) -> bool {
        let count = self.page().page.page_count;
        self.state.prev_page(count)
    }

    /// Jump to a page, clamped
    pub fn go_to_page(&mut self, page: usize) {
        let count = self.page().page.page_count;
        self.state.go_to_page(page, count);
    }

    // =========================================================================
    // Dialog and mutations
    // =========================================================================

    /// Open the dialog on a new record with a fresh identifier
    pub fn open_create(&mut self) -> Result<RecordId> {
        let mut draft = Record::generate();
        if let Some(status) = &self.config.status_field {
            draft.set(status.as_str(), true);
        }
        let id = draft.id().clone();
        self.dialog.open_create(draft)?;
        Ok(id)
    }

    /// Open the dialog on a copy of a snapshot row
    pub fn open_edit(&mut self, id: &RecordId) -> Result<()> {
        let record = self
            .snapshot
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| Error::RecordNotFound {
                entity: format!("{}/{}", self.config.collection, id),
            })?;
        self.dialog.open_edit(record)?;
        Ok(())
    }

    /// Change a dialog field
    pub fn edit_field(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        self.dialog.set_field(field, value)?;
        Ok(())
    }

    /// Close the dialog without submitting
    pub fn cancel_dialog(&mut self) -> Result<()> {
        self.dialog.cancel()?;
        Ok(())
    }

    /// Validate the dialog and turn it into a pending write
    ///
    /// A validation failure reopens the dialog with the message and sends
    /// nothing.
    pub fn begin_submit(&mut self) -> Result<PendingMutation> {
        let submission = self.dialog.begin_submit()?;
        let collection = self.config.collection.clone();
        let prepared = match &self.schema {
            None => Ok(submission),
            Some(schema) => match submission {
                Submission::Create(record) => {
                    prepare_record(schema, &record).map(Submission::Create)
                }
                Submission::Update { id, patch } => {
                    prepare_patch(schema, &patch).map(|patch| Submission::Update { id, patch })
                }
            },
        };

        let pending = match prepared {
            Ok(Submission::Create(record)) => PendingMutation {
                action: MutationAction::Create,
                id: record.id().clone(),
                command: Command::Insert { collection, record },
            },
            Ok(Submission::Update { id, patch }) => PendingMutation {
                action: MutationAction::Update,
                id: id.clone(),
                command: Command::Update {
                    collection,
                    id,
                    patch,
                },
            },
            Err(e) => {
                self.dialog.fail(e.to_string())?;
                return Err(e);
            }
        };
        Ok(pending)
    }

    /// Start deleting a record
    pub fn begin_delete(&self, id: &RecordId) -> PendingMutation {
        PendingMutation {
            action: MutationAction::Delete,
            id: id.clone(),
            command: Command::Delete {
                collection: self.config.collection.clone(),
                id: id.clone(),
            },
        }
    }

    /// Perform the backend call for a pending write
    pub fn run_mutation(&self, pending: &PendingMutation) -> Result<Output> {
        self.executor.execute(pending.command.clone())
    }

    /// Apply a write result
    ///
    /// On success the dialog closes, a success notification is queued and
    /// the list is refetched. On failure the dialog reopens with the
    /// message, an error notification is queued and the snapshot is left as
    /// it was.
    pub fn complete_mutation(
        &mut self,
        pending: PendingMutation,
        result: Result<Output>,
    ) -> Result<()> {
        let via_dialog = pending.action != MutationAction::Delete;
        match result {
            Ok(_) => {
                if via_dialog {
                    self.dialog.succeed()?;
                }
                let verb = match pending.action {
                    MutationAction::Create => "created",
                    MutationAction::Update => "updated",
                    MutationAction::Delete => "deleted",
                };
                self.notifications.push(Notification::success(format!(
                    "Record {} {}",
                    pending.id, verb
                )));
                self.refresh()
            }
            Err(e) => {
                warn!(
                    target: "roster::session",
                    collection = %self.config.collection,
                    id = %pending.id,
                    command = pending.command.name(),
                    error = %e,
                    "mutation failed"
                );
                if via_dialog {
                    self.dialog.fail(e.to_string())?;
                }
                self.notifications.push(Notification::error(&e));
                Err(e)
            }
        }
    }

    /// Validate, send and apply the dialog in one step
    pub fn submit(&mut self) -> Result<()> {
        if self.dialog.is_submitting() {
            return Err(ViewError::SubmissionInFlight.into());
        }
        let pending = self.begin_submit()?;
        let result = self.run_mutation(&pending);
        self.complete_mutation(pending, result)
    }

    /// Delete a record and refetch
    pub fn delete(&mut self, id: &RecordId) -> Result<()> {
        let pending = self.begin_delete(id);
        let result = self.run_mutation(&pending);
        self.complete_mutation(pending, result)
    }
}

impl std::fmt::Debug for ListSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSession")
            .field("collection", &self.config.collection)
            .field("state", &self.state)
            .field("rows", &self.snapshot.len())
            .field("dialog", &self.dialog)
            .finish()
    }
}
