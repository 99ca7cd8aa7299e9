//! Canonical task collection and confirm-then-apply mutations.
//!
//! [`TaskStore`] owns the authoritative in-memory task list. Every
//! mutation first goes through the gateway and only reconciles the local
//! collection after the server confirms — the UI never shows state the
//! server has not acknowledged. Failures leave the collection untouched
//! and surface as [`GatewayError`] results.
//!
//! The store is an observable container: [`TaskStore::subscribe`]
//! registers listeners that fire after each successful reconcile, and
//! [`TaskStore::revision`] counts reconciles for cheap change detection.

use taskdeck_proto::{Task, TaskDraft, TaskId, TaskStatus};

use crate::gateway::{GatewayError, TaskGateway};

/// Listener invoked with the collection after each reconcile.
pub type Listener = Box<dyn FnMut(&[Task]) + Send>;

/// Holds the canonical ordered task collection behind a gateway.
///
/// The collection is an ordered sequence, not a set: insertion order is
/// preserved for tasks that are not explicitly reordered, and ids are
/// unique within it (the server owns id assignment).
pub struct TaskStore<G> {
    gateway: G,
    tasks: Vec<Task>,
    revision: u64,
    listeners: Vec<Listener>,
}

impl<G: TaskGateway> TaskStore<G> {
    /// Creates an empty store over the given gateway.
    pub const fn new(gateway: G) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
            revision: 0,
            listeners: Vec::new(),
        }
    }

    /// Current canonical collection.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of reconciles applied so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// The gateway this store talks through.
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Registers a listener invoked after every successful reconcile.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Task]) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Bumps the revision and notifies listeners. Called only after a
    /// server-confirmed mutation has been applied.
    fn reconciled(&mut self) {
        self.revision += 1;
        for listener in &mut self.listeners {
            listener(&self.tasks);
        }
    }

    /// Replaces the collection wholesale with the server's current state.
    ///
    /// No merge happens: local-only entries (there should be none) are
    /// discarded along with everything else.
    ///
    /// # Errors
    ///
    /// Returns the [`GatewayError`] unchanged; the collection keeps its
    /// previous contents on failure.
    pub async fn load(&mut self) -> Result<(), GatewayError> {
        match self.gateway.fetch_all().await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "loaded task collection");
                self.tasks = tasks;
                self.reconciled();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "load failed");
                Err(e)
            }
        }
    }

    /// Creates a task from `draft` and appends the server-returned task
    /// (carrying the server-assigned id) to the end of the collection.
    ///
    /// # Errors
    ///
    /// On failure nothing is appended and the error is returned.
    pub async fn add(&mut self, draft: &TaskDraft) -> Result<TaskId, GatewayError> {
        match self.gateway.create(draft).await {
            Ok(task) => {
                let id = task.id;
                tracing::debug!(id = %id, "task created");
                self.tasks.push(task);
                self.reconciled();
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "create failed");
                Err(e)
            }
        }
    }

    /// Sets the status of task `id` and replaces the local entry in place
    /// with the server-returned task.
    ///
    /// If no task with that id exists locally the collection is left
    /// alone — the server confirmed the write, and the next [`load`]
    /// will pick it up.
    ///
    /// [`load`]: Self::load
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the collection is untouched.
    pub async fn update_status(
        &mut self,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<(), GatewayError> {
        match self.gateway.set_status(id, status).await {
            Ok(task) => {
                tracing::debug!(id = %id, status = %status, "status confirmed");
                self.replace(task);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "status update failed");
                Err(e)
            }
        }
    }

    /// Sets the description of task `id`, replacing the local entry in
    /// place on confirmation.
    ///
    /// When the task is present locally and `description` matches its
    /// current value, no remote call is made at all.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the collection is untouched.
    pub async fn update_description(
        &mut self,
        id: TaskId,
        description: &str,
    ) -> Result<(), GatewayError> {
        if self
            .tasks
            .iter()
            .any(|t| t.id == id && t.description == description)
        {
            tracing::debug!(id = %id, "description unchanged, skipping remote call");
            return Ok(());
        }
        match self.gateway.set_description(id, description).await {
            Ok(task) => {
                tracing::debug!(id = %id, "description confirmed");
                self.replace(task);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "description update failed");
                Err(e)
            }
        }
    }

    /// Deletes task `id` remotely, then removes the matching local entry.
    ///
    /// # Errors
    ///
    /// On failure the entry remains in the collection.
    pub async fn remove(&mut self, id: TaskId) -> Result<(), GatewayError> {
        match self.gateway.delete(id).await {
            Ok(()) => {
                tracing::debug!(id = %id, "task deleted");
                self.tasks.retain(|t| t.id != id);
                self.reconciled();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "delete failed");
                Err(e)
            }
        }
    }

    /// Replaces the entry matching `task.id` in place, preserving its
    /// position. Absent id: collection no-op, but the reconcile still
    /// counts (the server state changed).
    fn replace(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
        self.reconciled();
    }
}
