//! Edit-task workflow.
//!
//! Opens with a snapshot of the task under edit. Status and description
//! changes are immediate-commit: they go to the server the moment the
//! user applies them, independent of the modal being "confirmed" or even
//! still open when the response arrives. Submitting the description
//! additionally closes the modal; a status change never does.
//!
//! The description field carries an independently toggleable edit
//! permission that defaults to locked each time the modal opens. The
//! lock only gates local draft edits — it never affects `is_open`.

use taskdeck_proto::{Task, TaskStatus};

use super::{ModalError, ModalState, TaskSnapshot};
use crate::gateway::TaskGateway;
use crate::store::TaskStore;

/// State machine for editing an existing task.
#[derive(Debug, Default)]
pub struct EditModal {
    state: ModalState<TaskSnapshot>,
    description_editable: bool,
}

impl EditModal {
    /// Creates the workflow in the closed state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ModalState::closed(),
            description_editable: false,
        }
    }

    /// Whether the modal is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// The captured snapshot, if open.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&TaskSnapshot> {
        self.state.draft()
    }

    /// Whether the description field currently accepts edits.
    #[must_use]
    pub const fn description_editable(&self) -> bool {
        self.description_editable
    }

    /// Opens the modal with a detached copy of `task`. The description
    /// lock resets to its default (locked).
    pub fn open(&mut self, task: &Task) {
        self.state.open_with(TaskSnapshot::of(task));
        self.description_editable = false;
    }

    /// Closes the modal, discarding the snapshot. Any mutation already
    /// confirmed (or still in flight) is unaffected.
    pub fn close(&mut self) {
        self.state.close();
    }

    /// Form capability: enables or disables the description field
    /// without touching the open state.
    pub const fn set_description_editable(&mut self, editable: bool) {
        self.description_editable = editable;
    }

    /// Flips the description field lock.
    pub const fn toggle_description_editable(&mut self) {
        self.description_editable = !self.description_editable;
    }

    /// Applies `text` to the draft description. Refused (returns `false`)
    /// while the field is locked or the modal is closed.
    pub fn edit_description(&mut self, text: &str) -> bool {
        if !self.description_editable {
            return false;
        }
        match self.state.draft_mut() {
            Some(snapshot) => {
                snapshot.draft.description = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Immediately commits a status change for the task under edit.
    ///
    /// The draft status updates only after the server confirms; the
    /// modal stays open either way.
    ///
    /// # Errors
    ///
    /// [`ModalError::NotOpen`] or the propagated [`ModalError::Gateway`].
    pub async fn commit_status<G: TaskGateway>(
        &mut self,
        store: &mut TaskStore<G>,
        status: TaskStatus,
    ) -> Result<(), ModalError> {
        let id = self.state.draft().ok_or(ModalError::NotOpen)?.id;
        store.update_status(id, status).await?;
        if let Some(snapshot) = self.state.draft_mut() {
            snapshot.draft.status = status;
        }
        Ok(())
    }

    /// Submits the draft description and closes the modal on success.
    ///
    /// The store skips the remote call when the description is unchanged;
    /// the modal still closes in that case — submit means "done editing".
    ///
    /// # Errors
    ///
    /// [`ModalError::NotOpen`] or the propagated [`ModalError::Gateway`];
    /// on failure the modal stays open with the draft intact.
    pub async fn submit_description<G: TaskGateway>(
        &mut self,
        store: &mut TaskStore<G>,
    ) -> Result<(), ModalError> {
        let snapshot = self.state.draft().ok_or(ModalError::NotOpen)?;
        let (id, description) = (snapshot.id, snapshot.draft.description.clone());
        store.update_description(id, &description).await?;
        self.state.close();
        Ok(())
    }
}
