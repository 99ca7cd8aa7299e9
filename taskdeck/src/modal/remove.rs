//! Remove-task workflow.
//!
//! Opens with a snapshot of the task to delete so the confirmation
//! prompt can show what is about to disappear. Confirm deletes remotely;
//! success closes the modal, failure keeps it open with the snapshot
//! intact so the user can retry.

use taskdeck_proto::Task;

use super::{ModalError, ModalState, TaskSnapshot};
use crate::gateway::TaskGateway;
use crate::store::TaskStore;

/// State machine for deleting a task.
#[derive(Debug, Default)]
pub struct RemoveModal {
    state: ModalState<TaskSnapshot>,
}

impl RemoveModal {
    /// Creates the workflow in the closed state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ModalState::closed(),
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

    /// Opens the modal with a detached copy of `task`.
    pub fn open(&mut self, task: &Task) {
        self.state.open_with(TaskSnapshot::of(task));
    }

    /// Closes the modal without deleting anything.
    pub fn close(&mut self) {
        self.state.close();
    }

    /// Deletes the snapshotted task remotely and closes on success.
    ///
    /// # Errors
    ///
    /// [`ModalError::NotOpen`] or the propagated [`ModalError::Gateway`];
    /// on failure the modal stays open for retry.
    pub async fn confirm<G: TaskGateway>(
        &mut self,
        store: &mut TaskStore<G>,
    ) -> Result<(), ModalError> {
        let id = self.state.draft().ok_or(ModalError::NotOpen)?.id;
        store.remove(id).await?;
        self.state.close();
        Ok(())
    }
}
