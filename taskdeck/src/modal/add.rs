//! Add-task workflow.
//!
//! Opens with a blank draft. Confirm validates locally first — an invalid
//! draft never reaches the gateway and keeps the modal open for another
//! attempt. A confirmed create closes the modal and resets the draft to a
//! fresh blank state.

use taskdeck_proto::{TaskDraft, validate_draft};

use super::{ModalError, ModalState};
use crate::gateway::TaskGateway;
use crate::store::TaskStore;

/// State machine for creating a new task.
#[derive(Debug, Default)]
pub struct AddModal {
    state: ModalState<TaskDraft>,
}

impl AddModal {
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

    /// The pending draft, if open.
    #[must_use]
    pub const fn draft(&self) -> Option<&TaskDraft> {
        self.state.draft()
    }

    /// Mutable access to the pending draft, if open.
    pub const fn draft_mut(&mut self) -> Option<&mut TaskDraft> {
        self.state.draft_mut()
    }

    /// Opens the modal with a blank draft.
    pub fn open(&mut self) {
        self.state.open_with(TaskDraft::default());
    }

    /// Closes the modal, discarding whatever was typed.
    pub fn close(&mut self) {
        self.state.close();
    }

    /// Validates the draft and, if it passes, submits it through the store.
    ///
    /// On success the modal closes and the draft is discarded. On local
    /// validation failure no remote call is made; on either kind of
    /// failure the modal stays open with the draft intact for retry.
    ///
    /// # Errors
    ///
    /// [`ModalError::NotOpen`], [`ModalError::Draft`] for local
    /// validation, or [`ModalError::Gateway`] for a remote failure.
    pub async fn confirm<G: TaskGateway>(
        &mut self,
        store: &mut TaskStore<G>,
    ) -> Result<(), ModalError> {
        let draft = self.state.draft().ok_or(ModalError::NotOpen)?;
        validate_draft(draft)?;
        let draft = draft.clone();
        store.add(&draft).await?;
        self.state.close();
        Ok(())
    }
}
