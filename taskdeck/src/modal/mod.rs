//! Modal workflow state machines: Add, Edit, Remove.
//!
//! Each workflow is an independent two-state machine (`Closed` ⇄ `Open`)
//! owning a detached draft while open. The three instances share no
//! state and enforce no mutual exclusion: opening Edit while Remove is
//! open is permitted. Drafts are snapshots — nothing a modal holds
//! touches the store until a confirm operation succeeds remotely.

pub mod add;
pub mod edit;
pub mod remove;

pub use add::AddModal;
pub use edit::EditModal;
pub use remove::RemoveModal;

use taskdeck_proto::{DraftError, Task, TaskDraft, TaskId};

use crate::gateway::GatewayError;

/// Failure modes of a modal confirm action.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ModalError {
    /// The modal was asked to act while closed.
    #[error("modal is not open")]
    NotOpen,

    /// Local draft validation refused the submission; no remote call
    /// was made.
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// The remote mutation failed; local state is unchanged.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Generic open/closed state with an owned draft.
///
/// Created closed. `open_with` installs a draft and opens; `close`
/// discards the draft unconditionally — there is no save prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState<D> {
    draft: Option<D>,
}

// Not derived: that would bound `D: Default`, and a closed modal holds
// no draft at all.
impl<D> Default for ModalState<D> {
    fn default() -> Self {
        Self::closed()
    }
}

impl<D> ModalState<D> {
    /// Creates the modal in the closed state.
    #[must_use]
    pub const fn closed() -> Self {
        Self { draft: None }
    }

    /// Whether the modal is currently open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// The current draft, if open.
    #[must_use]
    pub const fn draft(&self) -> Option<&D> {
        self.draft.as_ref()
    }

    /// Mutable access to the current draft, if open.
    pub const fn draft_mut(&mut self) -> Option<&mut D> {
        self.draft.as_mut()
    }

    /// Closed → Open, capturing `draft`.
    pub fn open_with(&mut self, draft: D) {
        self.draft = Some(draft);
    }

    /// Open → Closed, discarding the draft.
    pub fn close(&mut self) {
        self.draft = None;
    }
}

/// A detached copy of a task together with its identity, captured when an
/// Edit or Remove modal opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Id of the task being edited or removed.
    pub id: TaskId,
    /// Detached copy of its fields at open time.
    pub draft: TaskDraft,
}

impl TaskSnapshot {
    /// Snapshots `task` into an independent draft.
    #[must_use]
    pub fn of(task: &Task) -> Self {
        Self {
            id: task.id,
            draft: TaskDraft::from_task(task),
        }
    }
}
