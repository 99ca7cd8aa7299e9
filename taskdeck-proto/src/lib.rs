//! Wire types for the `TaskDeck` task API.
//!
//! Shared by the client and the server so both sides agree on the JSON
//! shapes exchanged over HTTP.

pub mod task;

pub use task::{
    DescriptionPatch, DraftError, MIN_TASK_TITLE_LENGTH, StatusPatch, Task, TaskDraft, TaskId,
    TaskStatus, validate_draft,
};
