//! In-memory task table.
//!
//! Backing storage for the API server: a flat list of tasks plus a
//! monotonically increasing id counter. Ids are never reused, even
//! after deletes.

use taskdeck_proto::{DraftError, Task, TaskDraft, TaskId, TaskStatus, validate_draft};

/// The server's canonical task collection.
#[derive(Debug)]
pub struct TaskTable {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a table pre-filled with a few demo tasks.
    #[must_use]
    pub fn with_seed() -> Self {
        let mut table = Self::new();
        for (title, description, status) in [
            (
                "Set up project board",
                "Columns for todo, in progress, done",
                TaskStatus::Done,
            ),
            (
                "Write API docs",
                "Cover the task routes and patch shapes",
                TaskStatus::InProgress,
            ),
            ("Plan next sprint", "", TaskStatus::Todo),
        ] {
            table.insert(title, description, status);
        }
        table
    }

    fn insert(&mut self, title: &str, description: &str, status: TaskStatus) -> Task {
        let task = Task {
            id: TaskId::new(self.next_id),
            title: title.to_string(),
            description: description.to_string(),
            status,
        };
        self.next_id += 1;
        self.tasks.push(task.clone());
        task
    }

    /// Number of stored tasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Snapshot of all tasks in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Validates `draft` and stores it as a new task with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] when the draft fails validation; nothing
    /// is stored in that case.
    pub fn create(&mut self, draft: &TaskDraft) -> Result<Task, DraftError> {
        validate_draft(draft)?;
        Ok(self.insert(&draft.title, &draft.description, draft.status))
    }

    /// Replaces the status of the task with `id`, returning the updated
    /// task, or `None` if no task has that id.
    pub fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.status = status;
        Some(task.clone())
    }

    /// Replaces the description of the task with `id`, returning the
    /// updated task, or `None` if no task has that id.
    pub fn set_description(&mut self, id: TaskId, description: &str) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.description = description.to_string();
        Some(task.clone())
    }

    /// Deletes the task with `id`. Returns whether a task was removed.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() < before
    }
}
