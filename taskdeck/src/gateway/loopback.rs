//! Loopback gateway for testing.
//!
//! Simulates the remote task API with an in-process table, so store and
//! workflow tests run without a server. Failures can be injected with
//! [`LoopbackGateway::fail_next`] to exercise the confirm-then-apply
//! error paths.

use parking_lot::Mutex;
use taskdeck_proto::{Task, TaskDraft, TaskId, TaskStatus, validate_draft};

use super::{GatewayError, TaskGateway};

/// Server-side state simulated by the loopback gateway.
#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: u64,
    fail_next: Option<GatewayError>,
    requests: usize,
}

impl Inner {
    /// Counts the call and takes any injected failure.
    fn begin(&mut self) -> Result<(), GatewayError> {
        self.requests += 1;
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn find_mut(&mut self, id: TaskId) -> Result<&mut Task, GatewayError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(GatewayError::NotFound(id))
    }
}

/// In-process [`TaskGateway`] backed by a mutex-guarded table.
#[derive(Debug, Default)]
pub struct LoopbackGateway {
    inner: Mutex<Inner>,
}

impl LoopbackGateway {
    /// Creates an empty loopback gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loopback gateway pre-populated with `tasks`.
    ///
    /// The next assigned id continues after the highest seeded id.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id.value()).max().unwrap_or(0);
        Self {
            inner: Mutex::new(Inner {
                tasks,
                next_id,
                fail_next: None,
                requests: 0,
            }),
        }
    }

    /// Makes the next gateway call fail with `err`, then clears the fault.
    pub fn fail_next(&self, err: GatewayError) {
        self.inner.lock().fail_next = Some(err);
    }

    /// Snapshot of the simulated server-side table.
    #[must_use]
    pub fn server_tasks(&self) -> Vec<Task> {
        self.inner.lock().tasks.clone()
    }

    /// Total number of gateway calls received, including failed ones.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.inner.lock().requests
    }
}

impl TaskGateway for LoopbackGateway {
    async fn fetch_all(&self) -> Result<Vec<Task>, GatewayError> {
        let mut inner = self.inner.lock();
        inner.begin()?;
        Ok(inner.tasks.clone())
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, GatewayError> {
        let mut inner = self.inner.lock();
        inner.begin()?;
        // The real server enforces the same draft rule with a 422.
        validate_draft(draft).map_err(|e| GatewayError::Validation(e.to_string()))?;
        inner.next_id += 1;
        let task = Task {
            id: TaskId::new(inner.next_id),
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
        };
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn set_status(&self, id: TaskId, status: TaskStatus) -> Result<Task, GatewayError> {
        let mut inner = self.inner.lock();
        inner.begin()?;
        let task = inner.find_mut(id)?;
        task.status = status;
        Ok(task.clone())
    }

    async fn set_description(&self, id: TaskId, description: &str) -> Result<Task, GatewayError> {
        let mut inner = self.inner.lock();
        inner.begin()?;
        let task = inner.find_mut(id)?;
        task.description = description.to_string();
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> Result<(), GatewayError> {
        let mut inner = self.inner.lock();
        inner.begin()?;
        let pos = inner
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(GatewayError::NotFound(id))?;
        inner.tasks.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            ..TaskDraft::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let gw = LoopbackGateway::new();
        let a = gw.create(&draft("first task")).await.unwrap();
        let b = gw.create(&draft("second task")).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn create_rejects_short_title() {
        let gw = LoopbackGateway::new();
        let result = gw.create(&draft("ab")).await;
        assert!(matches!(result, Err(GatewayError::Validation(_))));
        assert!(gw.server_tasks().is_empty());
    }

    #[tokio::test]
    async fn set_status_unknown_id_is_not_found() {
        let gw = LoopbackGateway::new();
        let result = gw.set_status(TaskId::new(99), TaskStatus::Done).await;
        assert_eq!(result, Err(GatewayError::NotFound(TaskId::new(99))));
    }

    #[tokio::test]
    async fn fail_next_fires_once() {
        let gw = LoopbackGateway::new();
        gw.fail_next(GatewayError::Network("connection reset".to_string()));
        assert!(gw.fetch_all().await.is_err());
        assert!(gw.fetch_all().await.is_ok());
    }

    #[tokio::test]
    async fn with_tasks_continues_id_sequence() {
        let seeded = Task {
            id: TaskId::new(7),
            title: "Seeded".to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
        };
        let gw = LoopbackGateway::with_tasks(vec![seeded]);
        let created = gw.create(&draft("new task")).await.unwrap();
        assert_eq!(created.id, TaskId::new(8));
    }

    #[tokio::test]
    async fn request_count_includes_failures() {
        let gw = LoopbackGateway::new();
        gw.fail_next(GatewayError::Network("down".to_string()));
        let _ = gw.fetch_all().await;
        let _ = gw.fetch_all().await;
        assert_eq!(gw.request_count(), 2);
    }
}
