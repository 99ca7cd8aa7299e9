//! Remote task API abstraction.
//!
//! Defines the [`TaskGateway`] trait that the store talks through.
//! Concrete implementations:
//! - [`http::HttpGateway`] — reqwest-based client for the JSON REST API
//! - [`loopback::LoopbackGateway`] — in-process gateway for testing
//!
//! Every call is a single request/response exchange. There are no
//! retries and no cancellation: a call, once issued, runs to completion
//! and its result is applied (or reported) whenever it arrives.

pub mod http;
pub mod loopback;

use taskdeck_proto::{Task, TaskDraft, TaskId, TaskStatus};

/// Errors that can occur during gateway operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Transport or connectivity failure, including server-side 5xx.
    #[error("network error: {0}")]
    Network(String),

    /// The target task no longer exists server-side.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// The server rejected a submitted draft.
    #[error("validation rejected: {0}")]
    Validation(String),
}

/// Async gateway trait for remote task CRUD.
///
/// Implementations never touch client-side state — the caller (the store)
/// decides what to do with a confirmed result. A returned [`Task`] is the
/// server's authoritative record after the mutation.
pub trait TaskGateway: Send + Sync {
    /// Fetch the full task collection.
    fn fetch_all(&self) -> impl std::future::Future<Output = Result<Vec<Task>, GatewayError>> + Send;

    /// Create a new task from a draft. The server assigns the id.
    fn create(
        &self,
        draft: &TaskDraft,
    ) -> impl std::future::Future<Output = Result<Task, GatewayError>> + Send;

    /// Set the status of an existing task.
    fn set_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> impl std::future::Future<Output = Result<Task, GatewayError>> + Send;

    /// Set the description of an existing task.
    fn set_description(
        &self,
        id: TaskId,
        description: &str,
    ) -> impl std::future::Future<Output = Result<Task, GatewayError>> + Send;

    /// Delete a task.
    fn delete(&self, id: TaskId)
    -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;
}
