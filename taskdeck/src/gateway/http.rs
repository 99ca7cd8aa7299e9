//! HTTP gateway backed by the `TaskDeck` REST API.
//!
//! Speaks the JSON wire shapes from `taskdeck-proto` against these routes:
//!
//! | Operation        | Route                               |
//! |------------------|-------------------------------------|
//! | `fetch_all`      | `GET /api/tasks`                    |
//! | `create`         | `POST /api/tasks`                   |
//! | `set_status`     | `PATCH /api/tasks/{id}/status`      |
//! | `set_description`| `PATCH /api/tasks/{id}/description` |
//! | `delete`         | `DELETE /api/tasks/{id}`            |
//!
//! Status mapping: 404 with a known target id becomes
//! [`GatewayError::NotFound`], other 4xx become [`GatewayError::Validation`],
//! transport failures and 5xx become [`GatewayError::Network`].

use std::time::Duration;

use reqwest::{Response, StatusCode};
use taskdeck_proto::{DescriptionPatch, StatusPatch, Task, TaskDraft, TaskId, TaskStatus};

use super::{GatewayError, TaskGateway};

/// reqwest-based [`TaskGateway`] implementation.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Creates a gateway for the API at `base_url` (no trailing slash
    /// required) with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Maps a non-success response to a [`GatewayError`].
    ///
    /// `target` is the task id the request addressed, if any; it turns a
    /// 404 into `NotFound` instead of a generic validation failure.
    async fn check(response: Response, target: Option<TaskId>) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND
            && let Some(id) = target
        {
            return Err(GatewayError::NotFound(id));
        }
        let body = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            Err(GatewayError::Validation(format!("{status}: {body}")))
        } else {
            Err(GatewayError::Network(format!("{status}: {body}")))
        }
    }

    async fn read_task(response: Response) -> Result<Task, GatewayError> {
        response
            .json::<Task>()
            .await
            .map_err(|e| GatewayError::Network(format!("invalid task payload: {e}")))
    }
}

fn transport_err(e: &reqwest::Error) -> GatewayError {
    GatewayError::Network(e.to_string())
}

impl TaskGateway for HttpGateway {
    async fn fetch_all(&self) -> Result<Vec<Task>, GatewayError> {
        let response = self
            .client
            .get(self.url("/api/tasks"))
            .send()
            .await
            .map_err(|e| transport_err(&e))?;
        let response = Self::check(response, None).await?;
        response
            .json::<Vec<Task>>()
            .await
            .map_err(|e| GatewayError::Network(format!("invalid task list payload: {e}")))
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, GatewayError> {
        let response = self
            .client
            .post(self.url("/api/tasks"))
            .json(draft)
            .send()
            .await
            .map_err(|e| transport_err(&e))?;
        let response = Self::check(response, None).await?;
        Self::read_task(response).await
    }

    async fn set_status(&self, id: TaskId, status: TaskStatus) -> Result<Task, GatewayError> {
        let response = self
            .client
            .patch(self.url(&format!("/api/tasks/{id}/status")))
            .json(&StatusPatch { status })
            .send()
            .await
            .map_err(|e| transport_err(&e))?;
        let response = Self::check(response, Some(id)).await?;
        Self::read_task(response).await
    }

    async fn set_description(&self, id: TaskId, description: &str) -> Result<Task, GatewayError> {
        let response = self
            .client
            .patch(self.url(&format!("/api/tasks/{id}/description")))
            .json(&DescriptionPatch {
                description: description.to_string(),
            })
            .send()
            .await
            .map_err(|e| transport_err(&e))?;
        let response = Self::check(response, Some(id)).await?;
        Self::read_task(response).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/tasks/{id}")))
            .send()
            .await
            .map_err(|e| transport_err(&e))?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }
}
