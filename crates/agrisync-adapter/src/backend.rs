/*
[INPUT]:  Task list scopes, write payloads and status transitions
[OUTPUT]: TaskBackend trait seam implemented by the HTTP client
[POS]:    Backend abstraction - what the UI layer talks to
[UPDATE]: When adding operations the UI layer needs from the backend
*/

use async_trait::async_trait;
use serde_json::Value;

use crate::http::{AgrisyncClient, Result};
use crate::types::{Task, TaskPayload, TaskStatus, TaskStatusUpdate};

/// Operations the task screens need from the backend
///
/// `AgrisyncClient` is the production implementation. The trait is async so
/// implementations can sit on any transport.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// List tasks; `assigned_to` scopes the list to one user
    async fn list_tasks(&self, assigned_to: Option<u64>) -> Result<Vec<Task>>;

    /// Create a task from a full payload
    async fn create_task(&self, payload: &TaskPayload) -> Result<Task>;

    /// Replace all writable fields of an existing task
    async fn replace_task(&self, task_id: u64, payload: &TaskPayload) -> Result<Task>;

    async fn delete_task(&self, task_id: u64) -> Result<()>;

    /// Partial update touching only the status, on its own endpoint
    async fn update_task_status(&self, task_id: u64, status: TaskStatus)
    -> Result<TaskStatusUpdate>;

    /// Fetch raw items from a collection endpoint (related-entity options)
    async fn fetch_options(&self, endpoint: &str) -> Result<Vec<Value>>;
}

#[async_trait]
impl TaskBackend for AgrisyncClient {
    async fn list_tasks(&self, assigned_to: Option<u64>) -> Result<Vec<Task>> {
        AgrisyncClient::list_tasks(self, assigned_to).await
    }

    async fn create_task(&self, payload: &TaskPayload) -> Result<Task> {
        AgrisyncClient::create_task(self, payload).await
    }

    async fn replace_task(&self, task_id: u64, payload: &TaskPayload) -> Result<Task> {
        AgrisyncClient::replace_task(self, task_id, payload).await
    }

    async fn delete_task(&self, task_id: u64) -> Result<()> {
        AgrisyncClient::delete_task(self, task_id).await
    }

    async fn update_task_status(
        &self,
        task_id: u64,
        status: TaskStatus,
    ) -> Result<TaskStatusUpdate> {
        AgrisyncClient::update_task_status(self, task_id, status).await
    }

    async fn fetch_options(&self, endpoint: &str) -> Result<Vec<Value>> {
        self.fetch_collection(endpoint).await
    }
}
