/*
[INPUT]:  Task identifiers, write payloads and assignment filters
[OUTPUT]: Task records and mutation confirmations
[POS]:    HTTP layer - task endpoints
[UPDATE]: When adding new task endpoints or changing query parameters
*/

use reqwest::Method;
use tracing::info;

use crate::http::{AgrisyncClient, Result, endpoints};
use crate::types::{ListResponse, Task, TaskPayload, TaskStatus, TaskStatusUpdate};

impl AgrisyncClient {
    /// List tasks, optionally scoped to one assignee
    ///
    /// GET /tasks/tasks/ or /tasks/tasks/?assigned_to={user_id}
    pub async fn list_tasks(&self, assigned_to: Option<u64>) -> Result<Vec<Task>> {
        let endpoint = match assigned_to {
            Some(user_id) => endpoints::tasks_assigned_to(user_id),
            None => endpoints::TASKS.to_string(),
        };
        let builder = self.request(Method::GET, &endpoint)?;
        let response: ListResponse<Task> = self.send_json(builder).await?;
        Ok(response.into_items())
    }

    /// Create a task
    ///
    /// POST /tasks/tasks/
    pub async fn create_task(&self, payload: &TaskPayload) -> Result<Task> {
        let builder = self.request(Method::POST, endpoints::TASKS)?.json(payload);
        let task: Task = self.send_json(builder).await?;
        info!(task_id = task.id, "task created");
        Ok(task)
    }

    /// Replace every writable field of a task
    ///
    /// PUT /tasks/tasks/{id}/
    pub async fn replace_task(&self, task_id: u64, payload: &TaskPayload) -> Result<Task> {
        let builder = self
            .request(Method::PUT, &endpoints::task(task_id))?
            .json(payload);
        let task = self.send_json(builder).await?;
        info!(task_id, "task replaced");
        Ok(task)
    }

    /// Delete a task
    ///
    /// DELETE /tasks/tasks/{id}/
    pub async fn delete_task(&self, task_id: u64) -> Result<()> {
        let builder = self.request(Method::DELETE, &endpoints::task(task_id))?;
        self.send_empty(builder).await?;
        info!(task_id, "task deleted");
        Ok(())
    }

    /// Change only the status of a task
    ///
    /// PATCH /tasks/update-status/{id}/ with `{"status": ...}`
    pub async fn update_task_status(
        &self,
        task_id: u64,
        status: TaskStatus,
    ) -> Result<TaskStatusUpdate> {
        let body = TaskStatusUpdate { status };
        let builder = self
            .request(Method::PATCH, &endpoints::task_status(task_id))?
            .json(&body);
        let update = self.send_json(builder).await?;
        info!(task_id, status = %status, "task status updated");
        Ok(update)
    }
}
