/*
[INPUT]:  Fixed task list, option items and scripted failures
[OUTPUT]: Recording in-memory TaskBackend for controller tests
[POS]:    Test support - built under cfg(test) or the `test-util` feature
[UPDATE]: When TaskBackend gains operations
*/

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::TaskBackend;
use crate::http::{AgrisyncError, Result};
use crate::types::{ApiErrorBody, Task, TaskPayload, TaskStatus, TaskStatusUpdate};

/// One recorded call against [`MockTaskBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    ListTasks { assigned_to: Option<u64> },
    CreateTask(TaskPayload),
    ReplaceTask { task_id: u64, payload: TaskPayload },
    DeleteTask(u64),
    UpdateTaskStatus { task_id: u64, status: TaskStatus },
    FetchOptions(String),
}

/// Operation selector for scripted failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOp {
    ListTasks,
    CreateTask,
    ReplaceTask,
    DeleteTask,
    UpdateTaskStatus,
    FetchOptions,
}

/// In-memory backend for tests: serves a fixed task list, records every call
/// and fails scripted operations with an API error.
#[derive(Debug, Default)]
pub struct MockTaskBackend {
    tasks: Mutex<Vec<Task>>,
    options: Mutex<Vec<Value>>,
    failures: Mutex<HashMap<BackendOp, (u16, Value)>>,
    calls: Mutex<Vec<BackendCall>>,
}

impl MockTaskBackend {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Self::default()
        }
    }

    pub fn with_options(self, options: Vec<Value>) -> Self {
        *lock(&self.options) = options;
        self
    }

    /// Make `op` answer with `status` and the given JSON error body until cleared
    pub fn fail(&self, op: BackendOp, status: u16, body: Value) {
        lock(&self.failures).insert(op, (status, body));
    }

    pub fn clear_failure(&self, op: BackendOp) {
        lock(&self.failures).remove(&op);
    }

    /// Replace the list served by `list_tasks`
    pub fn set_tasks(&self, tasks: Vec<Task>) {
        *lock(&self.tasks) = tasks;
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        lock(&self.calls).clone()
    }

    pub fn take_calls(&self) -> Vec<BackendCall> {
        std::mem::take(&mut *lock(&self.calls))
    }

    fn record(&self, call: BackendCall) {
        lock(&self.calls).push(call);
    }

    fn check(&self, op: BackendOp) -> Result<()> {
        match lock(&self.failures).get(&op) {
            Some((status, body)) => Err(AgrisyncError::Api {
                status: *status,
                body: ApiErrorBody::from_value(body),
            }),
            None => Ok(()),
        }
    }

    fn task_from(&self, task_id: u64, payload: &TaskPayload) -> Task {
        Task {
            id: task_id,
            title: payload.title.clone(),
            description: payload.description.clone(),
            due_date: payload.due_date,
            status: payload.status,
            assigned_to: None,
            created_at: None,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl TaskBackend for MockTaskBackend {
    async fn list_tasks(&self, assigned_to: Option<u64>) -> Result<Vec<Task>> {
        self.record(BackendCall::ListTasks { assigned_to });
        self.check(BackendOp::ListTasks)?;
        Ok(lock(&self.tasks).clone())
    }

    async fn create_task(&self, payload: &TaskPayload) -> Result<Task> {
        self.record(BackendCall::CreateTask(payload.clone()));
        self.check(BackendOp::CreateTask)?;
        let next_id = lock(&self.tasks).iter().map(|task| task.id).max().unwrap_or(0) + 1;
        Ok(self.task_from(next_id, payload))
    }

    async fn replace_task(&self, task_id: u64, payload: &TaskPayload) -> Result<Task> {
        self.record(BackendCall::ReplaceTask {
            task_id,
            payload: payload.clone(),
        });
        self.check(BackendOp::ReplaceTask)?;
        Ok(self.task_from(task_id, payload))
    }

    async fn delete_task(&self, task_id: u64) -> Result<()> {
        self.record(BackendCall::DeleteTask(task_id));
        self.check(BackendOp::DeleteTask)
    }

    async fn update_task_status(
        &self,
        task_id: u64,
        status: TaskStatus,
    ) -> Result<TaskStatusUpdate> {
        self.record(BackendCall::UpdateTaskStatus { task_id, status });
        self.check(BackendOp::UpdateTaskStatus)?;
        Ok(TaskStatusUpdate { status })
    }

    async fn fetch_options(&self, endpoint: &str) -> Result<Vec<Value>> {
        self.record(BackendCall::FetchOptions(endpoint.to_string()));
        self.check(BackendOp::FetchOptions)?;
        Ok(lock(&self.options).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn mock_records_calls_and_scripts_failures() {
        let backend = MockTaskBackend::new(Vec::new());
        backend.fail(BackendOp::DeleteTask, 500, json!({"detail": "boom"}));

        let err = backend.delete_task(3).await.unwrap_err();
        assert_eq!(err.detail(), Some("boom"));

        backend.clear_failure(BackendOp::DeleteTask);
        backend.delete_task(3).await.unwrap();

        assert_eq!(
            backend.take_calls(),
            vec![BackendCall::DeleteTask(3), BackendCall::DeleteTask(3)]
        );
        assert!(backend.calls().is_empty());
    }
}
