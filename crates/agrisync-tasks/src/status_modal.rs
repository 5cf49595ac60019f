/*
[INPUT]:  One task, selected status, backend status-update results
[OUTPUT]: PATCH requests on the status endpoint and refresh notifications
[POS]:    Worker flow - status-only update modal
[UPDATE]: When the worker status flow or its state machine changes
*/

use agrisync_adapter::{AgrisyncError, Task, TaskBackend, TaskStatus, TaskStatusUpdate};
use tracing::{info, warn};

use crate::event::RefreshNotifier;

pub const STATUS_UPDATE_FALLBACK: &str = "An error occurred while updating the status.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusModalPhase {
    Closed,
    Open,
    Submitting,
}

/// Request produced when a submission starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStatusUpdate {
    pub task_id: u64,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    Failed,
    /// Nothing to submit: closed, no task, or a request already in flight
    Ignored,
}

/// Status-only update modal for workers
///
/// Closed → Open(task.status) → Submitting → Closed on success, or back to
/// Open with the error shown on failure.
#[derive(Debug)]
pub struct StatusModal {
    task: Option<Task>,
    selected: TaskStatus,
    error: Option<String>,
    phase: StatusModalPhase,
    notifier: RefreshNotifier,
}

impl StatusModal {
    pub fn new(notifier: RefreshNotifier) -> Self {
        Self {
            task: None,
            selected: TaskStatus::default(),
            error: None,
            phase: StatusModalPhase::Closed,
            notifier,
        }
    }

    /// Open for `task`, resetting selection and error to that task
    pub fn open(&mut self, task: Task) {
        self.selected = task.status;
        self.error = None;
        self.task = Some(task);
        self.phase = StatusModalPhase::Open;
    }

    pub fn close(&mut self) {
        self.phase = StatusModalPhase::Closed;
    }

    pub fn phase(&self) -> StatusModalPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != StatusModalPhase::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == StatusModalPhase::Submitting
    }

    /// Task to show; `None` means there is nothing to render
    pub fn visible_task(&self) -> Option<&Task> {
        if self.is_open() {
            self.task.as_ref()
        } else {
            None
        }
    }

    pub fn selected(&self) -> TaskStatus {
        self.selected
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Saving..."
        } else {
            "Save Status"
        }
    }

    pub fn select(&mut self, status: TaskStatus) {
        if self.phase == StatusModalPhase::Open {
            self.selected = status;
        }
    }

    /// Move the selection by `delta` through the status list, clamped
    pub fn move_selection(&mut self, delta: isize) {
        let current = TaskStatus::ALL
            .iter()
            .position(|status| *status == self.selected)
            .unwrap_or(0) as isize;
        let last = (TaskStatus::ALL.len() - 1) as isize;
        let next = (current + delta).clamp(0, last) as usize;
        self.select(TaskStatus::ALL[next]);
    }

    /// Enter the submitting phase and hand back the request to send
    pub fn begin_submit(&mut self) -> Option<PendingStatusUpdate> {
        if self.phase != StatusModalPhase::Open {
            return None;
        }
        let task_id = self.task.as_ref()?.id;
        self.phase = StatusModalPhase::Submitting;
        self.error = None;
        Some(PendingStatusUpdate {
            task_id,
            status: self.selected,
        })
    }

    /// Settle a submission started with [`begin_submit`](Self::begin_submit)
    pub fn finish_submit(
        &mut self,
        result: agrisync_adapter::Result<TaskStatusUpdate>,
    ) -> SubmitOutcome {
        if self.phase != StatusModalPhase::Submitting {
            return SubmitOutcome::Ignored;
        }
        match result {
            Ok(update) => {
                info!(task_id = ?self.task.as_ref().map(|task| task.id), status = %update.status, "status saved");
                self.notifier.notify();
                self.phase = StatusModalPhase::Closed;
                SubmitOutcome::Saved
            }
            Err(err) => {
                warn!(error = %err, "failed to update task status");
                self.error = Some(failure_message(&err));
                self.phase = StatusModalPhase::Open;
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit(&mut self, backend: &dyn TaskBackend) -> SubmitOutcome {
        let Some(pending) = self.begin_submit() else {
            return SubmitOutcome::Ignored;
        };
        let result = backend
            .update_task_status(pending.task_id, pending.status)
            .await;
        self.finish_submit(result)
    }
}

fn failure_message(err: &AgrisyncError) -> String {
    err.detail().unwrap_or(STATUS_UPDATE_FALLBACK).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{self, AppEvent, EventReceiver};
    use agrisync_adapter::{BackendCall, BackendOp, MockTaskBackend};
    use chrono::NaiveDate;
    use serde_json::json;

    fn task(id: u64, status: TaskStatus) -> Task {
        Task {
            id,
            title: format!("Task {id}"),
            description: "Check irrigation lines".to_string(),
            due_date: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
            status,
            assigned_to: None,
            created_at: None,
        }
    }

    fn modal() -> (StatusModal, EventReceiver) {
        let (tx, rx) = event::channel();
        (StatusModal::new(RefreshNotifier::new(tx)), rx)
    }

    fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn renders_nothing_without_task() {
        let (mut modal, _rx) = modal();
        assert!(modal.visible_task().is_none());
        assert!(modal.begin_submit().is_none());
        modal.select(TaskStatus::Done);
        assert_eq!(modal.selected(), TaskStatus::Todo);
    }

    #[test]
    fn reopening_resets_to_new_task_status() {
        let (mut modal, _rx) = modal();
        modal.open(task(1, TaskStatus::Todo));
        modal.select(TaskStatus::Done);
        modal.close();

        modal.open(task(2, TaskStatus::InProgress));
        assert_eq!(modal.selected(), TaskStatus::InProgress);

        modal.select(TaskStatus::Todo);
        modal.open(task(2, TaskStatus::InProgress));
        assert_eq!(modal.selected(), TaskStatus::InProgress);
    }

    #[test]
    fn move_selection_clamps() {
        let (mut modal, _rx) = modal();
        modal.open(task(1, TaskStatus::Todo));
        modal.move_selection(-1);
        assert_eq!(modal.selected(), TaskStatus::Todo);
        modal.move_selection(5);
        assert_eq!(modal.selected(), TaskStatus::Done);
    }

    #[tokio::test]
    async fn success_patches_once_and_notifies_once() {
        let backend = MockTaskBackend::new(Vec::new());
        let (mut modal, mut rx) = modal();
        modal.open(task(5, TaskStatus::Todo));
        modal.select(TaskStatus::Done);

        let outcome = modal.submit(&backend).await;

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(
            backend.calls(),
            vec![BackendCall::UpdateTaskStatus {
                task_id: 5,
                status: TaskStatus::Done,
            }]
        );
        assert_eq!(drain(&mut rx), vec![AppEvent::TasksChanged]);
        assert_eq!(modal.phase(), StatusModalPhase::Closed);
        assert!(modal.visible_task().is_none());
    }

    #[tokio::test]
    async fn failure_keeps_modal_open_with_detail() {
        let backend = MockTaskBackend::new(Vec::new());
        backend.fail(
            BackendOp::UpdateTaskStatus,
            403,
            json!({"detail": "You do not have permission to perform this action."}),
        );
        let (mut modal, mut rx) = modal();
        modal.open(task(5, TaskStatus::Todo));
        modal.select(TaskStatus::InProgress);

        let outcome = modal.submit(&backend).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(modal.phase(), StatusModalPhase::Open);
        assert_eq!(modal.selected(), TaskStatus::InProgress);
        assert_eq!(
            modal.error(),
            Some("You do not have permission to perform this action.")
        );
        assert!(drain(&mut rx).is_empty());

        backend.clear_failure(BackendOp::UpdateTaskStatus);
        assert_eq!(modal.submit(&backend).await, SubmitOutcome::Saved);
        assert_eq!(modal.error(), None);
    }

    #[tokio::test]
    async fn failure_without_detail_uses_fallback() {
        let backend = MockTaskBackend::new(Vec::new());
        backend.fail(BackendOp::UpdateTaskStatus, 400, json!({"status": ["\"late\" is not a valid choice."]}));
        let (mut modal, _rx) = modal();
        modal.open(task(5, TaskStatus::Todo));

        modal.submit(&backend).await;

        assert_eq!(modal.error(), Some(STATUS_UPDATE_FALLBACK));
    }

    #[test]
    fn second_submit_is_ignored_while_in_flight() {
        let (mut modal, _rx) = modal();
        modal.open(task(3, TaskStatus::Todo));

        let pending = modal.begin_submit();
        assert_eq!(
            pending,
            Some(PendingStatusUpdate {
                task_id: 3,
                status: TaskStatus::Todo,
            })
        );
        assert_eq!(modal.submit_label(), "Saving...");
        assert!(modal.begin_submit().is_none());

        modal.select(TaskStatus::Done);
        assert_eq!(modal.selected(), TaskStatus::Todo);
    }
}
