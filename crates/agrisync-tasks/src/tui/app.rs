/*
[INPUT]:  TaskListController and the shared log buffer
[OUTPUT]: AppState holding view toggles, status line and table selection
[POS]:    TUI app state
[UPDATE]: When adding view state that outlives a single frame
*/

use agrisync_adapter::TaskStatusUpdate;
use agrisync_tasks::{SubmitOutcome, TaskListController};
use ratatui::widgets::TableState;

use crate::tui::LogBufferHandle;

pub(super) struct AppState {
    pub(super) controller: TaskListController,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) show_logs: bool,
    pub(super) status_message: String,
    pub(super) table_state: TableState,
}

impl AppState {
    pub(super) fn new(controller: TaskListController, log_buffer: LogBufferHandle) -> Self {
        Self {
            controller,
            log_buffer,
            show_logs: false,
            status_message: String::from("ready"),
            table_state: TableState::default(),
        }
    }

    /// Mirror the controller's selected row into the table widget state
    pub(super) fn sync_selection(&mut self) {
        if self.controller.tasks().is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state
                .select(Some(self.controller.selected_index()));
        }
    }

    pub(super) fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub(super) async fn settle_status_submit(
        &mut self,
        result: agrisync_adapter::Result<TaskStatusUpdate>,
    ) {
        self.status_message = match self.controller.finish_status_submit(result).await {
            SubmitOutcome::Saved => "status saved".to_string(),
            SubmitOutcome::Failed => "status update failed".to_string(),
            SubmitOutcome::Ignored => return,
        };
    }
}
