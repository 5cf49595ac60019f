/*
[INPUT]:  TaskBackend handle, active Session, row actions and AppEvents
[OUTPUT]: Role-scoped task collection, derived view and the single active modal
[POS]:    Controller layer - owns list state and dispatches row actions
[UPDATE]: When list behavior, role dispatch or modal wiring changes
*/

use std::sync::Arc;

use agrisync_adapter::{Task, TaskBackend, TaskStatusUpdate, User};
use tracing::{debug, info, warn};

use crate::event::{self, AppEvent, EventReceiver, RefreshNotifier};
use crate::form::TaskForm;
use crate::session::Session;
use crate::status_modal::{PendingStatusUpdate, StatusModal, SubmitOutcome};

pub const FETCH_ERROR: &str = "Failed to fetch tasks.";
pub const DELETE_ERROR: &str = "Failed to delete task.";
pub const EMPTY_MESSAGE: &str = "No tasks found.";

/// At most one of these is shown at a time
#[derive(Debug, Default)]
pub enum ActiveModal {
    #[default]
    None,
    Edit(Box<TaskForm>),
    StatusUpdate,
    ConfirmDelete(u64),
}

/// What the list area should show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskListView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Table(&'a [Task]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSubmitOutcome {
    Saved,
    /// Local checks failed; nothing was sent
    Invalid,
    Failed,
    Ignored,
}

pub struct TaskListController {
    backend: Arc<dyn TaskBackend>,
    session: Session,
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
    selected: usize,
    modal: ActiveModal,
    status_modal: StatusModal,
    events: EventReceiver,
}

impl TaskListController {
    /// The controller starts in the loading state; call
    /// [`fetch_tasks`](Self::fetch_tasks) to mount it
    pub fn new(backend: Arc<dyn TaskBackend>, session: Session) -> Self {
        let (tx, events) = event::channel();
        Self {
            backend,
            session,
            tasks: Vec::new(),
            loading: true,
            error: None,
            selected: 0,
            modal: ActiveModal::None,
            status_modal: StatusModal::new(RefreshNotifier::new(tx)),
            events,
        }
    }

    pub fn backend(&self) -> Arc<dyn TaskBackend> {
        Arc::clone(&self.backend)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> TaskListView<'_> {
        if self.loading {
            TaskListView::Loading
        } else if let Some(error) = &self.error {
            TaskListView::Error(error)
        } else if self.tasks.is_empty() {
            TaskListView::Empty
        } else {
            TaskListView::Table(&self.tasks)
        }
    }

    /// Row actions only apply to rows the table is showing
    pub fn rows_visible(&self) -> bool {
        matches!(self.view(), TaskListView::Table(_))
    }

    /// Read the task list for the active session; workers are scoped to
    /// their own assignments, admins see everything
    pub async fn fetch_tasks(&mut self) {
        self.loading = true;
        let scope = self.session.task_scope();
        debug!(assigned_to = ?scope, "fetching tasks");
        match self.backend.list_tasks(scope).await {
            Ok(tasks) => {
                info!(count = tasks.len(), "tasks loaded");
                self.tasks = tasks;
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch tasks");
                self.error = Some(FETCH_ERROR.to_string());
            }
        }
        self.loading = false;
        self.clamp_selection();
    }

    /// Clear any page-level error and refetch
    pub async fn refresh(&mut self) {
        self.error = None;
        self.fetch_tasks().await;
    }

    /// Switch the active user; open modals are dropped and the list refetched
    pub async fn set_user(&mut self, user: User) {
        info!(user_id = user.id, role = %user.role, "active user changed");
        self.session = Session::new(user);
        self.close_modal();
        self.refresh().await;
    }

    pub async fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::TasksChanged => self.fetch_tasks().await,
            AppEvent::UserChanged(user) => self.set_user(user).await,
        }
    }

    /// Handle every queued notification; returns how many were handled
    pub async fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event).await;
            handled += 1;
        }
        handled
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }

    pub fn modal(&self) -> &ActiveModal {
        &self.modal
    }

    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        match &mut self.modal {
            ActiveModal::Edit(form) => Some(form.as_mut()),
            _ => None,
        }
    }

    pub fn status_modal(&self) -> &StatusModal {
        &self.status_modal
    }

    pub fn status_modal_mut(&mut self) -> &mut StatusModal {
        &mut self.status_modal
    }

    /// Row edit action: admins get the full form, workers the status modal
    pub async fn edit_task(&mut self, task_id: u64) -> bool {
        if !self.rows_visible() {
            debug!(task_id, "edit ignored while the table is hidden");
            return false;
        }
        let Some(task) = self.tasks.iter().find(|task| task.id == task_id).cloned() else {
            warn!(task_id, "edit requested for unknown task");
            return false;
        };
        if self.session.is_admin() {
            let mut form = TaskForm::edit(&task);
            form.load_options(self.backend.as_ref()).await;
            self.modal = ActiveModal::Edit(Box::new(form));
        } else {
            self.status_modal.open(task);
            self.modal = ActiveModal::StatusUpdate;
        }
        true
    }

    pub async fn edit_selected(&mut self) -> bool {
        match self.selected_task().map(|task| task.id) {
            Some(task_id) => self.edit_task(task_id).await,
            None => false,
        }
    }

    /// Open a blank form (admin only)
    pub async fn open_create(&mut self) -> bool {
        if !self.session.is_admin() {
            warn!(user_id = self.session.user().id, "create is admin only");
            return false;
        }
        let mut form = TaskForm::create();
        form.load_options(self.backend.as_ref()).await;
        self.modal = ActiveModal::Edit(Box::new(form));
        true
    }

    /// Ask for delete confirmation (admin only)
    pub fn request_delete(&mut self, task_id: u64) -> bool {
        if !self.session.is_admin() {
            warn!(user_id = self.session.user().id, "delete is admin only");
            return false;
        }
        if !self.rows_visible() {
            debug!(task_id, "delete ignored while the table is hidden");
            return false;
        }
        if !self.tasks.iter().any(|task| task.id == task_id) {
            warn!(task_id, "delete requested for unknown task");
            return false;
        }
        self.modal = ActiveModal::ConfirmDelete(task_id);
        true
    }

    pub fn request_delete_selected(&mut self) -> bool {
        match self.selected_task().map(|task| task.id) {
            Some(task_id) => self.request_delete(task_id),
            None => false,
        }
    }

    /// Settle the delete confirmation; declining sends nothing
    pub async fn confirm_delete(&mut self, confirmed: bool) {
        let ActiveModal::ConfirmDelete(task_id) = self.modal else {
            return;
        };
        self.modal = ActiveModal::None;
        if !confirmed {
            debug!(task_id, "delete declined");
            return;
        }
        match self.backend.delete_task(task_id).await {
            Ok(()) => {
                info!(task_id, "task deleted");
                self.fetch_tasks().await;
            }
            Err(err) => {
                warn!(task_id, error = %err, "failed to delete task");
                self.error = Some(DELETE_ERROR.to_string());
            }
        }
    }

    /// Submit the edit form: PUT for an existing task, POST for a new one
    pub async fn submit_form(&mut self) -> FormSubmitOutcome {
        let ActiveModal::Edit(form) = &mut self.modal else {
            return FormSubmitOutcome::Ignored;
        };
        let Some(payload) = form.prepare() else {
            debug!("form has local errors");
            return FormSubmitOutcome::Invalid;
        };
        let result = match form.editing_id() {
            Some(task_id) => self.backend.replace_task(task_id, &payload).await,
            None => self.backend.create_task(&payload).await,
        };
        match result {
            Ok(task) => {
                info!(task_id = task.id, title = %task.title, "task saved");
                self.modal = ActiveModal::None;
                self.fetch_tasks().await;
                FormSubmitOutcome::Saved
            }
            Err(err) => {
                warn!(error = %err, "failed to save task");
                form.apply_error(&err);
                FormSubmitOutcome::Failed
            }
        }
    }

    /// First half of a status submission; the caller sends the request
    pub fn begin_status_submit(&mut self) -> Option<PendingStatusUpdate> {
        match self.modal {
            ActiveModal::StatusUpdate => self.status_modal.begin_submit(),
            _ => None,
        }
    }

    /// Second half of a status submission, then any refresh it asked for
    pub async fn finish_status_submit(
        &mut self,
        result: agrisync_adapter::Result<TaskStatusUpdate>,
    ) -> SubmitOutcome {
        let outcome = self.status_modal.finish_submit(result);
        if !self.status_modal.is_open() {
            self.modal = ActiveModal::None;
        }
        self.process_events().await;
        outcome
    }

    pub async fn submit_status(&mut self) -> SubmitOutcome {
        let Some(pending) = self.begin_status_submit() else {
            return SubmitOutcome::Ignored;
        };
        let result = self
            .backend
            .update_task_status(pending.task_id, pending.status)
            .await;
        self.finish_status_submit(result).await
    }

    /// Dismiss the active modal; an in-flight status request keeps it open
    pub fn close_modal(&mut self) {
        if self.status_modal.is_submitting() {
            return;
        }
        self.status_modal.close();
        self.modal = ActiveModal::None;
    }
}
