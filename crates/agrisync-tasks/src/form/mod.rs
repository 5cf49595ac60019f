/*
[INPUT]:  Task being edited (or none), field descriptors, edit commands, backend errors
[OUTPUT]: TaskPayload for create/replace and field-level error state
[POS]:    Form layer - admin create/edit form for the task resource
[UPDATE]: When task fields or admin form behavior change
*/

mod field;
mod state;

pub use field::{
    DATE_FORMAT, FieldDescriptor, FieldInput, FieldKind, OptionSource, SelectOption,
};
pub use state::{FormErrors, FormState};

use agrisync_adapter::{
    AgrisyncError, NON_FIELD_ERRORS, Task, TaskBackend, TaskPayload, TaskStatus, endpoints,
};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const GENERIC_ERROR: &str = "An error occurred.";

/// Field list of the admin task form
pub fn task_form_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("title", "Task Title", FieldKind::Text)
            .placeholder("e.g., Water the tomatoes")
            .required(),
        FieldDescriptor::new("description", "Description", FieldKind::TextArea)
            .placeholder("Detailed instructions"),
        FieldDescriptor::new(
            "assigned_to_id",
            "Assign To",
            FieldKind::RemoteSelect {
                source: OptionSource::new(endpoints::USERS, "id", "username"),
                options: Vec::new(),
            },
        )
        .placeholder("Select User (Optional)"),
        FieldDescriptor::new("due_date", "Due Date", FieldKind::Date).required(),
        FieldDescriptor::new(
            "status",
            "Status",
            FieldKind::Select {
                options: TaskStatus::ALL
                    .iter()
                    .map(|status| SelectOption::new(status.as_str(), status.label()))
                    .collect(),
            },
        )
        .required(),
    ]
}

/// Admin form for creating a task or replacing an existing one
#[derive(Debug, Clone)]
pub struct TaskForm {
    editing: Option<u64>,
    fields: Vec<FieldDescriptor>,
    state: FormState,
    focus: usize,
}

impl TaskForm {
    /// Blank form; status defaults to `todo`
    pub fn create() -> Self {
        Self {
            editing: None,
            fields: task_form_fields(),
            state: FormState::from_values([
                ("title", ""),
                ("description", ""),
                ("due_date", ""),
                ("status", TaskStatus::Todo.as_str()),
                ("assigned_to_id", ""),
            ]),
            focus: 0,
        }
    }

    /// Form pre-populated from an existing task
    pub fn edit(task: &Task) -> Self {
        let assigned_to_id = task
            .assigned_to
            .as_ref()
            .map(|user| user.id.to_string())
            .unwrap_or_default();
        Self {
            editing: Some(task.id),
            fields: task_form_fields(),
            state: FormState::from_values([
                ("title", task.title.clone()),
                ("description", task.description.clone()),
                ("due_date", task.due_date.format(DATE_FORMAT).to_string()),
                ("status", task.status.as_str().to_string()),
                ("assigned_to_id", assigned_to_id),
            ]),
            focus: 0,
        }
    }

    /// Id of the task being replaced; `None` for a new task
    pub fn editing_id(&self) -> Option<u64> {
        self.editing
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Task"
        } else {
            "Create New Task"
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn errors(&self) -> &FormErrors {
        &self.state.errors
    }

    pub fn value(&self, key: &str) -> &str {
        self.state.get(key)
    }

    /// Set one field; unknown keys are rejected
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) -> bool {
        if self.fields.iter().any(|field| field.key == key) {
            self.state.set(key, value);
            true
        } else {
            false
        }
    }

    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&FieldDescriptor> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Route an edit command to the focused field's kind
    pub fn input(&mut self, input: FieldInput) -> bool {
        let Some(field) = self.fields.get(self.focus) else {
            return false;
        };
        field.kind.edit(self.state.value_mut(&field.key), input)
    }

    /// Load options of every related-entity select; a failed source leaves
    /// its select empty
    pub async fn load_options(&mut self, backend: &dyn TaskBackend) {
        for field in self.fields.iter_mut() {
            let FieldKind::RemoteSelect { source, options } = &mut field.kind else {
                continue;
            };
            match backend.fetch_options(&source.endpoint).await {
                Ok(items) => {
                    *options = source.to_options(&items);
                    debug!(field = %field.key, count = options.len(), "select options loaded");
                }
                Err(err) => {
                    warn!(field = %field.key, endpoint = %source.endpoint, error = %err, "failed to load select options");
                }
            }
        }
    }

    /// Check required fields and extract every value; on success the typed
    /// payload is returned, otherwise the errors are left on the form
    pub fn prepare(&mut self) -> Option<TaskPayload> {
        self.state.errors.clear();
        let mut body = Map::new();
        for field in &self.fields {
            let raw = self.state.get(&field.key);
            if field.required && raw.trim().is_empty() {
                self.state.errors.add_field(&field.key, REQUIRED_MESSAGE);
                continue;
            }
            match field.kind.extract(raw) {
                Ok(value) => {
                    body.insert(field.key.clone(), value);
                }
                Err(message) => self.state.errors.add_field(&field.key, message),
            }
        }
        if !self.state.errors.is_empty() {
            return None;
        }
        match serde_json::from_value(Value::Object(body)) {
            Ok(payload) => Some(payload),
            Err(err) => {
                self.state
                    .errors
                    .add_general(format!("Invalid form data: {err}"));
                None
            }
        }
    }

    /// Map a failed submission back onto the form
    pub fn apply_error(&mut self, err: &AgrisyncError) {
        let errors = &mut self.state.errors;
        errors.clear();
        if let Some(detail) = err.detail() {
            errors.add_general(detail);
        }
        if let Some(fields) = err.field_errors() {
            for (key, messages) in fields {
                if self.fields.iter().any(|field| field.key == *key) {
                    errors.fields.insert(key.clone(), messages.clone());
                } else if key == NON_FIELD_ERRORS {
                    errors.add_general(messages.join(" "));
                } else {
                    errors.add_general(format!("{key}: {}", messages.join(" ")));
                }
            }
        }
        if errors.is_empty() {
            errors.add_general(GENERIC_ERROR);
        }
    }
}
