/*
[INPUT]:  Public API exports for the agrisync-tasks crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod event;
pub mod form;
pub mod session;
pub mod status_modal;
pub mod task_list;

// Re-export main types for convenience
pub use config::AppConfig;
pub use event::{AppEvent, RefreshNotifier};
pub use form::TaskForm;
pub use session::Session;
pub use status_modal::{StatusModal, SubmitOutcome};
pub use task_list::{ActiveModal, FormSubmitOutcome, TaskListController, TaskListView};
