/*
[INPUT]:  TaskListController and the log buffer installed by main
[OUTPUT]: Ratatui-based task screen with role-aware modals and a logs panel
[POS]:    TUI module for the agrisync-tasks binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub(crate) use runtime::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory, run_tui};
