/*
[INPUT]:  Crossterm key events
[OUTPUT]: Controller actions for the task screen and its modals
[POS]:    TUI key routing
[UPDATE]: When changing keybindings
*/

use agrisync_tasks::form::FieldInput;
use agrisync_tasks::status_modal::PendingStatusUpdate;
use agrisync_tasks::{ActiveModal, FormSubmitOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::AppState;

pub(super) enum KeyOutcome {
    Continue,
    Quit,
    /// The status modal entered its submitting phase; send this request
    SubmitStatus(PendingStatusUpdate),
}

/// Handles key events for the TUI.
pub(super) async fn handle_key_event(app: &mut AppState, key: KeyEvent) -> KeyOutcome {
    match app.controller.modal() {
        ActiveModal::None => handle_list_key(app, key.code).await,
        ActiveModal::Edit(_) => {
            handle_form_key(app, key).await;
            KeyOutcome::Continue
        }
        ActiveModal::StatusUpdate => handle_status_key(app, key.code),
        ActiveModal::ConfirmDelete(_) => {
            handle_confirm_key(app, key.code).await;
            KeyOutcome::Continue
        }
    }
}

async fn handle_list_key(app: &mut AppState, key: KeyCode) -> KeyOutcome {
    let admin = app.controller.session().is_admin();
    match key {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Up | KeyCode::Char('k') => app.controller.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.controller.select_next(),
        KeyCode::Char('r') => {
            app.controller.refresh().await;
            app.status_message = "refreshed".to_string();
        }
        KeyCode::Char('l') => app.toggle_logs(),
        KeyCode::Char('e') | KeyCode::Enter => {
            if !app.controller.edit_selected().await {
                app.status_message = no_row_message(app);
            }
        }
        KeyCode::Char('n') if admin => {
            app.controller.open_create().await;
        }
        KeyCode::Char('d') if admin => {
            if !app.controller.request_delete_selected() {
                app.status_message = no_row_message(app);
            }
        }
        KeyCode::Char('n') | KeyCode::Char('d') => {
            app.status_message = "only admins can create or delete tasks".to_string();
        }
        _ => {}
    }
    KeyOutcome::Continue
}

fn no_row_message(app: &AppState) -> String {
    if app.controller.rows_visible() {
        "no task selected".to_string()
    } else {
        "press r to reload the list".to_string()
    }
}

async fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.controller.close_modal();
        app.status_message = "edit cancelled".to_string();
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        app.status_message = match app.controller.submit_form().await {
            FormSubmitOutcome::Saved => "task saved".to_string(),
            FormSubmitOutcome::Invalid => "fix the highlighted fields".to_string(),
            FormSubmitOutcome::Failed => "save failed".to_string(),
            FormSubmitOutcome::Ignored => return,
        };
        return;
    }

    let Some(form) = app.controller.form_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
        KeyCode::Right => {
            form.input(FieldInput::Next);
        }
        KeyCode::Left => {
            form.input(FieldInput::Previous);
        }
        KeyCode::Enter => {
            form.input(FieldInput::Newline);
        }
        KeyCode::Backspace => {
            form.input(FieldInput::Backspace);
        }
        KeyCode::Delete => {
            form.input(FieldInput::Clear);
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.input(FieldInput::Char(ch));
        }
        _ => {}
    }
}

fn handle_status_key(app: &mut AppState, key: KeyCode) -> KeyOutcome {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.controller.status_modal_mut().move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.controller.status_modal_mut().move_selection(1),
        KeyCode::Enter => {
            if let Some(pending) = app.controller.begin_status_submit() {
                return KeyOutcome::SubmitStatus(pending);
            }
        }
        KeyCode::Esc => app.controller.close_modal(),
        _ => {}
    }
    KeyOutcome::Continue
}

async fn handle_confirm_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.controller.confirm_delete(true).await;
            app.status_message = match app.controller.error() {
                Some(error) => error.to_string(),
                None => "task deleted".to_string(),
            };
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.controller.confirm_delete(false).await;
            app.status_message = "delete cancelled".to_string();
        }
        _ => {}
    }
}
