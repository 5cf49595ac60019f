/*
[INPUT]:  Active session, modal state and status message
[OUTPUT]: Header bar and role-aware hotkey footer
[POS]:    TUI UI chrome around the task table
[UPDATE]: When keybindings change
*/

use agrisync_adapter::Role;
use agrisync_tasks::ActiveModal;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, header_style, key_style};

pub(in crate::tui) fn draw_header(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let user = app.controller.session().user();
    let role = match user.role {
        Role::Admin => "Admin",
        Role::Worker => "Worker",
    };
    let line = Line::from(vec![
        Span::styled(" AgriSync Tasks ", header_style()),
        Span::raw("  "),
        Span::styled(user.username.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" ({role})  ")),
        Span::raw(format!("{} task(s)", app.controller.tasks().len())),
    ]);
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );
    frame.render_widget(widget, area);
}

fn hotkey(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [Span::styled(key, key_style()), Span::raw(label)]
}

fn hotkeys(app: &AppState) -> Vec<Span<'static>> {
    let pairs: Vec<[Span<'static>; 2]> = match app.controller.modal() {
        ActiveModal::None => {
            let admin = app.controller.session().is_admin();
            let rows = app.controller.rows_visible();
            let mut pairs = Vec::new();
            if rows {
                pairs.push(hotkey("[Up/Down]", " Select  "));
                pairs.push(hotkey("[e]", if admin { " Edit  " } else { " Update Status  " }));
            }
            if admin {
                pairs.push(hotkey("[n]", " New  "));
                if rows {
                    pairs.push(hotkey("[d]", " Delete  "));
                }
            }
            pairs.push(hotkey("[r]", " Refresh  "));
            pairs.push(hotkey("[l]", " Logs  "));
            pairs.push(hotkey("[q]", " Quit"));
            pairs
        }
        ActiveModal::Edit(_) => vec![
            hotkey("[Tab/Shift-Tab]", " Field  "),
            hotkey("[Left/Right]", " Choose  "),
            hotkey("[Ctrl-S]", " Save  "),
            hotkey("[Esc]", " Cancel"),
        ],
        ActiveModal::StatusUpdate => vec![
            hotkey("[Up/Down]", " Status  "),
            hotkey("[Enter]", " Save  "),
            hotkey("[Esc]", " Cancel"),
        ],
        ActiveModal::ConfirmDelete(_) => vec![
            hotkey("[y]", " Delete  "),
            hotkey("[n/Esc]", " Keep"),
        ],
    };
    pairs.into_iter().flatten().collect()
}

pub(in crate::tui) fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let status = Line::from(Span::raw(format!("Status: {}", app.status_message)));
    let text = Text::from(vec![Line::from(hotkeys(app)), status]);
    let widget = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Hotkeys"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use agrisync_adapter::{BackendOp, MockTaskBackend, Task, TaskStatus, User};
    use agrisync_tasks::{Session, TaskListController};
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::tui::{LOG_BUFFER_CAPACITY, LogBuffer};

    async fn app_for(role: Role, backend: Arc<MockTaskBackend>) -> AppState {
        let session = Session::new(User {
            id: 1,
            username: "root".to_string(),
            email: None,
            role,
        });
        let mut controller = TaskListController::new(backend, session);
        controller.fetch_tasks().await;
        AppState::new(
            controller,
            Arc::new(Mutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY))),
        )
    }

    fn footer_text(app: &AppState) -> String {
        hotkeys(app).iter().map(|span| span.content.as_ref()).collect()
    }

    fn one_task() -> Vec<Task> {
        vec![Task {
            id: 1,
            title: "Water".to_string(),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            status: TaskStatus::Todo,
            assigned_to: None,
            created_at: None,
        }]
    }

    #[tokio::test]
    async fn admin_footer_lists_row_actions_with_table() {
        let app = app_for(Role::Admin, Arc::new(MockTaskBackend::new(one_task()))).await;
        let text = footer_text(&app);
        assert!(text.contains("[e] Edit"));
        assert!(text.contains("[d] Delete"));
        assert!(text.contains("[n] New"));
    }

    #[tokio::test]
    async fn footer_hides_row_actions_behind_page_error() {
        let backend = Arc::new(MockTaskBackend::new(one_task()));
        let mut app = app_for(Role::Admin, backend.clone()).await;
        backend.fail(BackendOp::ListTasks, 500, json!({}));
        app.controller.fetch_tasks().await;

        let text = footer_text(&app);
        assert!(!text.contains("[e]"));
        assert!(!text.contains("[d]"));
        assert!(text.contains("[r] Refresh"));
    }

    #[tokio::test]
    async fn worker_footer_offers_status_update_only() {
        let app = app_for(Role::Worker, Arc::new(MockTaskBackend::new(one_task()))).await;
        let text = footer_text(&app);
        assert!(text.contains("[e] Update Status"));
        assert!(!text.contains("[n]"));
        assert!(!text.contains("[d]"));
    }
}
