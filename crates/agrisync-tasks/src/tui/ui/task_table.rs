/*
[INPUT]:  TaskListController view and table selection
[OUTPUT]: Task table, or a loading, error or empty placeholder
[POS]:    TUI UI main task list
[UPDATE]: When task columns change
*/

use agrisync_adapter::{Task, TaskStatus};
use agrisync_tasks::TaskListView;
use agrisync_tasks::form::DATE_FORMAT;
use agrisync_tasks::task_list::EMPTY_MESSAGE;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, error_style, header_style};

const UNASSIGNED: &str = "Unassigned";

fn status_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::Todo => Style::default().fg(Color::Yellow),
        TaskStatus::InProgress => Style::default().fg(Color::LightBlue),
        TaskStatus::Done => Style::default().fg(Color::LightGreen),
    }
}

fn task_row(task: &Task) -> Row<'_> {
    Row::new(vec![
        Cell::from(task.title.as_str()),
        Cell::from(task.assignee_name().unwrap_or(UNASSIGNED)),
        Cell::from(task.due_date.format(DATE_FORMAT).to_string()),
        Cell::from(task.status.label()).style(status_style(task.status)),
    ])
}

pub(in crate::tui) fn draw_task_table(frame: &mut ratatui::Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Tasks");

    let placeholder = match app.controller.view() {
        TaskListView::Loading => Some(Paragraph::new("Loading tasks...")),
        TaskListView::Error(message) => {
            Some(Paragraph::new(message.to_string()).style(error_style()))
        }
        TaskListView::Empty => Some(Paragraph::new(EMPTY_MESSAGE)),
        TaskListView::Table(_) => None,
    };
    if let Some(paragraph) = placeholder {
        frame.render_widget(paragraph.alignment(Alignment::Center).block(block), area);
        return;
    }

    let header = Row::new(vec!["Title", "Assigned To", "Due Date", "Status"]).style(header_style());
    let rows = app.controller.tasks().iter().map(task_row);
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");
    frame.render_stateful_widget(table, area, &mut app.table_state);
}
