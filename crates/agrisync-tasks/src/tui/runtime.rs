/*
[INPUT]:  TaskListController, log buffer, terminal key events
[OUTPUT]: Ratatui-based TUI run loop, rendering, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::fmt::MakeWriter;

use agrisync_tasks::{ActiveModal, TaskListController};

use super::app::AppState;
use super::events::{KeyOutcome, handle_key_event};
use super::terminal::TerminalGuard;
use super::ui::modal::{draw_confirm_delete, draw_edit_task, draw_update_status};
use super::ui::{draw_footer, draw_header, draw_logs, draw_task_table};

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub(crate) const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Last `count` lines, oldest first
    pub fn tail(&self, count: usize) -> Vec<String> {
        let start = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(start).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

pub(crate) fn lock_buffer(buffer: &LogBufferHandle) -> MutexGuard<'_, LogBuffer> {
    buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// `MakeWriter` that feeds formatted log lines into a [`LogBuffer`]
#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial.drain(..=pos);
            lock_buffer(&self.buffer).push_line(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            lock_buffer(&self.buffer).push_line(line);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

enum UiEvent {
    Input(CrosstermEvent),
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Green)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn key_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn error_style() -> Style {
    Style::default()
        .fg(Color::LightRed)
        .add_modifier(Modifier::BOLD)
}

pub async fn run_tui(controller: TaskListController, log_buffer: LogBufferHandle) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    if event_tx.send(UiEvent::Input(event)).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut app = AppState::new(controller, log_buffer);
    terminal.draw(|frame| draw_ui(frame, &mut app))?;
    app.controller.fetch_tasks().await;
    info!(
        user = %app.controller.session().user().username,
        role = %app.controller.session().role(),
        "task screen mounted"
    );

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => {
                app.controller.process_events().await;
            }
            maybe_event = event_rx.recv() => {
                let Some(UiEvent::Input(event)) = maybe_event else {
                    break;
                };
                if let CrosstermEvent::Key(key) = event {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match handle_key_event(&mut app, key).await {
                        KeyOutcome::Quit => should_quit = true,
                        KeyOutcome::Continue => {}
                        KeyOutcome::SubmitStatus(pending) => {
                            // Draw the "Saving..." state before awaiting the request
                            terminal.draw(|frame| draw_ui(frame, &mut app))?;
                            debug!(task_id = pending.task_id, status = %pending.status, "sending status update");
                            let result = app
                                .controller
                                .backend()
                                .update_task_status(pending.task_id, pending.status)
                                .await;
                            app.settle_status_submit(result).await;
                        }
                    }
                }
            }
        }

        app.sync_selection();
        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(area);

    draw_header(frame, layout[0], app);

    if app.show_logs {
        let content = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(layout[1]);
        draw_task_table(frame, content[0], app);
        draw_logs(frame, content[1], &app.log_buffer);
    } else {
        draw_task_table(frame, layout[1], app);
    }

    draw_footer(frame, layout[2], app);

    match app.controller.modal() {
        ActiveModal::None => {}
        ActiveModal::Edit(form) => {
            draw_edit_task(frame, centered_rect(area, 70, 80), form);
        }
        ActiveModal::StatusUpdate => {
            draw_update_status(frame, centered_rect(area, 60, 60), app.controller.status_modal());
        }
        ActiveModal::ConfirmDelete(task_id) => {
            let title = app
                .controller
                .tasks()
                .iter()
                .find(|task| task.id == *task_id)
                .map(|task| task.title.as_str())
                .unwrap_or("this task");
            draw_confirm_delete(frame, centered_rect(area, 50, 30), title);
        }
    }
}

pub(crate) fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
