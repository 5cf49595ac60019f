/*
[INPUT]:  StatusModal for one task
[OUTPUT]: Worker status modal rendering
[POS]:    TUI UI modal - status-only update
[UPDATE]: When the status modal layout changes
*/

use agrisync_adapter::TaskStatus;
use agrisync_tasks::StatusModal;
use agrisync_tasks::form::DATE_FORMAT;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{draw_frame, error_lines, label_line};

pub(in crate::tui) fn draw_update_status(frame: &mut ratatui::Frame, area: Rect, modal: &StatusModal) {
    let Some(task) = modal.visible_task() else {
        return;
    };
    let inner = draw_frame(frame, area, "Update Task Status", Color::Yellow);

    let dim = Style::default().fg(Color::Gray);
    let mut lines = vec![
        Line::from(Span::styled(
            task.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            if task.description.is_empty() {
                "No description.".to_string()
            } else {
                task.description.clone()
            },
            dim,
        )),
        Line::from(Span::styled(
            format!("Due: {}", task.due_date.format(DATE_FORMAT)),
            dim,
        )),
        Line::default(),
        label_line("Status", true, true),
    ];

    for status in TaskStatus::ALL {
        let selected = status == modal.selected();
        let marker = if selected { "(*)" } else { "( )" };
        let style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("  {marker} {}", status.label()),
            style,
        )));
    }
    lines.push(Line::default());

    if let Some(error) = modal.error() {
        lines.extend(error_lines([error]));
        lines.push(Line::default());
    }

    let submit_style = if modal.is_submitting() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(vec![
        Span::styled(format!("[Enter] {}", modal.submit_label()), submit_style),
        Span::raw("   [Esc] Cancel"),
    ]));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
