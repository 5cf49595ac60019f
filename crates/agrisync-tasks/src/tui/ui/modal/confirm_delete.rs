/*
[INPUT]:  Title of the task pending deletion
[OUTPUT]: Delete confirmation dialog rendering
[POS]:    TUI UI modal - delete confirmation
[UPDATE]: When the confirmation wording changes
*/

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::draw_frame;

pub(in crate::tui) fn draw_confirm_delete(frame: &mut ratatui::Frame, area: Rect, title: &str) {
    let inner = draw_frame(frame, area, "Delete Task", Color::Yellow);
    let content = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("Delete \"{title}\"?"),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            "Are you sure you want to delete this task?",
            Style::default().fg(Color::Cyan),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(
                "[y] ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Yes   "),
            Span::styled(
                "[n/Esc] ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("No"),
        ]),
    ];
    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, inner);
}
