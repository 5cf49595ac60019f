/*
[INPUT]:  Admin TaskForm with field descriptors, values and errors
[OUTPUT]: Edit/create task modal rendering
[POS]:    TUI UI modal - admin task form
[UPDATE]: When field kinds or form layout change
*/

use agrisync_tasks::TaskForm;
use agrisync_tasks::form::{FieldDescriptor, FieldKind};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{draw_frame, error_lines, label_line};

fn value_lines(field: &FieldDescriptor, value: &str, focused: bool) -> Vec<Line<'static>> {
    let cursor = if focused && !matches!(
        field.kind,
        FieldKind::Select { .. } | FieldKind::RemoteSelect { .. }
    ) {
        "_"
    } else {
        ""
    };
    let Some(display) = field.kind.display(value) else {
        return vec![Line::from(vec![
            Span::raw("  "),
            Span::styled(field.placeholder_text(), Style::default().fg(Color::DarkGray)),
            Span::raw(cursor),
        ])];
    };

    let mut lines: Vec<Line<'static>> = display
        .split('\n')
        .map(|line| Line::from(format!("  {line}")))
        .collect();
    if let Some(options) = field.kind.options() {
        let hint = format!("  < {} option(s) >", options.len());
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        }
    } else if let Some(last) = lines.last_mut() {
        last.spans.push(Span::raw(cursor));
    }
    lines
}

pub(in crate::tui) fn draw_edit_task(frame: &mut ratatui::Frame, area: Rect, form: &TaskForm) {
    let inner = draw_frame(frame, area, form.title(), Color::Cyan);
    let errors = form.errors();

    let mut lines = Vec::new();
    if let Some(general) = errors.general.as_deref() {
        lines.extend(error_lines([general]));
        lines.push(Line::default());
    }
    for (index, field) in form.fields().iter().enumerate() {
        let focused = index == form.focus_index();
        lines.push(label_line(&field.label, field.required, focused));
        lines.extend(value_lines(field, form.value(&field.key), focused));
        if let Some(messages) = errors.field(&field.key) {
            lines.extend(error_lines(messages.iter().map(String::as_str)));
        }
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "[Ctrl-S] Save   [Esc] Cancel",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
