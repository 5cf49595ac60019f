/*
[INPUT]:  Modal state from the controller (form, status modal, pending delete)
[OUTPUT]: Modal overlays drawn above the task table
[POS]:    TUI UI modal module root
[UPDATE]: When adding a modal or changing the modal frame
*/

mod confirm_delete;
mod edit_task;
mod update_status;

pub(in crate::tui) use confirm_delete::draw_confirm_delete;
pub(in crate::tui) use edit_task::draw_edit_task;
pub(in crate::tui) use update_status::draw_update_status;

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear};

use crate::tui::runtime::error_style;

/// Clear `area` and draw the modal frame; returns the inner area
fn draw_frame(frame: &mut ratatui::Frame, area: Rect, title: &str, accent: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn label_line(label: &str, required: bool, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut spans = vec![Span::styled(label.to_string(), style)];
    if required {
        spans.push(Span::styled(" *", Style::default().fg(Color::LightRed)));
    }
    Line::from(spans)
}

fn error_lines<'a>(messages: impl IntoIterator<Item = &'a str>) -> Vec<Line<'static>> {
    messages
        .into_iter()
        .flat_map(|message| message.lines().map(str::to_string).collect::<Vec<_>>())
        .map(|message| Line::from(Span::styled(message, error_style())))
        .collect()
}
