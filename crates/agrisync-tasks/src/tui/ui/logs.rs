/*
[INPUT]:  LogBufferHandle tail for UI
[OUTPUT]: Log panel rendered into Ratatui frame
[POS]:    TUI UI logs panel rendering
[UPDATE]: When changing log panel presentation
*/

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::LogBufferHandle;
use crate::tui::runtime::{border_style, lock_buffer};

fn level_style(line: &str) -> Style {
    if line.contains("ERROR") {
        Style::default().fg(Color::LightRed)
    } else if line.contains("WARN") {
        Style::default().fg(Color::Yellow)
    } else if line.contains("DEBUG") || line.contains("TRACE") {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

pub(in crate::tui) fn draw_logs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    buffer: &LogBufferHandle,
) {
    let available = area.height.saturating_sub(2) as usize;
    let (lines, total) = {
        let guard = lock_buffer(buffer);
        (guard.tail(available), guard.len())
    };

    let text = lines
        .into_iter()
        .map(|line| {
            let style = level_style(&line);
            Line::from(Span::styled(line, style))
        })
        .collect::<Vec<_>>();
    let log_widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(format!("Logs ({total})")),
    );
    frame.render_widget(log_widget, area);
}
