//! Chat panel widget for the TUI.
//!
//! Displays the active thread's messages with their times, under a day
//! label for the most recent message.

use crate::store::{day_label, Message, Role, Thread};
use crate::tui::text::wrap;
use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Chat panel widget.
pub struct ChatPanel<'a> {
    thread: &'a Thread,
    focused: bool,
    /// Lines scrolled up from the bottom.
    scroll: usize,
    now: DateTime<Local>,
}

impl<'a> ChatPanel<'a> {
    pub fn new(thread: &'a Thread, focused: bool, scroll: usize, now: DateTime<Local>) -> Self {
        Self {
            thread,
            focused,
            scroll,
            now,
        }
    }

    fn role_style(role: Role) -> Style {
        match role {
            Role::User => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            Role::Assistant => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }

    fn message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(vec![
            Span::styled(message.role().label(), Self::role_style(message.role())),
            Span::styled(
                format!("  {}", message.time_label()),
                Style::default().fg(Color::DarkGray),
            ),
        ])];
        lines.extend(
            wrap(message.content(), width.saturating_sub(2))
                .into_iter()
                .map(|l| Line::from(format!("  {l}"))),
        );
        lines
    }

    /// All lines of the conversation at the given content width.
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if let Some(last) = self.thread.last_message() {
            let label = day_label(last.created_at(), self.now);
            lines.push(
                Line::from(Span::styled(
                    format!("── {label} ──"),
                    Style::default().fg(Color::DarkGray),
                ))
                .centered(),
            );
        }

        for message in self.thread.messages() {
            lines.push(Line::from(""));
            lines.extend(Self::message_lines(message, width));
        }
        lines
    }
}

impl Widget for ChatPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.thread.title()));
        let inner = block.inner(area);

        let lines = self.lines(inner.width as usize);
        let visible = inner.height as usize;
        let max_scroll = lines.len().saturating_sub(visible);
        let top = max_scroll - self.scroll.min(max_scroll);

        Paragraph::new(lines)
            .block(block)
            .scroll((top.min(u16::MAX as usize) as u16, 0))
            .render(area, buf);
    }
}
