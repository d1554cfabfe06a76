//! Transient notification drawn over the bottom of the screen.

use crate::tui::app::{Toast, ToastKind};
use crate::tui::text::ellipsize;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

const MIN_WIDTH: u16 = 16;

/// Draws a [`Toast`] centred just above the bottom edge.
pub struct ToastPopup<'a> {
    toast: &'a Toast,
}

impl<'a> ToastPopup<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }

    /// Wide enough for the message, never wider than the screen.
    pub fn area(&self, screen: Rect) -> Rect {
        let wanted = u16::try_from(self.toast.message.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let width = wanted
            .clamp(MIN_WIDTH, screen.width.saturating_sub(2).max(MIN_WIDTH))
            .min(screen.width);
        let height = 3.min(screen.height);
        let x = screen.x + (screen.width - width) / 2;
        let y = screen.bottom().saturating_sub(height + 1).max(screen.y);
        Rect::new(x, y, width, height)
    }
}

impl Widget for ToastPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (color, title) = match self.toast.kind {
            ToastKind::Done => (Color::Green, " ✓ "),
            ToastKind::Failed => (Color::Red, " ✗ "),
        };

        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(title)
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(area);

        Paragraph::new(ellipsize(&self.toast.message, inner.width as usize))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}
