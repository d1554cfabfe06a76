//! Input widget for the TUI.
//!
//! Single-line message entry with horizontal scrolling and a placeholder.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PLACEHOLDER: &str = "Describe the database you need...";

/// Calculates the scroll offset needed to keep the cursor visible.
///
/// Returns the number of characters to skip from the start of the text.
pub fn calculate_scroll_offset(cursor: usize, available_width: usize) -> usize {
    cursor.saturating_sub(available_width)
}

/// Input bar widget.
pub struct InputBar<'a> {
    text: &'a str,
    cursor: usize,
    focused: bool,
    generating: bool,
}

impl<'a> InputBar<'a> {
    pub fn new(text: &'a str, cursor: usize, focused: bool, generating: bool) -> Self {
        Self {
            text,
            cursor,
            focused,
            generating,
        }
    }

    /// Columns available for text inside the border and prompt.
    pub fn available_width(area: Rect) -> usize {
        // Border left (1) + prompt "> " (2) + border right (1) + cursor space (1) = 5
        area.width.saturating_sub(5) as usize
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let title = if self.generating {
            " Message (generating...) "
        } else {
            " Message "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        let prompt_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        let body = if self.text.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            let offset = calculate_scroll_offset(self.cursor, Self::available_width(area));
            Span::raw(self.text.chars().skip(offset).collect::<String>())
        };

        Paragraph::new(Line::from(vec![Span::styled("> ", prompt_style), body]))
            .block(block)
            .render(area, buf);
    }
}
