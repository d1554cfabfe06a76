//! Thread sidebar widget for the TUI.
//!
//! Lists threads newest first, marks the active one and the cursor, and
//! shows the rename editor inline.

use crate::store::{truncate_title, Thread};
use crate::tui::app::InputState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Longest title shown before truncation.
pub const TITLE_MAX_CHARS: usize = 30;

/// Sidebar widget listing threads.
pub struct Sidebar<'a> {
    threads: &'a [Thread],
    active: usize,
    cursor: usize,
    focused: bool,
    /// Row being renamed and its edit buffer.
    rename: Option<(usize, &'a InputState)>,
}

impl<'a> Sidebar<'a> {
    pub fn new(threads: &'a [Thread], active: usize, cursor: usize, focused: bool) -> Self {
        Self {
            threads,
            active,
            cursor,
            focused,
            rename: None,
        }
    }

    pub fn renaming(mut self, row: usize, input: &'a InputState) -> Self {
        self.rename = Some((row, input));
        self
    }

    fn hint(&self) -> &'static str {
        if self.rename.is_some() {
            "Enter save · Esc cancel"
        } else if self.threads.len() > 1 {
            "n new · r rename · d delete"
        } else {
            "n new · r rename"
        }
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Threads ({}) ", self.threads.len()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        // Keep the cursor row visible, leaving the last row for the hint.
        let list_height = inner.height.saturating_sub(1).max(1) as usize;
        let first = self.cursor.saturating_sub(list_height.saturating_sub(1));

        let mut lines: Vec<Line> = self
            .threads
            .iter()
            .enumerate()
            .skip(first)
            .take(list_height)
            .map(|(index, thread)| {
                let marker = if self.focused && index == self.cursor {
                    "▸ "
                } else {
                    "  "
                };

                if let Some((row, input)) = self.rename {
                    if row == index {
                        return Line::from(vec![
                            Span::raw(marker),
                            Span::styled(
                                format!("{}▏", input.text),
                                Style::default().fg(Color::Yellow),
                            ),
                        ]);
                    }
                }

                let mut style = Style::default();
                if index == self.active {
                    style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                }
                if self.focused && index == self.cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(truncate_title(thread.title(), TITLE_MAX_CHARS), style),
                ])
            })
            .collect();

        while lines.len() < list_height {
            lines.push(Line::from(""));
        }
        if self.focused {
            lines.push(Line::from(Span::styled(
                self.hint(),
                Style::default().fg(Color::DarkGray),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
