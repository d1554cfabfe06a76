//! Schema panel widget for the TUI.
//!
//! Shows the bundle on display in three tabs: the SQL schema, the rendered
//! ER diagram and the example queries.

use crate::display::{SchemaTab, SchemaView};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Widget},
};

/// Text of the panel when nothing has been generated.
pub const EMPTY_TITLE: &str = "No Schema Generated Yet";
const EMPTY_HINT: &str = "Describe your project in the chat to get started.";

/// Schema panel widget.
pub struct SchemaPanel<'a> {
    view: &'a SchemaView,
    focused: bool,
}

impl<'a> SchemaPanel<'a> {
    pub fn new(view: &'a SchemaView, focused: bool) -> Self {
        Self { view, focused }
    }

    fn content_lines(&self) -> Vec<Line<'static>> {
        let Some(bundle) = self.view.bundle() else {
            return Vec::new();
        };

        match self.view.tab() {
            SchemaTab::Sql => bundle.sql.lines().map(|l| Line::from(l.to_string())).collect(),
            SchemaTab::Diagram => match self.view.diagram() {
                Some(diagram) => {
                    let style = if diagram.is_fallback() {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    diagram
                        .lines()
                        .into_iter()
                        .map(|l| Line::from(Span::styled(l, style)))
                        .collect()
                }
                None => Vec::new(),
            },
            SchemaTab::Queries => {
                let mut lines = Vec::new();
                for (index, query) in bundle.queries.iter().enumerate() {
                    let selected = index == self.view.selected_query();
                    let header_style = if selected {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Cyan)
                    };
                    if index > 0 {
                        lines.push(Line::from(""));
                    }
                    lines.push(Line::from(Span::styled(
                        format!(" Query {} ", index + 1),
                        header_style,
                    )));
                    lines.extend(query.lines().map(|l| Line::from(format!("  {l}"))));
                }
                lines
            }
        }
    }

    /// First line to show so the selected query header stays on screen.
    fn query_scroll(&self, height: usize) -> usize {
        let Some(bundle) = self.view.bundle() else {
            return 0;
        };
        let mut start = 0;
        for (index, query) in bundle.queries.iter().enumerate() {
            if index == self.view.selected_query() {
                break;
            }
            start += query.lines().count() + 2;
        }
        start.saturating_sub(height / 3)
    }
}

impl Widget for SchemaPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let title = match self.view.bundle() {
            Some(bundle) => format!(" Schema · {} ", bundle.key),
            None => " Schema ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.view.bundle().is_none() {
            let top = inner.height.saturating_sub(2) / 2;
            let lines = vec![
                Line::from(Span::styled(
                    EMPTY_TITLE,
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(EMPTY_HINT, Style::default().fg(Color::DarkGray))),
            ];
            let area = Rect::new(inner.x, inner.y + top, inner.width, inner.height - top);
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        let tabs = self.view.available_tabs();
        let selected = tabs.iter().position(|t| *t == self.view.tab()).unwrap_or(0);
        let titles: Vec<Line> = tabs
            .iter()
            .enumerate()
            .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
            .collect();
        Tabs::new(titles)
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("|")
            .render(layout[0], buf);

        let content = layout[1];
        let scroll = match self.view.tab() {
            SchemaTab::Queries => self.query_scroll(content.height as usize),
            _ => self.view.scroll() as usize,
        };
        let mut lines = self.content_lines();
        if self.focused {
            let hint = match self.view.tab() {
                SchemaTab::Queries => "c copy query · s save query",
                _ => "c copy SQL · s save schema.sql",
            };
            lines.insert(0, Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));
        }

        Paragraph::new(lines)
            .scroll((scroll.min(u16::MAX as usize) as u16, 0))
            .render(content, buf);
    }
}
