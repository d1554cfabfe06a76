//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components.

use super::app::{App, Focus};
use super::widgets::{chat, header, input, schema, sidebar, toast};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Width of the thread sidebar, in columns.
const SIDEBAR_WIDTH: u16 = 34;

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let panels_width = area.width.saturating_sub(SIDEBAR_WIDTH);
    let chat_width = (u32::from(panels_width) * u32::from(app.chat_width_percent) / 100) as u16;
    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Length(chat_width),
            Constraint::Min(20),
        ])
        .split(main_layout[1]);

    let conversation_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(content_layout[1]);

    render_header(frame, main_layout[0], app);
    render_sidebar(frame, content_layout[0], app);
    render_chat(frame, conversation_layout[0], app);
    render_input(frame, conversation_layout[1], app);
    render_schema(frame, content_layout[2], app);

    if let Some(ref toast) = app.toast {
        let popup = toast::ToastPopup::new(toast);
        let popup_area = popup.area(area);
        frame.render_widget(popup, popup_area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let widget = header::Header::new(&app.user_label, app.spinner.as_ref());
    frame.render_widget(widget, area);
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let store = app.store();
    let mut widget = sidebar::Sidebar::new(
        store.threads(),
        store.active_index(),
        app.sidebar_cursor,
        app.focus == Focus::Sidebar,
    );
    if let Some(ref rename) = app.rename {
        if let Some(row) = store
            .threads()
            .iter()
            .position(|t| t.id() == rename.thread_id)
        {
            widget = widget.renaming(row, &rename.input);
        }
    }
    frame.render_widget(widget, area);
}

fn render_chat(frame: &mut Frame, area: Rect, app: &App) {
    let widget = chat::ChatPanel::new(
        app.store().active_thread(),
        app.focus == Focus::Chat,
        app.chat_scroll,
        Local::now(),
    );
    frame.render_widget(widget, area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Input && app.rename.is_none();
    let widget = input::InputBar::new(
        &app.input.text,
        app.input.cursor,
        focused,
        app.is_generating(),
    );
    frame.render_widget(widget, area);

    if focused {
        // Account for border (1) and prompt "> " (2)
        let visible_cursor = app
            .input
            .cursor
            .min(input::InputBar::available_width(area)) as u16;
        let cursor_x = area.x + 1 + 2 + visible_cursor;
        let cursor_y = area.y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn render_schema(frame: &mut Frame, area: Rect, app: &App) {
    let widget = schema::SchemaPanel::new(app.schema(), app.focus == Focus::Schema);
    frame.render_widget(widget, area);
}
