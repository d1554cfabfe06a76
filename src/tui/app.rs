//! Application state for the TUI.
//!
//! Wraps a [`Session`] with the purely visual state: focus, input buffers,
//! sidebar cursor, scroll offsets, toast and spinner.

use super::text::{byte_offset, find_word_end_forward, find_word_start_backward};
use super::widgets::spinner::Spinner;
use crate::config::Config;
use crate::display::SchemaView;
use crate::export::{self, ClipboardSink};
use crate::generation::Completion;
use crate::identity::Identity;
use crate::session::Session;
use crate::store::{Action, Store, ThreadId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Which panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Sidebar,
    Chat,
    #[default]
    Input,
    Schema,
}

impl Focus {
    /// Cycles to the next focus panel, left to right.
    pub fn next(self) -> Self {
        match self {
            Self::Sidebar => Self::Chat,
            Self::Chat => Self::Input,
            Self::Input => Self::Schema,
            Self::Schema => Self::Sidebar,
        }
    }
}

/// Editable single-line text. The cursor is a character index.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input holding `text` with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = byte_offset(&self.text, self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = byte_offset(&self.text, self.cursor);
            self.text.remove(at);
        }
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = byte_offset(&self.text, self.cursor);
            self.text.remove(at);
        }
    }

    /// Deletes the word before the cursor (Ctrl+W).
    pub fn delete_word_backward(&mut self) {
        let start = find_word_start_backward(&self.text, self.cursor);
        let from = byte_offset(&self.text, start);
        let to = byte_offset(&self.text, self.cursor);
        self.text.replace_range(from..to, "");
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_word_left(&mut self) {
        self.cursor = find_word_start_backward(&self.text, self.cursor);
    }

    pub fn move_word_right(&mut self) {
        self.cursor = find_word_end_forward(&self.text, self.cursor);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Clears the input and returns the previous text.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Applies an editing key. Returns false if the key is not an editing key.
    pub fn handle_edit_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('w') if ctrl => self.delete_word_backward(),
            KeyCode::Char(c) if !ctrl => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left if ctrl => self.move_word_left(),
            KeyCode::Right if ctrl => self.move_word_right(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}

/// An in-progress thread rename.
#[derive(Debug, Clone)]
pub struct RenameState {
    pub thread_id: ThreadId,
    pub input: InputState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Done,
    Failed,
}

/// A transient notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

impl Toast {
    pub fn done(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Done)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Failed)
    }

    fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    pub focus: Focus,
    /// Chat input.
    pub input: InputState,
    pub session: Session<SchemaView>,
    /// Highlighted row in the thread sidebar.
    pub sidebar_cursor: usize,
    pub rename: Option<RenameState>,
    /// Chat scroll offset (lines from bottom).
    pub chat_scroll: usize,
    pub toast: Option<Toast>,
    pub spinner: Option<Spinner>,
    /// Short user id for the header.
    pub user_label: String,
    pub chat_width_percent: u16,
    export_dir: PathBuf,
    clipboard: Box<dyn ClipboardSink>,
}

impl App {
    pub fn new(
        session: Session<SchemaView>,
        identity: &Identity,
        config: &Config,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            running: true,
            focus: Focus::default(),
            input: InputState::new(),
            session,
            sidebar_cursor: 0,
            rename: None,
            chat_scroll: 0,
            toast: None,
            spinner: None,
            user_label: identity.short(),
            chat_width_percent: config.display.chat_width(),
            export_dir: config.export.directory.clone(),
            clipboard,
        }
    }

    pub fn store(&self) -> &Store {
        self.session.store()
    }

    pub fn schema(&self) -> &SchemaView {
        self.session.surface()
    }

    pub fn is_generating(&self) -> bool {
        self.store().is_generating()
    }

    /// Shows a toast notification.
    pub fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    /// Drops the toast once it has been visible long enough.
    pub fn clear_expired_toast(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.shown_at.elapsed() >= TOAST_DURATION)
        {
            self.toast = None;
        }
    }

    /// Applies a fired generation timer.
    pub fn handle_completion(&mut self, completion: Completion) {
        if self.session.complete(completion).is_applied() {
            self.chat_scroll = 0;
        }
        self.sync_after_dispatch();
    }

    /// Cancels outstanding work before exit.
    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }

    fn dispatch(&mut self, action: Action) -> bool {
        let applied = self.session.dispatch(action).is_applied();
        self.sync_after_dispatch();
        applied
    }

    /// Keeps derived visual state in line with the store.
    fn sync_after_dispatch(&mut self) {
        match (self.is_generating(), self.spinner.is_some()) {
            (true, false) => self.spinner = Some(Spinner::generating()),
            (false, true) => self.spinner = None,
            _ => {}
        }
        let last = self.store().threads().len().saturating_sub(1);
        self.sidebar_cursor = self.sidebar_cursor.min(last);
    }

    fn new_thread(&mut self) {
        if self.dispatch(Action::NewThread) {
            self.sidebar_cursor = self.store().active_index();
            self.chat_scroll = 0;
            self.focus = Focus::Input;
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.running = false;
                return;
            }
            _ => {}
        }

        if self.rename.is_some() {
            self.handle_rename_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('n') if ctrl => self.new_thread(),
            KeyCode::Tab => self.focus = self.focus.next(),
            _ => match self.focus {
                Focus::Sidebar => self.handle_sidebar_key(key),
                Focus::Chat => self.handle_chat_key(key),
                Focus::Input => self.handle_input_key(key),
                Focus::Schema => self.handle_schema_key(key),
            },
        }
    }

    /// Inserts text into whichever editor is active: the rename buffer
    /// while renaming, otherwise the message input.
    pub fn type_text(&mut self, text: &str) {
        let target = match self.rename.as_mut() {
            Some(rename) => &mut rename.input,
            None => &mut self.input,
        };
        for c in text.chars() {
            target.insert(c);
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.submit_input();
            return;
        }
        self.input.handle_edit_key(key);
    }

    /// Sends the input as a message. Ignored while generating or when blank;
    /// the text stays in the input in both cases.
    pub fn submit_input(&mut self) {
        if self.is_generating() || self.input.text.trim().is_empty() {
            return;
        }
        let text = self.input.text.clone();
        if self.dispatch(Action::SubmitMessage(text)) {
            self.input.take();
            self.chat_scroll = 0;
            self.sidebar_cursor = self.store().active_index();
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.chat_scroll = self.chat_scroll.saturating_add(1),
            KeyCode::Down => self.chat_scroll = self.chat_scroll.saturating_sub(1),
            KeyCode::PageUp => self.chat_scroll = self.chat_scroll.saturating_add(10),
            KeyCode::PageDown => self.chat_scroll = self.chat_scroll.saturating_sub(10),
            // Clamped during render
            KeyCode::Home => self.chat_scroll = usize::MAX,
            KeyCode::End => self.chat_scroll = 0,
            _ => {}
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        let count = self.store().threads().len();
        match key.code {
            KeyCode::Up => self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.sidebar_cursor + 1 < count {
                    self.sidebar_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.thread_at_cursor() {
                    if self.dispatch(Action::SelectThread(id)) {
                        self.chat_scroll = 0;
                    }
                }
            }
            KeyCode::Char('n') => self.new_thread(),
            KeyCode::Char('r') => {
                if let Some(id) = self.thread_at_cursor() {
                    let title = self
                        .store()
                        .thread(id)
                        .map(|t| t.title().to_string())
                        .unwrap_or_default();
                    self.rename = Some(RenameState {
                        thread_id: id,
                        input: InputState::with_text(&title),
                    });
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if count > 1 {
                    if let Some(id) = self.thread_at_cursor() {
                        if self.dispatch(Action::DeleteThread(id)) {
                            self.show_toast(Toast::done("Thread deleted"));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_rename_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.rename = None,
            KeyCode::Enter => {
                if let Some(rename) = self.rename.take() {
                    self.dispatch(Action::RenameThread {
                        id: rename.thread_id,
                        title: rename.input.text,
                    });
                }
            }
            _ => {
                if let Some(rename) = self.rename.as_mut() {
                    rename.input.handle_edit_key(key);
                }
            }
        }
    }

    fn handle_schema_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.session.surface_mut().prev_tab(),
            KeyCode::Right => self.session.surface_mut().next_tab(),
            KeyCode::Char(c @ '1'..='3') => {
                if let Some(tab) = crate::display::SchemaTab::from_digit(c) {
                    self.session.surface_mut().select_tab(tab);
                }
            }
            KeyCode::Up => self.session.surface_mut().move_up(),
            KeyCode::Down => self.session.surface_mut().move_down(),
            KeyCode::Char('c') => self.copy_artifact(),
            KeyCode::Char('s') => self.save_artifact(),
            _ => {}
        }
    }

    fn thread_at_cursor(&self) -> Option<ThreadId> {
        self.store()
            .threads()
            .get(self.sidebar_cursor)
            .map(|t| t.id())
    }

    /// Copies the SQL or the selected query to the clipboard.
    pub fn copy_artifact(&mut self) {
        let Some(artifact) = self.schema().artifact() else {
            return;
        };
        match self.clipboard.copy(&artifact.content) {
            Ok(()) => {
                info!("Copied {} to clipboard", artifact.label);
                self.show_toast(Toast::done(format!("{} copied to clipboard", artifact.label)));
            }
            Err(e) => {
                warn!("Clipboard copy failed: {}", e);
                self.show_toast(Toast::failed("Copy failed"));
            }
        }
    }

    /// Saves the SQL or the selected query into the export directory.
    pub fn save_artifact(&mut self) {
        let Some(artifact) = self.schema().artifact() else {
            return;
        };
        match export::save_to_file(&self.export_dir, &artifact.filename, &artifact.content) {
            Ok(path) => self.show_toast(Toast::done(format!("Saved {}", path.display()))),
            Err(e) => {
                warn!("Save failed: {}", e);
                self.show_toast(Toast::failed("Save failed"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogKey;
    use crate::classifier::KeywordClassifier;
    use crate::display::SchemaTab;
    use crate::export::MemoryClipboard;
    use crate::generation::Completion;
    use crate::store::{Role, DEFAULT_TITLE};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_in(dir: &std::path::Path) -> (App, UnboundedReceiver<Completion>) {
        let mut config = Config::default();
        config.generation.latency_ms = 50;
        config.export.directory = dir.to_path_buf();
        let (session, rx) = Session::new(
            &config,
            Arc::new(KeywordClassifier::new()),
            SchemaView::new(),
        );
        let app = App::new(
            session,
            &Identity::ephemeral(),
            &config,
            Box::new(MemoryClipboard::new()),
        );
        (app, rx)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    async fn generate(app: &mut App, rx: &mut UnboundedReceiver<Completion>, text: &str) {
        type_text(app, text);
        app.handle_key(key(KeyCode::Enter));
        let completion = rx.recv().await.unwrap();
        app.handle_completion(completion);
    }

    #[test]
    fn test_input_insert_multibyte() {
        let mut input = InputState::new();
        input.insert('é');
        input.insert('t');
        input.move_left();
        input.insert('x');
        assert_eq!(input.text, "éxt");
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_input_backspace_and_delete() {
        let mut input = InputState::with_text("héllo");
        input.backspace();
        assert_eq!(input.text, "héll");
        input.move_home();
        input.delete();
        assert_eq!(input.text, "éll");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_input_delete_word() {
        let mut input = InputState::with_text("a blog platform");
        input.delete_word_backward();
        assert_eq!(input.text, "a blog ");
        assert_eq!(input.cursor, 7);
    }

    #[test]
    fn test_input_word_motion() {
        let mut input = InputState::with_text("online shop catalog");
        let ctrl_key = |code| KeyEvent::new(code, KeyModifiers::CONTROL);

        input.handle_edit_key(ctrl_key(KeyCode::Left));
        assert_eq!(input.cursor, 12);
        input.handle_edit_key(ctrl_key(KeyCode::Left));
        assert_eq!(input.cursor, 7);
        input.handle_edit_key(ctrl_key(KeyCode::Right));
        assert_eq!(input.cursor, 11);
    }

    #[test]
    fn test_input_take() {
        let mut input = InputState::with_text("hello");
        assert_eq!(input.take(), "hello");
        assert!(input.is_empty());
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_focus_cycle() {
        let focus = Focus::Input;
        assert_eq!(focus.next(), Focus::Schema);
        assert_eq!(focus.next().next(), Focus::Sidebar);
        assert_eq!(focus.next().next().next(), Focus::Chat);
        assert_eq!(focus.next().next().next().next(), Focus::Input);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ctrl_c_quits() {
        let temp = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(temp.path());
        app.handle_key(ctrl('c'));
        assert!(!app.running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_flow() {
        let temp = TempDir::new().unwrap();
        let (mut app, mut rx) = app_in(temp.path());

        type_text(&mut app, "A blog for my team");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.input.is_empty());
        assert!(app.is_generating());
        assert!(app.spinner.is_some());
        assert_eq!(app.store().active_thread().title(), "A blog for my team");

        let completion = rx.recv().await.unwrap();
        app.handle_completion(completion);
        assert!(!app.is_generating());
        assert!(app.spinner.is_none());
        assert_eq!(app.schema().bundle().unwrap().key, CatalogKey::Blog);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_while_generating_keeps_input() {
        let temp = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(temp.path());
        type_text(&mut app, "shop");
        app.handle_key(key(KeyCode::Enter));

        type_text(&mut app, "blog");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input.text, "blog");
        assert_eq!(app.store().active_thread().messages().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submit_is_ignored() {
        let temp = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(temp.path());
        type_text(&mut app, "   ");
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.is_generating());
        assert_eq!(app.input.text, "   ");
        assert_eq!(app.store().active_thread().messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sidebar_new_select_delete() {
        let temp = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(temp.path());
        let first = app.store().active_id();

        app.handle_key(ctrl('n'));
        assert_eq!(app.store().threads().len(), 2);
        assert_eq!(app.focus, Focus::Input);

        app.focus = Focus::Sidebar;
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.store().active_id(), first);

        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.store().threads().len(), 1);
        assert_ne!(app.store().active_id(), first);
        assert_eq!(app.sidebar_cursor, 0);
        assert_eq!(app.toast.as_ref().unwrap().message, "Thread deleted");
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Done);

        // The last thread cannot be deleted.
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.store().threads().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rename_commit_and_cancel() {
        let temp = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(temp.path());
        app.focus = Focus::Sidebar;

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.rename.as_ref().unwrap().input.text, DEFAULT_TITLE);
        for _ in 0..DEFAULT_TITLE.len() {
            app.handle_key(key(KeyCode::Backspace));
        }
        type_text(&mut app, "Inventory");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.rename.is_none());
        assert_eq!(app.store().active_thread().title(), "Inventory");

        app.handle_key(key(KeyCode::Char('r')));
        type_text(&mut app, " draft");
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.store().active_thread().title(), "Inventory");
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_thread_drops_pending_reply() {
        let temp = TempDir::new().unwrap();
        let (mut app, mut rx) = app_in(temp.path());
        let first = app.store().active_id();
        type_text(&mut app, "blog");
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(ctrl('n'));
        assert!(!app.is_generating());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(rx.try_recv().is_err());

        let thread = app.store().thread(first).unwrap();
        assert_eq!(thread.last_message().unwrap().role(), Role::User);
    }

    #[tokio::test(start_paused = true)]
    async fn test_schema_tabs_copy_and_save() {
        let temp = TempDir::new().unwrap();
        let (mut app, mut rx) = app_in(temp.path());
        generate(&mut app, &mut rx, "online shop").await;

        app.focus = Focus::Schema;
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.schema().tab(), SchemaTab::Queries);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char('s')));
        assert!(temp.path().join("query-2.sql").exists());

        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.schema().tab(), SchemaTab::Diagram);
        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(
            app.toast.as_ref().unwrap().message,
            "SQL schema copied to clipboard"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_is_stored_as_typed() {
        let temp = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(temp.path());
        type_text(&mut app, "  a blog, please  ");
        app.handle_key(key(KeyCode::Enter));

        let last = app.store().active_thread().last_message().unwrap();
        assert_eq!(last.role(), Role::User);
        assert_eq!(last.content(), "  a blog, please  ");
        assert!(app.input.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_opening_active_thread_clears_schema() {
        let temp = TempDir::new().unwrap();
        let (mut app, mut rx) = app_in(temp.path());
        let active = app.store().active_id();
        generate(&mut app, &mut rx, "a blog").await;
        assert!(app.schema().bundle().is_some());

        app.focus = Focus::Sidebar;
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.store().active_id(), active);
        assert!(app.schema().bundle().is_none());
        assert!(app.store().display().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_failure_shows_failed_toast() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let (mut app, mut rx) = app_in(&blocker.join("exports"));
        generate(&mut app, &mut rx, "a blog").await;

        app.focus = Focus::Schema;
        app.handle_key(key(KeyCode::Char('s')));
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Failed);
        assert_eq!(toast.message, "Save failed");

        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Done);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_without_schema_does_nothing() {
        let temp = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(temp.path());
        app.focus = Focus::Schema;
        app.handle_key(key(KeyCode::Char('c')));
        app.handle_key(key(KeyCode::Char('s')));
        assert!(app.toast.is_none());
        assert!(!temp.path().join("schema.sql").exists());
    }
}
