//! Chat threads.

use super::message::{Message, MessageId, Role};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Title given to threads until the user names them (or types something).
pub const DEFAULT_TITLE: &str = "New chat";

/// Longest title derived automatically from a first message.
const AUTO_TITLE_MAX_CHARS: usize = 40;

/// Message every new thread starts with.
pub const WELCOME_MESSAGE: &str = "Hi! I'm Schema Pilot, your AI database architect. \
Describe your project and I'll generate an optimized database schema with queries \
and ERD visualization. What kind of application are you building?";

/// Unique thread identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ThreadId(Uuid);

impl ThreadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for logs and compact displays.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ThreadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An independent conversation: title plus append-only message log.
#[derive(Debug, Clone, Serialize)]
pub struct Thread {
    id: ThreadId,
    title: String,
    messages: Vec<Message>,
    #[serde(skip)]
    next_message_id: u64,
}

impl Thread {
    /// Creates a thread seeded with the welcome message.
    pub fn new() -> Self {
        let mut thread = Self {
            id: ThreadId::new(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            next_message_id: 1,
        };
        thread.push(Role::Assistant, WELCOME_MESSAGE);
        thread
    }

    pub fn id(&self) -> ThreadId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether the title is still the one assigned at creation.
    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_TITLE
    }

    /// Appends a message and returns its id.
    pub(crate) fn push(&mut self, role: Role, content: impl Into<String>) -> MessageId {
        let id = MessageId(self.next_message_id);
        self.next_message_id += 1;
        self.messages.push(Message::new(id, role, content));
        id
    }

    /// Sets the title. Returns `false` when `title` is blank or unchanged.
    pub(crate) fn rename(&mut self, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() || title == self.title {
            return false;
        }
        self.title = title.to_string();
        true
    }
}

impl Default for Thread {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives a thread title from the first line of a user message.
pub fn title_from_message(text: &str) -> Option<String> {
    let first_line = text.trim().lines().next()?.trim();
    if first_line.is_empty() {
        return None;
    }

    let mut chars = first_line.chars();
    let head: String = chars.by_ref().take(AUTO_TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        Some(format!("{}...", head.trim_end()))
    } else {
        Some(head)
    }
}

/// Shortens a title for the sidebar, appending `...` when cut.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() > max_chars {
        let head: String = title.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}
