//! Chat messages.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

/// Identifier of a message, unique within its thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MessageId(pub(crate) u64);

impl MessageId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label shown above the message in the chat panel.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Schema Pilot",
        }
    }
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    created_at: DateTime<Local>,
}

impl Message {
    pub(crate) fn new(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            created_at: Local::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// Wall-clock time in 12-hour form, e.g. `03:07 PM`.
    pub fn time_label(&self) -> String {
        self.created_at.format("%I:%M %p").to_string()
    }
}

/// Calendar label for the conversation header: `Today`, `Yesterday`,
/// `Tomorrow`, or `DD Month` for anything further away.
pub fn day_label(at: DateTime<Local>, now: DateTime<Local>) -> String {
    let days = at
        .date_naive()
        .signed_duration_since(now.date_naive())
        .num_days();

    match days {
        0 => "Today".to_string(),
        -1 => "Yesterday".to_string(),
        1 => "Tomorrow".to_string(),
        _ => at.format("%d %B").to_string(),
    }
}
