//! Conversation store and thread manager.
//!
//! All chat state lives in [`Store`] and changes only through
//! [`Store::dispatch`]. A transition mutates the store and hands back the
//! [`Effect`]s the caller must carry out (arming or disarming the generation
//! timer, updating the display surface). Requests that make no sense in the
//! current state are ignored rather than reported as errors.
//!
//! Invariants:
//! - at least one thread exists;
//! - the active id always names an existing thread;
//! - every thread log starts with the welcome message;
//! - at most one generation is pending, and it belongs to the active thread.

mod message;
mod thread;

pub use message::{day_label, Message, MessageId, Role};
pub use thread::{
    title_from_message, truncate_title, Thread, ThreadId, DEFAULT_TITLE, WELCOME_MESSAGE,
};

use crate::catalog::{Catalog, CatalogKey, SchemaBundle};
use std::fmt;
use tracing::debug;

/// Reply appended once a schema has been generated.
pub const GENERATED_REPLY: &str = "I've generated an optimized database schema for your project! \
The schema includes proper relationships, indexes for performance, and follows best practices. \
Check out the SQL Schema and ERD tabs to see the results. I've also generated some useful queries \
to get you started.

Key features of this schema:
- Normalized structure with proper foreign keys
- Performance indexes on frequently queried columns
- Timestamps for audit trails
- Appropriate data types and constraints

Would you like me to explain any part of the schema or generate additional queries?";

/// Identifies one submission, so a late completion can be told apart from
/// the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A submission waiting for its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGeneration {
    pub ticket: Ticket,
    pub thread_id: ThreadId,
    pub text: String,
}

/// Everything that can happen to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NewThread,
    SelectThread(ThreadId),
    RenameThread { id: ThreadId, title: String },
    DeleteThread(ThreadId),
    SubmitMessage(String),
    GenerationCompleted { ticket: Ticket, key: CatalogKey },
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the reply timer for a submission.
    ScheduleGeneration {
        ticket: Ticket,
        thread_id: ThreadId,
        text: String,
    },
    /// Drop the reply timer of a thread.
    CancelGeneration { thread_id: ThreadId },
    /// Show a freshly generated bundle.
    Present(SchemaBundle),
    /// Blank the schema panel.
    ClearDisplay,
}

/// Outcome of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The state changed; run these effects in order.
    Applied(Vec<Effect>),
    /// Nothing changed, for the given reason.
    Ignored(&'static str),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn effects(&self) -> &[Effect] {
        match self {
            Self::Applied(effects) => effects,
            Self::Ignored(_) => &[],
        }
    }

    pub fn into_effects(self) -> Vec<Effect> {
        match self {
            Self::Applied(effects) => effects,
            Self::Ignored(_) => Vec::new(),
        }
    }
}

/// Chat state: threads, active pointer, displayed bundle, pending generation.
#[derive(Debug, Clone)]
pub struct Store {
    threads: Vec<Thread>,
    active: ThreadId,
    display: Option<SchemaBundle>,
    pending: Option<PendingGeneration>,
    catalog: Catalog,
    next_ticket: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

impl Store {
    /// Creates a store holding one fresh thread.
    pub fn new(catalog: Catalog) -> Self {
        let thread = Thread::new();
        Self {
            active: thread.id(),
            threads: vec![thread],
            display: None,
            pending: None,
            catalog,
            next_ticket: 1,
        }
    }

    /// Threads, newest first.
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn thread(&self, id: ThreadId) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id() == id)
    }

    pub fn active_id(&self) -> ThreadId {
        self.active
    }

    pub fn active_thread(&self) -> &Thread {
        // The active id always names a thread; fall back to the first one anyway.
        self.thread(self.active).unwrap_or(&self.threads[0])
    }

    /// Index of the active thread in [`Store::threads`].
    pub fn active_index(&self) -> usize {
        self.position(self.active).unwrap_or(0)
    }

    /// The bundle currently on display, if any.
    pub fn display(&self) -> Option<&SchemaBundle> {
        self.display.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingGeneration> {
        self.pending.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    /// Appends a message to the active thread.
    pub fn append_message(&mut self, role: Role, content: impl Into<String>) -> MessageId {
        let index = self.active_index();
        self.threads[index].push(role, content)
    }

    /// Applies an action and returns the effects to run.
    pub fn dispatch(&mut self, action: Action) -> Transition {
        let transition = match action {
            Action::NewThread => self.new_thread(),
            Action::SelectThread(id) => self.select_thread(id),
            Action::RenameThread { id, title } => self.rename_thread(id, &title),
            Action::DeleteThread(id) => self.delete_thread(id),
            Action::SubmitMessage(text) => self.submit(text),
            Action::GenerationCompleted { ticket, key } => self.complete(ticket, key),
        };

        if let Transition::Ignored(reason) = &transition {
            debug!("Store ignored action: {reason}");
        }
        transition
    }

    fn position(&self, id: ThreadId) -> Option<usize> {
        self.threads.iter().position(|t| t.id() == id)
    }

    /// Disarms the pending generation unless it belongs to `keep`.
    fn cancel_pending_unless(&mut self, keep: Option<ThreadId>, effects: &mut Vec<Effect>) {
        let stale = self
            .pending
            .as_ref()
            .is_some_and(|p| Some(p.thread_id) != keep);
        if stale {
            if let Some(pending) = self.pending.take() {
                debug!(
                    "Cancelling generation {} for thread {}",
                    pending.ticket,
                    pending.thread_id.short()
                );
                effects.push(Effect::CancelGeneration {
                    thread_id: pending.thread_id,
                });
            }
        }
    }

    fn clear_display(&mut self, effects: &mut Vec<Effect>) {
        self.display = None;
        effects.push(Effect::ClearDisplay);
    }

    fn new_thread(&mut self) -> Transition {
        let mut effects = Vec::new();
        let thread = Thread::new();
        let id = thread.id();

        self.cancel_pending_unless(Some(id), &mut effects);
        self.threads.insert(0, thread);
        self.active = id;
        self.clear_display(&mut effects);

        debug!("Created thread {}", id.short());
        Transition::Applied(effects)
    }

    fn select_thread(&mut self, id: ThreadId) -> Transition {
        if self.position(id).is_none() {
            return Transition::Ignored("unknown thread");
        }

        let mut effects = Vec::new();
        self.cancel_pending_unless(Some(id), &mut effects);
        self.active = id;
        self.clear_display(&mut effects);
        Transition::Applied(effects)
    }

    fn rename_thread(&mut self, id: ThreadId, title: &str) -> Transition {
        let Some(index) = self.position(id) else {
            return Transition::Ignored("unknown thread");
        };

        if self.threads[index].rename(title) {
            Transition::Applied(Vec::new())
        } else {
            Transition::Ignored("title empty or unchanged")
        }
    }

    fn delete_thread(&mut self, id: ThreadId) -> Transition {
        if self.threads.len() <= 1 {
            return Transition::Ignored("cannot delete the last thread");
        }
        let Some(index) = self.position(id) else {
            return Transition::Ignored("unknown thread");
        };

        let mut effects = Vec::new();
        if self.pending.as_ref().is_some_and(|p| p.thread_id == id) {
            self.cancel_pending_unless(None, &mut effects);
        }

        self.threads.remove(index);
        if self.active == id {
            self.active = self.threads[0].id();
            self.cancel_pending_unless(Some(self.active), &mut effects);
            self.clear_display(&mut effects);
        }

        debug!("Deleted thread {}", id.short());
        Transition::Applied(effects)
    }

    fn submit(&mut self, text: String) -> Transition {
        if text.trim().is_empty() {
            return Transition::Ignored("blank message");
        }
        if self.pending.is_some() {
            return Transition::Ignored("generation already pending");
        }

        let index = self.active_index();
        let thread = &mut self.threads[index];
        thread.push(Role::User, text.clone());
        if thread.has_default_title() {
            if let Some(title) = title_from_message(&text) {
                thread.rename(&title);
            }
        }

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        let thread_id = thread.id();
        self.pending = Some(PendingGeneration {
            ticket,
            thread_id,
            text: text.clone(),
        });

        Transition::Applied(vec![Effect::ScheduleGeneration {
            ticket,
            thread_id,
            text,
        }])
    }

    fn complete(&mut self, ticket: Ticket, key: CatalogKey) -> Transition {
        if self.pending.as_ref().map(|p| p.ticket) != Some(ticket) {
            return Transition::Ignored("stale generation");
        }
        let Some(pending) = self.pending.take() else {
            return Transition::Ignored("stale generation");
        };
        let Some(index) = self.position(pending.thread_id) else {
            return Transition::Ignored("thread no longer exists");
        };

        let bundle = self.catalog.lookup(key);
        self.threads[index].push(Role::Assistant, GENERATED_REPLY);
        self.display = Some(bundle.clone());

        debug!(
            "Generation {} finished with the {} template",
            ticket, key
        );
        Transition::Applied(vec![Effect::Present(bundle)])
    }
}
