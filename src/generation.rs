//! Simulated schema generation.
//!
//! Each submission arms one timer task. When it fires, the text is classified
//! and a [`Completion`] is sent back to the event loop, which feeds it into
//! the store. Timers are keyed by thread and can be cancelled individually or
//! all at once; a cancelled timer never sends anything.

use crate::catalog::CatalogKey;
use crate::classifier::IntentClassifier;
use crate::store::{Action, ThreadId, Ticket};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result of a fired generation timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub ticket: Ticket,
    pub thread_id: ThreadId,
    pub key: CatalogKey,
}

impl Completion {
    /// The store action that applies this completion.
    pub fn into_action(self) -> Action {
        Action::GenerationCompleted {
            ticket: self.ticket,
            key: self.key,
        }
    }
}

/// Owns the reply timers.
pub struct Generator {
    latency: Duration,
    classifier: Arc<dyn IntentClassifier>,
    tx: mpsc::UnboundedSender<Completion>,
    timers: HashMap<ThreadId, CancellationToken>,
}

impl Generator {
    /// Creates a generator and the receiver its completions arrive on.
    pub fn new(
        latency: Duration,
        classifier: Arc<dyn IntentClassifier>,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let generator = Self {
            latency,
            classifier,
            tx,
            timers: HashMap::new(),
        };
        (generator, rx)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Number of armed timers.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Arms the reply timer for `thread_id`, replacing any earlier one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, ticket: Ticket, thread_id: ThreadId, text: String) {
        self.cancel(thread_id);

        let token = CancellationToken::new();
        self.timers.insert(thread_id, token.clone());

        let latency = self.latency;
        let classifier = Arc::clone(&self.classifier);
        let tx = self.tx.clone();

        debug!(
            "Scheduling generation {} for thread {} in {:?}",
            ticket,
            thread_id.short(),
            latency
        );

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Generation {} cancelled", ticket);
                }
                _ = tokio::time::sleep(latency) => {
                    let key = classifier.classify(&text);
                    let completion = Completion { ticket, thread_id, key };
                    if tx.send(completion).is_err() {
                        warn!("Generation {} finished after the receiver closed", ticket);
                    }
                }
            }
        });
    }

    /// Cancels the timer of `thread_id`, if any. Returns whether one was armed.
    pub fn cancel(&mut self, thread_id: ThreadId) -> bool {
        match self.timers.remove(&thread_id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Forgets the timer of a thread whose completion has been delivered.
    pub fn finish(&mut self, thread_id: ThreadId) {
        self.timers.remove(&thread_id);
    }

    /// Cancels every armed timer.
    pub fn cancel_all(&mut self) {
        for (_, token) in self.timers.drain() {
            token.cancel();
        }
    }
}

impl Drop for Generator {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
