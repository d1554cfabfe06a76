//! A running chat session.
//!
//! [`Session`] owns the store, the generation timers and a display surface,
//! and carries out the effects each store transition asks for. The event
//! loop owns the completion receiver returned by [`Session::new`] and hands
//! every completion back through [`Session::complete`].

use crate::catalog::Catalog;
use crate::classifier::IntentClassifier;
use crate::config::Config;
use crate::display::DisplaySurface;
use crate::generation::{Completion, Generator};
use crate::store::{Action, Effect, Store, Transition};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

pub struct Session<D: DisplaySurface> {
    store: Store,
    generator: Generator,
    surface: D,
}

impl<D: DisplaySurface> Session<D> {
    /// Creates a session and the receiver its completions arrive on.
    pub fn new(
        config: &Config,
        classifier: Arc<dyn IntentClassifier>,
        surface: D,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let store = Store::new(Catalog::from_display(&config.display));
        let (generator, completions) = Generator::new(config.generation.latency(), classifier);
        let session = Self {
            store,
            generator,
            surface,
        };
        (session, completions)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Applies an action and runs its effects.
    ///
    /// Scheduling a generation spawns a task, so this must run inside a
    /// tokio runtime.
    pub fn dispatch(&mut self, action: Action) -> Transition {
        let transition = self.store.dispatch(action);
        for effect in transition.effects() {
            self.run_effect(effect);
        }
        transition
    }

    pub fn submit(&mut self, text: impl Into<String>) -> Transition {
        self.dispatch(Action::SubmitMessage(text.into()))
    }

    /// Feeds a fired timer back into the store.
    pub fn complete(&mut self, completion: Completion) -> Transition {
        let transition = self.dispatch(completion.into_action());
        if transition.is_applied() {
            self.generator.finish(completion.thread_id);
        } else {
            debug!("Dropped completion {}", completion.ticket);
        }
        transition
    }

    /// Cancels all outstanding timers.
    pub fn shutdown(&mut self) {
        self.generator.cancel_all();
    }

    fn run_effect(&mut self, effect: &Effect) {
        match effect {
            Effect::ScheduleGeneration {
                ticket,
                thread_id,
                text,
            } => self.generator.schedule(*ticket, *thread_id, text.clone()),
            Effect::CancelGeneration { thread_id } => {
                self.generator.cancel(*thread_id);
            }
            Effect::Present(bundle) => self.surface.present(bundle),
            Effect::ClearDisplay => self.surface.clear(),
        }
    }
}
