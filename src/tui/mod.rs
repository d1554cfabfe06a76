//! Terminal User Interface for Schema Pilot.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
mod events;
pub mod headless;
mod text;
mod ui;
pub mod widgets;

pub use app::App;
pub use events::{Event, EventHandler};

use crate::classifier::KeywordClassifier;
use crate::config::Config;
use crate::display::SchemaView;
use crate::error::{PilotError, Result};
use crate::export::SystemClipboard;
use crate::generation::Completion;
use crate::identity::Identity;
use crate::session::Session;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        Ok(Self {
            terminal,
            event_handler: EventHandler::new(),
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| PilotError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| PilotError::internal(format!("Failed to enter alternate screen: {e}")))?;

        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
            .map_err(|e| PilotError::internal(format!("Failed to create terminal: {e}")))
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| PilotError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| PilotError::internal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| PilotError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the event loop until the user quits.
    pub async fn run(
        &mut self,
        mut app: App,
        mut completions: mpsc::UnboundedReceiver<Completion>,
    ) -> Result<()> {
        // Restore the terminal before the panic message is printed
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let result = self.run_event_loop(&mut app, &mut completions).await;

        app.shutdown();
        let _ = panic::take_hook();

        result
    }

    fn spawn_poll(&self) -> JoinHandle<Result<Event>> {
        let handler = self.event_handler;
        tokio::task::spawn_blocking(move || handler.next())
    }

    /// The main event loop, separated for cleaner error handling.
    async fn run_event_loop(
        &mut self,
        app: &mut App,
        completions: &mut mpsc::UnboundedReceiver<Completion>,
    ) -> Result<()> {
        // The poll task outlives a loop iteration so no key press is lost
        // when a completion wins the race.
        let mut poll = self.spawn_poll();

        loop {
            app.clear_expired_toast();

            self.terminal
                .draw(|frame| ui::render(frame, app))
                .map_err(|e| PilotError::internal(format!("Failed to draw: {e}")))?;

            if !app.running {
                break;
            }

            tokio::select! {
                joined = &mut poll => {
                    poll = self.spawn_poll();
                    let event = joined
                        .map_err(|e| PilotError::internal(format!("Event task failed: {e}")))??;
                    if let Event::Key(key) = event {
                        app.handle_key(key);
                    }
                }

                Some(completion) = completions.recv() => {
                    app.handle_completion(completion);
                }
            }
        }

        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.restore_terminal() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Runs the interactive TUI.
pub async fn run(config: &Config, identity: &Identity) -> Result<()> {
    let (session, completions) = Session::new(
        config,
        Arc::new(KeywordClassifier::new()),
        SchemaView::new(),
    );
    let app = App::new(
        session,
        identity,
        config,
        Box::new(SystemClipboard::new()),
    );

    info!("Starting TUI");
    let mut tui = Tui::new()?;
    tui.run(app, completions).await
}
