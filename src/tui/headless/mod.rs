//! Headless mode for scripted testing and automation.
//!
//! Runs the TUI against an in-memory terminal, executing scripted events
//! and capturing the screen for verification.

mod events;
mod output;

pub use events::{parse_script, parse_step, Check, Comparison, Event, Step, Wait, REPLY_TIMEOUT};
pub use output::{render_report, screen_text};

use crate::classifier::KeywordClassifier;
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::display::SchemaView;
use crate::error::{PilotError, Result};
use crate::export::MemoryClipboard;
use crate::generation::Completion;
use crate::identity::Identity;
use crate::session::Session;
use crate::tui::app::App;
use crate::tui::ui;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Configuration for headless mode execution.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Screen width in columns.
    pub width: u16,
    /// Screen height in rows.
    pub height: u16,
    /// Output format.
    pub output_format: OutputFormat,
    /// Whether to stop on first assertion failure.
    pub fail_fast: bool,
    /// Path to write output (None = stdout).
    pub output_file: Option<std::path::PathBuf>,
}

impl HeadlessConfig {
    /// Creates a HeadlessConfig from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (width, height) = cli.parse_screen_size().map_err(PilotError::config)?;
        Ok(Self {
            width,
            height,
            output_format: cli.parse_output_format().map_err(PilotError::config)?,
            fail_fast: cli.fail_fast,
            output_file: cli.output_file.clone(),
        })
    }
}

/// Result of headless execution.
#[derive(Debug)]
pub struct HeadlessResult {
    /// Final screen content as text.
    pub screen: String,
    /// Number of steps executed.
    pub events_executed: usize,
    /// Number of assertions passed.
    pub assertions_passed: usize,
    /// Source text of each failed assertion, in order.
    pub failures: Vec<String>,
    /// Application state snapshot.
    pub state: HeadlessState,
    /// Frame captures (for frames output mode).
    pub frames: Vec<Frame>,
}

/// Snapshot of application state for JSON output and state assertions.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HeadlessState {
    /// Current input text.
    pub input_text: String,
    /// Current focus panel.
    pub focus: String,
    /// Whether a generation is pending.
    pub is_generating: bool,
    /// Number of messages in the active thread.
    pub message_count: usize,
    /// Whether the app is still running.
    pub running: bool,
    /// Title of the active thread.
    pub active_thread: String,
    /// Every thread, most recent first.
    pub threads: Vec<ThreadSummary>,
    /// Catalog key of the bundle on display.
    pub schema: Option<String>,
    /// Selected schema tab, when a bundle is on display.
    pub schema_tab: Option<String>,
    /// Visible toast message.
    pub toast: Option<String>,
}

impl HeadlessState {
    fn from_app(app: &App) -> Self {
        let store = app.store();
        let view = app.schema();
        Self {
            input_text: app.input.text.clone(),
            focus: format!("{:?}", app.focus),
            is_generating: app.is_generating(),
            message_count: store.active_thread().messages().len(),
            running: app.running,
            active_thread: store.active_thread().title().to_string(),
            threads: store
                .threads()
                .iter()
                .map(|thread| ThreadSummary {
                    title: thread.title().to_string(),
                    messages: thread.messages().len(),
                    active: thread.id() == store.active_thread().id(),
                })
                .collect(),
            schema: view.bundle().map(|b| b.key.to_string()),
            schema_tab: view.bundle().map(|_| format!("{:?}", view.tab())),
            toast: app.toast.as_ref().map(|t| t.message.clone()),
        }
    }

    /// Looks up a field by name for state assertions.
    pub fn field(&self, name: &str) -> Option<String> {
        let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "none".to_string());
        match name {
            "input_text" => Some(self.input_text.clone()),
            "focus" => Some(self.focus.clone()),
            "is_generating" => Some(self.is_generating.to_string()),
            "message_count" => Some(self.message_count.to_string()),
            "running" => Some(self.running.to_string()),
            "thread_count" => Some(self.threads.len().to_string()),
            "active_thread" => Some(self.active_thread.clone()),
            "schema" => Some(optional(&self.schema)),
            "schema_tab" => Some(optional(&self.schema_tab)),
            "toast" => Some(optional(&self.toast)),
            _ => None,
        }
    }
}

/// One row of the thread list.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ThreadSummary {
    pub title: String,
    pub messages: usize,
    pub active: bool,
}

/// A captured frame (screen state after an event).
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame number (0 = initial state).
    pub number: usize,
    /// Event that produced this frame (None for initial).
    pub event: Option<String>,
    /// Screen content.
    pub screen: String,
}

/// Runs the TUI in headless mode.
pub struct HeadlessRunner {
    config: HeadlessConfig,
    terminal: Terminal<TestBackend>,
    app: App,
    completions: mpsc::UnboundedReceiver<Completion>,
    steps: Vec<Step>,
    frames: Vec<Frame>,
    assertions_passed: usize,
    failures: Vec<String>,
}

impl HeadlessRunner {
    /// Creates a new headless runner with the given configuration.
    ///
    /// Copies land in an in-memory clipboard so scripted runs never touch
    /// the system clipboard or write escape sequences to stdout.
    pub fn new(config: HeadlessConfig, app_config: &Config) -> Result<Self> {
        let backend = TestBackend::new(config.width, config.height);
        let terminal = Terminal::new(backend)
            .map_err(|e| PilotError::internal(format!("Failed to create test terminal: {e}")))?;

        let (session, completions) = Session::new(
            app_config,
            Arc::new(KeywordClassifier::new()),
            SchemaView::new(),
        );
        let app = App::new(
            session,
            &Identity::ephemeral(),
            app_config,
            Box::new(MemoryClipboard::new()),
        );

        Ok(Self {
            config,
            terminal,
            app,
            completions,
            steps: Vec::new(),
            frames: Vec::new(),
            assertions_passed: 0,
            failures: Vec::new(),
        })
    }

    /// Loads events from a string (comma-separated or newline-separated).
    pub fn load_events(&mut self, input: &str) -> Result<()> {
        self.steps = parse_script(input)?;
        Ok(())
    }

    /// Loads events from a script file, or stdin when the path is "-".
    pub fn load_script(&mut self, path: &str) -> Result<()> {
        let content = if path == "-" {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| PilotError::internal(format!("Failed to read stdin: {e}")))?;
            buffer
        } else {
            std::fs::read_to_string(path)
                .map_err(|e| PilotError::internal(format!("Failed to read script file: {e}")))?
        };

        self.load_events(&content)
    }

    /// Runs the headless execution and returns the result.
    pub async fn run(mut self) -> Result<HeadlessResult> {
        self.capture_frame(None)?;

        let steps = std::mem::take(&mut self.steps);
        let mut events_executed = 0;

        for Step { source, event } in steps {
            debug!(step = %source, "Executing headless step");

            match &event {
                Event::Key(key) => self.app.handle_key(*key),
                Event::Type(text) => self.app.type_text(text),
                Event::Wait(Wait::For(duration)) => self.wait(*duration).await,
                Event::Wait(Wait::Reply) => self.wait_for_reply().await,
                Event::Resize(w, h) => {
                    self.terminal
                        .resize(ratatui::layout::Rect::new(0, 0, *w, *h))
                        .map_err(|e| PilotError::internal(format!("Resize failed: {e}")))?;
                }
                Event::Snapshot(_) => {
                    // Snapshots are captured as frames
                }
                Event::Assert(check) => {
                    self.draw()?;
                    let screen = self.render_screen();
                    let state = HeadlessState::from_app(&self.app);
                    if check.passes(&screen, &state) {
                        self.assertions_passed += 1;
                    } else {
                        info!(assertion = %source, "Assertion failed");
                        self.failures.push(source.clone());
                        if self.config.fail_fast {
                            events_executed += 1;
                            break;
                        }
                    }
                }
            }

            self.drain_ready();
            events_executed += 1;

            self.draw()?;
            if self.config.output_format == OutputFormat::Frames {
                self.capture_frame(Some(source))?;
            }

            if !self.app.running {
                break;
            }
        }

        self.app.shutdown();
        self.draw()?;

        Ok(HeadlessResult {
            screen: self.render_screen(),
            events_executed,
            assertions_passed: self.assertions_passed,
            failures: self.failures,
            state: HeadlessState::from_app(&self.app),
            frames: self.frames,
        })
    }

    /// Sleeps for the duration while applying completions as they fire.
    async fn wait(&mut self, duration: Duration) {
        let deadline = tokio::time::Instant::now() + duration;
        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => break,
                Some(completion) = self.completions.recv() => {
                    self.app.handle_completion(completion);
                }
            }
        }
    }

    /// Waits until no generation is pending, bounded by [`REPLY_TIMEOUT`].
    async fn wait_for_reply(&mut self) {
        let deadline = tokio::time::Instant::now() + REPLY_TIMEOUT;
        while self.app.is_generating() {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => {
                    info!("Gave up waiting for a reply");
                    break;
                }
                Some(completion) = self.completions.recv() => {
                    self.app.handle_completion(completion);
                }
            }
        }
    }

    /// Applies completions that have already been delivered.
    fn drain_ready(&mut self) {
        while let Ok(completion) = self.completions.try_recv() {
            self.app.handle_completion(completion);
        }
    }

    fn draw(&mut self) -> Result<()> {
        let app = &self.app;
        self.terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PilotError::internal(format!("Failed to render: {e}")))?;
        Ok(())
    }

    /// Renders the current screen to a string.
    fn render_screen(&self) -> String {
        screen_text(self.terminal.backend().buffer())
    }

    /// Captures the current frame.
    fn capture_frame(&mut self, event: Option<String>) -> Result<()> {
        self.draw()?;

        let screen = self.render_screen();
        let number = self.frames.len();
        self.frames.push(Frame {
            number,
            event,
            screen,
        });

        Ok(())
    }
}

/// Runs headless mode from CLI arguments.
pub async fn run_headless(cli: &Cli, app_config: &Config) -> Result<i32> {
    cli.validate_headless().map_err(PilotError::config)?;

    let config = HeadlessConfig::from_cli(cli)?;
    let mut runner = HeadlessRunner::new(config.clone(), app_config)?;

    if let Some(ref events_str) = cli.events {
        runner.load_events(events_str)?;
    } else if let Some(ref script_path) = cli.script {
        runner.load_script(script_path)?;
    }

    let result = runner.run().await?;

    let output_str = render_report(config.output_format, &result);

    if let Some(ref path) = config.output_file {
        std::fs::write(path, &output_str)
            .map_err(|e| PilotError::internal(format!("Failed to write output file: {e}")))?;
    } else {
        print!("{}", output_str);
    }

    if !result.failures.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}
