//! Copying and saving generated artifacts.
//!
//! Clipboard platform integration:
//! - native clipboard via arboard where available
//! - Linux: `xclip` or `xsel`
//! - macOS: `pbcopy`
//! - anything else: OSC 52 escape sequence written to the terminal
//!
//! Saving writes `schema.sql` / `query-N.sql` into the export directory.

use crate::error::{PilotError, Result};
use arboard::Clipboard;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// File name used when saving the SQL schema.
pub const SCHEMA_FILENAME: &str = "schema.sql";

/// File name used when saving the query at `index` (zero-based).
pub fn query_filename(index: usize) -> String {
    format!("query-{}.sql", index + 1)
}

/// Writes `content` to `dir/filename`, creating `dir` if needed.
pub fn save_to_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        PilotError::io(format!(
            "Failed to create export directory {}: {e}",
            dir.display()
        ))
    })?;

    let path = dir.join(filename);
    let mut body = content.to_string();
    if !body.ends_with('\n') {
        body.push('\n');
    }
    fs::write(&path, body)
        .map_err(|e| PilotError::io(format!("Failed to write {}: {e}", path.display())))?;

    info!("Saved {}", path.display());
    Ok(path)
}

/// Where copied text goes.
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Clipboard backend for the current platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    Arboard,
    Xclip,
    Xsel,
    Pbcopy,
    /// Terminal OSC 52 escape sequence.
    Osc52,
}

impl ClipboardBackend {
    /// Detects the best available backend.
    pub fn detect() -> Self {
        if Clipboard::new().is_ok() {
            return Self::Arboard;
        }

        #[cfg(target_os = "macos")]
        {
            if command_exists("pbcopy", None) {
                return Self::Pbcopy;
            }
        }

        #[cfg(target_os = "linux")]
        {
            if command_exists("xclip", Some("-version")) {
                return Self::Xclip;
            }
            if command_exists("xsel", Some("--version")) {
                return Self::Xsel;
            }
        }

        Self::Osc52
    }
}

#[allow(dead_code)]
fn command_exists(program: &str, probe_arg: Option<&str>) -> bool {
    let mut command = Command::new(program);
    if let Some(arg) = probe_arg {
        command.arg(arg);
    }
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// The user's clipboard.
pub struct SystemClipboard {
    backend: ClipboardBackend,
    native: Option<Clipboard>,
}

impl SystemClipboard {
    /// Detects a backend and opens the native clipboard if that is the one.
    pub fn new() -> Self {
        let backend = ClipboardBackend::detect();
        let native = match backend {
            ClipboardBackend::Arboard => Clipboard::new().ok(),
            _ => None,
        };
        debug!("Clipboard backend: {:?}", backend);
        Self { backend, native }
    }

    pub fn backend(&self) -> ClipboardBackend {
        self.backend
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        match self.backend {
            ClipboardBackend::Arboard => {
                let clipboard = self
                    .native
                    .as_mut()
                    .ok_or_else(|| PilotError::clipboard("Clipboard not initialized"))?;
                clipboard
                    .set_text(text)
                    .map_err(|e| PilotError::clipboard(format!("Failed to copy: {e}")))
            }
            ClipboardBackend::Xclip => pipe_to("xclip", &["-selection", "clipboard"], text),
            ClipboardBackend::Xsel => pipe_to("xsel", &["--clipboard", "--input"], text),
            ClipboardBackend::Pbcopy => pipe_to("pbcopy", &[], text),
            ClipboardBackend::Osc52 => copy_osc52(text),
        }
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| PilotError::clipboard(format!("Failed to spawn {program}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| PilotError::clipboard(format!("Failed to write to {program}: {e}")))?;
    }

    let status = child
        .wait()
        .map_err(|e| PilotError::clipboard(format!("{program} failed: {e}")))?;
    if !status.success() {
        return Err(PilotError::clipboard(format!("{program} exited with {status}")));
    }
    Ok(())
}

/// Builds the OSC 52 sequence for `text`.
fn osc52_sequence(text: &str) -> String {
    use base64::{engine::general_purpose::STANDARD, Engine};

    // ESC ] 52 ; c ; <base64-data> ESC \
    format!("\x1b]52;c;{}\x1b\\", STANDARD.encode(text))
}

fn copy_osc52(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(osc52_sequence(text).as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| PilotError::clipboard(format!("Failed to write OSC 52: {e}")))
}

/// In-memory clipboard used by headless runs.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
