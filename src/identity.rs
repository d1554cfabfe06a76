//! Local user identity.
//!
//! A random UUID generated on first start and kept in
//! `<data_dir>/schema-pilot/user_id`. Headless runs use a throwaway one.

use crate::error::{PilotError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// The local user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    id: Uuid,
}

impl Identity {
    /// Default location of the identity file.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::config_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join("schema-pilot")
            .join("user_id")
    }

    /// Reads the identity at `path`, creating it if missing or unreadable.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if let Ok(contents) = fs::read_to_string(path) {
            match Uuid::parse_str(contents.trim()) {
                Ok(id) => return Ok(Self { id }),
                Err(e) => warn!(
                    "Ignoring malformed identity file {}: {}",
                    path.display(),
                    e
                ),
            }
        }

        let identity = Self { id: Uuid::new_v4() };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PilotError::io(format!(
                    "Failed to create identity directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        fs::write(path, format!("{}\n", identity.id)).map_err(|e| {
            PilotError::io(format!(
                "Failed to write identity file {}: {e}",
                path.display()
            ))
        })?;

        info!("Created new identity {}", identity.short());
        Ok(identity)
    }

    /// Like [`Identity::load_or_create`], but an unwritable location only
    /// costs persistence: the session runs with an ephemeral identity.
    pub fn load_or_ephemeral(path: &Path) -> Self {
        match Self::load_or_create(path) {
            Ok(identity) => identity,
            Err(e) => {
                warn!("{}; using a temporary identity", e);
                Self::ephemeral()
            }
        }
    }

    /// A fresh identity that is never persisted.
    pub fn ephemeral() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// First eight hex digits, for the header.
    pub fn short(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}
