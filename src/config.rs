//! Configuration management for Schema Pilot.
//!
//! Handles loading configuration from a TOML file, with environment variable
//! and command-line overrides applied on top.

use crate::error::{PilotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `generation.latency_ms`.
pub const ENV_LATENCY_MS: &str = "SCHEMA_PILOT_LATENCY_MS";

/// Environment variable overriding `export.directory`.
pub const ENV_EXPORT_DIR: &str = "SCHEMA_PILOT_EXPORT_DIR";

const MIN_CHAT_WIDTH_PERCENT: u16 = 25;
const MAX_CHAT_WIDTH_PERCENT: u16 = 60;

/// Main configuration structure for Schema Pilot.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Simulated generation settings.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Schema panel and layout settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Where saved files are written.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Simulated generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationConfig {
    /// Delay before the assistant reply, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_latency_ms() -> u64 {
    1500
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

impl GenerationConfig {
    /// Returns the configured latency as a duration.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Schema panel and layout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Whether the ERD tab is available.
    #[serde(default = "default_true")]
    pub diagram: bool,

    /// Whether the Queries tab is available.
    #[serde(default = "default_true")]
    pub queries: bool,

    /// Share of the non-sidebar width given to the chat panel.
    #[serde(default = "default_chat_width_percent")]
    pub chat_width_percent: u16,
}

fn default_true() -> bool {
    true
}

fn default_chat_width_percent() -> u16 {
    45
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            diagram: true,
            queries: true,
            chat_width_percent: default_chat_width_percent(),
        }
    }
}

impl DisplayConfig {
    /// Chat width clamped to the range the layout supports.
    pub fn chat_width(&self) -> u16 {
        self.chat_width_percent
            .clamp(MIN_CHAT_WIDTH_PERCENT, MAX_CHAT_WIDTH_PERCENT)
    }
}

/// Where saved files are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    /// Target directory for `schema.sql` and `query-N.sql`.
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("schema-pilot")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| PilotError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            PilotError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Applies `SCHEMA_PILOT_*` environment variables on top of the file values.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, which maps a variable name to its value.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_LATENCY_MS) {
            self.generation.latency_ms = raw.trim().parse().map_err(|_| {
                PilotError::config(format!("{ENV_LATENCY_MS} must be a number, got '{raw}'"))
            })?;
        }
        if let Some(dir) = lookup(ENV_EXPORT_DIR) {
            if !dir.trim().is_empty() {
                self.export.directory = PathBuf::from(dir);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_valid_config() {
        let toml = r#"
[generation]
latency_ms = 250

[display]
diagram = false
chat_width_percent = 50

[export]
directory = "/tmp/exports"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.generation.latency_ms, 250);
        assert!(!config.display.diagram);
        assert!(config.display.queries);
        assert_eq!(config.display.chat_width_percent, 50);
        assert_eq!(config.export.directory, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.generation.latency(), Duration::from_millis(1500));
        assert!(config.display.diagram);
        assert!(config.display.queries);
        assert_eq!(config.display.chat_width(), 45);
        assert_eq!(config.export.directory, PathBuf::from("."));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_chat_width_is_clamped() {
        let mut display = DisplayConfig {
            chat_width_percent: 90,
            ..Default::default()
        };
        assert_eq!(display.chat_width(), 60);
        display.chat_width_percent = 5;
        assert_eq!(display.chat_width(), 25);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[generation]\nlatency_ms = \"slow\"\n").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert_eq!(err.category(), "Configuration Error");
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [(ENV_LATENCY_MS, "10"), (ENV_EXPORT_DIR, "/srv/out")]
            .into_iter()
            .collect();

        let mut config = Config::default();
        config
            .apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.generation.latency_ms, 10);
        assert_eq!(config.export.directory, PathBuf::from("/srv/out"));
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut config = Config::default();
        let result = config.apply_overrides_from(|k| {
            (k == ENV_LATENCY_MS).then(|| "fast".to_string())
        });
        assert!(result.is_err());
        assert_eq!(config.generation.latency_ms, 1500);
    }
}
