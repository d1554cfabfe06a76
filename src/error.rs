//! Error types for Schema Pilot.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for Schema Pilot operations.
#[derive(Error, Debug)]
pub enum PilotError {
    /// Configuration errors (invalid config file, bad CLI values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem errors (identity file, exports, scripts).
    #[error("I/O error: {0}")]
    Io(String),

    /// ER diagram source could not be parsed for rendering.
    #[error("Diagram error: {0}")]
    Diagram(String),

    /// Clipboard backend failures.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Internal application errors (terminal setup, unexpected states, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PilotError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an I/O error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Creates a diagram error with the given message.
    pub fn diagram(msg: impl Into<String>) -> Self {
        Self::Diagram(msg.into())
    }

    /// Creates a clipboard error with the given message.
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
            Self::Diagram(_) => "Diagram Error",
            Self::Clipboard(_) => "Clipboard Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using PilotError.
pub type Result<T> = std::result::Result<T, PilotError>;
