//! ER diagram rendering with a plain-text fallback.
//!
//! Rendering is the one fallible step between a generated bundle and the
//! screen. A source that cannot be parsed is shown verbatim with a warning
//! instead of failing.

mod parser;
mod render;

pub use parser::{parse, Attribute, Cardinality, Entity, ErDiagram, KeyKind, Relationship};
pub use render::{render, render_entity, render_relationship};

use tracing::warn;

/// Warning shown above the raw source when rendering failed.
pub const FALLBACK_WARNING: &str = "Could not render diagram visually. Showing syntax instead.";

/// What the ERD tab shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramView {
    /// Successfully rendered diagram.
    Rendered { lines: Vec<String> },
    /// Raw source plus the reason rendering failed.
    Fallback {
        source: String,
        warning: String,
        reason: String,
    },
}

impl DiagramView {
    /// Parses and renders `source`, falling back to the raw text on error.
    pub fn build(source: &str) -> Self {
        match parse(source) {
            Ok(diagram) => Self::Rendered {
                lines: render(&diagram),
            },
            Err(e) => {
                warn!("Diagram rendering failed: {}", e);
                Self::Fallback {
                    source: source.to_string(),
                    warning: FALLBACK_WARNING.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Lines to draw, including the warning for the fallback.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Rendered { lines } => lines.clone(),
            Self::Fallback {
                source,
                warning,
                reason,
            } => {
                let mut lines = vec![
                    "Entity Relationship Diagram".to_string(),
                    "Mermaid ERD Syntax (Rendering Error)".to_string(),
                    String::new(),
                ];
                lines.extend(source.lines().map(String::from));
                lines.push(String::new());
                lines.push(format!("⚠ {warning}"));
                lines.push(format!("  {reason}"));
                lines
            }
        }
    }
}
