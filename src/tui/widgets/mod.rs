//! TUI widgets for Schema Pilot.
//!
//! Contains reusable UI components.

pub mod chat;
pub mod header;
pub mod input;
pub mod schema;
pub mod sidebar;
pub mod spinner;
pub mod toast;
