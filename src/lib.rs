//! Schema Pilot - a terminal chat that sketches database schemas.
//!
//! This library exposes the core modules for use in integration tests.

pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod diagram;
pub mod display;
pub mod error;
pub mod export;
pub mod generation;
pub mod identity;
pub mod logging;
pub mod session;
pub mod store;
pub mod tui;
