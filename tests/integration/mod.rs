//! Library-level integration tests.

pub mod config_test;
pub mod session_test;
