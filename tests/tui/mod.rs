//! Headless binary tests.

pub mod common;
pub mod headless_test;
