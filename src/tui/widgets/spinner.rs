//! Animated indicator shown while a schema is being generated.

use std::time::Instant;

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Animation speed in milliseconds per frame.
const FRAME_DURATION_MS: u128 = 100;

#[derive(Debug, Clone)]
pub struct Spinner {
    start_time: Instant,
    label: String,
}

impl Spinner {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            label: label.into(),
        }
    }

    pub fn generating() -> Self {
        Self::new("Generating schema")
    }

    /// Returns the current frame of the animation.
    pub fn frame(&self) -> &'static str {
        let frame_index = (self.start_time.elapsed().as_millis() / FRAME_DURATION_MS) as usize;
        FRAMES[frame_index % FRAMES.len()]
    }

    pub fn display(&self) -> String {
        format!("{} {}", self.frame(), self.label)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
