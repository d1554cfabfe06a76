//! Reports for headless runs.

use super::{HeadlessResult, HeadlessState};
use crate::cli::OutputFormat;
use ratatui::buffer::Buffer;
use serde::Serialize;

/// Plain text of a buffer: trailing spaces and trailing blank rows dropped,
/// always ending in a newline.
pub fn screen_text(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    let mut rows: Vec<String> = if width == 0 {
        Vec::new()
    } else {
        buffer
            .content
            .chunks(width)
            .map(|row| {
                let line: String = row.iter().map(|cell| cell.symbol()).collect();
                line.trim_end().to_string()
            })
            .collect()
    };
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }

    let mut text = rows.join("\n");
    text.push('\n');
    text
}

/// Renders a finished run in the requested format.
pub fn render_report(format: OutputFormat, result: &HeadlessResult) -> String {
    match format {
        OutputFormat::Text => format!("{}\n{}", result.screen, summary(result)),
        OutputFormat::Json => json_report(result),
        OutputFormat::Frames => {
            let mut out = String::new();
            for frame in &result.frames {
                let label = frame.event.as_deref().unwrap_or("initial");
                out.push_str(&format!("--- frame {}: {label} ---\n{}\n", frame.number, frame.screen));
            }
            out.push_str(&format!("{} frames\n", result.frames.len()));
            out.push_str(&summary(result));
            out
        }
    }
}

/// The closing lines of text and frames output.
fn summary(result: &HeadlessResult) -> String {
    let state = &result.state;
    let mut out = format!(
        "steps: {}, assertions: {} passed, {} failed\n",
        result.events_executed,
        result.assertions_passed,
        result.failures.len()
    );
    out.push_str(&format!(
        "thread: {} ({} messages, {} threads)\n",
        state.active_thread,
        state.message_count,
        state.threads.len()
    ));
    match (&state.schema, &state.schema_tab) {
        (Some(key), Some(tab)) => out.push_str(&format!("schema: {key} [{tab}]\n")),
        (Some(key), None) => out.push_str(&format!("schema: {key}\n")),
        _ if state.is_generating => out.push_str("schema: generating\n"),
        _ => out.push_str("schema: none\n"),
    }
    for failure in &result.failures {
        out.push_str(&format!("failed: {failure}\n"));
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    events_executed: usize,
    assertions: AssertionTally<'a>,
    state: &'a HeadlessState,
    screen: Vec<&'a str>,
}

#[derive(Serialize)]
struct AssertionTally<'a> {
    passed: usize,
    failed: usize,
    failures: &'a [String],
}

fn json_report(result: &HeadlessResult) -> String {
    let report = JsonReport {
        events_executed: result.events_executed,
        assertions: AssertionTally {
            passed: result.assertions_passed,
            failed: result.failures.len(),
            failures: &result.failures,
        },
        state: &result.state,
        screen: result.screen.lines().collect(),
    };
    serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize report: {e}\"}}"))
}
