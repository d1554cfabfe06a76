//! Script language for headless runs.
//!
//! A script is a list of `kind:argument` steps, one per line or separated by
//! commas: `key:ctrl+n`, `type:a blog`, `wait:300ms`, `wait:reply`,
//! `resize:100x30`, `snapshot:name`, and `assert:` checks against the screen
//! or the app state. Blank lines and `#` comments are skipped.

use super::HeadlessState;
use crate::error::{PilotError, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use regex::Regex;
use std::time::Duration;

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("escape", KeyCode::Esc),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("backspace", KeyCode::Backspace),
    ("bs", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("del", KeyCode::Delete),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pgup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("pgdn", KeyCode::PageDown),
    ("space", KeyCode::Char(' ')),
];

/// Upper bound for `wait:reply`.
pub const REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// What a `wait:` step waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// A fixed time; replies that land meanwhile are applied.
    For(Duration),
    /// Until no generation is pending, or [`REPLY_TIMEOUT`].
    Reply,
}

/// Operator of a state check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ge,
    Le,
    Gt,
    Lt,
}

impl Comparison {
    // Two-character operators first so `>=` is not read as `>`.
    const OPERATORS: [(&'static str, Comparison); 5] = [
        (">=", Comparison::Ge),
        ("<=", Comparison::Le),
        (">", Comparison::Gt),
        ("<", Comparison::Lt),
        ("=", Comparison::Eq),
    ];

    /// Numbers compare numerically; anything else only supports `=`.
    fn holds(self, actual: &str, expected: &str) -> bool {
        if let (Ok(a), Ok(e)) = (actual.parse::<i64>(), expected.parse::<i64>()) {
            let ordering = a.cmp(&e);
            return match self {
                Self::Eq => ordering.is_eq(),
                Self::Ge => ordering.is_ge(),
                Self::Le => ordering.is_le(),
                Self::Gt => ordering.is_gt(),
                Self::Lt => ordering.is_lt(),
            };
        }
        self == Self::Eq && actual == expected
    }
}

/// A check made by an `assert:` step.
#[derive(Debug, Clone)]
pub enum Check {
    /// Text search on the screen; `exact` is case-sensitive, `absent` inverts.
    Screen {
        needle: String,
        exact: bool,
        absent: bool,
    },
    /// Regex over the whole screen.
    Pattern(Regex),
    /// Comparison against a [`HeadlessState`] field.
    State {
        field: String,
        comparison: Comparison,
        value: String,
    },
}

impl Check {
    pub fn passes(&self, screen: &str, state: &HeadlessState) -> bool {
        match self {
            Self::Screen {
                needle,
                exact,
                absent,
            } => {
                let found = if *exact {
                    screen.contains(needle.as_str())
                } else {
                    screen.to_lowercase().contains(&needle.to_lowercase())
                };
                found != *absent
            }
            Self::Pattern(pattern) => pattern.is_match(screen),
            Self::State {
                field,
                comparison,
                value,
            } => state
                .field(field)
                .is_some_and(|actual| comparison.holds(&actual, value)),
        }
    }
}

/// What a step does.
#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    /// Text for the active editor (message input or rename buffer).
    Type(String),
    Wait(Wait),
    Resize(u16, u16),
    /// Marks a frame; only meaningful with frames output.
    Snapshot(String),
    Assert(Check),
}

/// A parsed step and the text it came from.
#[derive(Debug, Clone)]
pub struct Step {
    pub source: String,
    pub event: Event,
}

/// Parses a whole script.
pub fn parse_script(input: &str) -> Result<Vec<Step>> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_step)
        .collect()
}

/// Parses one `kind:argument` step.
pub fn parse_step(source: &str) -> Result<Step> {
    let (kind, arg) = source.split_once(':').ok_or_else(|| {
        PilotError::config(format!("Invalid step '{source}': expected kind:argument"))
    })?;
    let arg = arg.trim();

    let event = match kind.trim().to_lowercase().as_str() {
        "key" => Event::Key(parse_key(arg)?),
        "type" => Event::Type(arg.to_string()),
        "wait" => Event::Wait(parse_wait(arg)?),
        "resize" => {
            let (width, height) = parse_size(arg)?;
            Event::Resize(width, height)
        }
        "snapshot" => Event::Snapshot(arg.to_string()),
        "assert" => Event::Assert(parse_check(arg)?),
        other => {
            return Err(PilotError::config(format!(
                "Unknown step kind '{other}' (expected key, type, wait, resize, snapshot or assert)"
            )))
        }
    };

    Ok(Step {
        source: source.to_string(),
        event,
    })
}

/// `enter`, `n`, `ctrl+n`, `shift+tab`...
fn parse_key(spec: &str) -> Result<KeyEvent> {
    let mut parts: Vec<&str> = spec.split('+').collect();
    let name = parts
        .pop()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| PilotError::config(format!("Invalid key '{spec}'")))?;

    let mut modifiers = KeyModifiers::NONE;
    for part in parts {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            other => return Err(PilotError::config(format!("Unknown modifier '{other}'"))),
        };
    }

    let lowered = name.to_lowercase();
    let code = match NAMED_KEYS.iter().find(|(named, _)| *named == lowered) {
        Some((_, code)) => *code,
        None => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(PilotError::config(format!("Unknown key '{name}'"))),
            }
        }
    };

    Ok(KeyEvent::new(code, modifiers))
}

/// `250ms`, `2s`, a bare number of milliseconds, or `reply`.
fn parse_wait(arg: &str) -> Result<Wait> {
    let arg = arg.to_lowercase();
    if arg == "reply" {
        return Ok(Wait::Reply);
    }

    let (digits, scale) = match arg.strip_suffix("ms") {
        Some(ms) => (ms, 1),
        None => match arg.strip_suffix('s') {
            Some(secs) => (secs, 1000),
            None => (arg.as_str(), 1),
        },
    };

    digits
        .trim()
        .parse::<u64>()
        .map(|n| Wait::For(Duration::from_millis(n.saturating_mul(scale))))
        .map_err(|_| PilotError::config(format!("Invalid wait '{arg}': use 250ms, 2s or reply")))
}

fn parse_size(arg: &str) -> Result<(u16, u16)> {
    let invalid = || PilotError::config(format!("Invalid size '{arg}': expected WIDTHxHEIGHT"));
    let (width, height) = arg.split_once('x').ok_or_else(invalid)?;
    Ok((
        width.trim().parse().map_err(|_| invalid())?,
        height.trim().parse().map_err(|_| invalid())?,
    ))
}

fn parse_check(arg: &str) -> Result<Check> {
    let (kind, rest) = arg.split_once(':').ok_or_else(|| {
        PilotError::config(format!("Invalid assertion '{arg}': expected assert:kind:value"))
    })?;
    let rest = rest.trim();
    let screen = |exact, absent| Check::Screen {
        needle: rest.to_string(),
        exact,
        absent,
    };

    match kind.trim().to_lowercase().as_str() {
        "contains" => Ok(screen(false, false)),
        "contains-exact" => Ok(screen(true, false)),
        "not-contains" => Ok(screen(false, true)),
        "matches" => Regex::new(rest)
            .map(Check::Pattern)
            .map_err(|e| PilotError::config(format!("Invalid pattern '{rest}': {e}"))),
        "state" => parse_state_check(rest),
        other => Err(PilotError::config(format!(
            "Unknown assertion '{other}' (expected contains, contains-exact, not-contains, matches or state)"
        ))),
    }
}

/// `field=value`, `message_count>=2`...
fn parse_state_check(expr: &str) -> Result<Check> {
    Comparison::OPERATORS
        .iter()
        .find_map(|(operator, comparison)| {
            expr.split_once(*operator).map(|(field, value)| Check::State {
                field: field.trim().to_string(),
                comparison: *comparison,
                value: value.trim().to_string(),
            })
        })
        .ok_or_else(|| {
            PilotError::config(format!(
                "Invalid state assertion '{expr}': expected field=value or field>=value"
            ))
        })
}
