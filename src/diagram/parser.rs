//! Parser for Mermaid `erDiagram` sources.
//!
//! Supports the subset the catalog templates use: entity blocks with
//! `type name [PK|FK|UK, ...] ["comment"]` attributes, relationship lines
//! with crow's-foot cardinalities, and `%%` comments.

use crate::error::{PilotError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Key marker on an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Primary,
    Foreign,
    Unique,
}

impl KeyKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "PK" => Some(Self::Primary),
            "FK" => Some(Self::Foreign),
            "UK" => Some(Self::Unique),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "PK",
            Self::Foreign => "FK",
            Self::Unique => "UK",
        }
    }
}

/// One column of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub ty: String,
    pub name: String,
    pub keys: Vec<KeyKind>,
    pub comment: Option<String>,
}

/// A table-like box in the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

/// How many rows one side of a relationship may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ZeroOrOne,
    ExactlyOne,
    ZeroOrMore,
    OneOrMore,
}

impl Cardinality {
    fn from_left(marker: &str) -> Option<Self> {
        match marker {
            "|o" => Some(Self::ZeroOrOne),
            "||" => Some(Self::ExactlyOne),
            "}o" => Some(Self::ZeroOrMore),
            "}|" => Some(Self::OneOrMore),
            _ => None,
        }
    }

    fn from_right(marker: &str) -> Option<Self> {
        match marker {
            "o|" => Some(Self::ZeroOrOne),
            "||" => Some(Self::ExactlyOne),
            "o{" => Some(Self::ZeroOrMore),
            "|{" => Some(Self::OneOrMore),
            _ => None,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ZeroOrOne => "0..1",
            Self::ExactlyOne => "1",
            Self::ZeroOrMore => "0..*",
            Self::OneOrMore => "1..*",
        })
    }
}

/// A line between two entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub left: String,
    pub left_cardinality: Cardinality,
    pub right: String,
    pub right_cardinality: Cardinality,
    /// Solid (`--`) rather than dashed (`..`) line.
    pub identifying: bool,
    pub label: String,
}

/// A parsed diagram.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErDiagram {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
}

impl ErDiagram {
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    fn ensure_entity(&mut self, name: &str) -> usize {
        match self.entities.iter().position(|e| e.name == name) {
            Some(index) => index,
            None => {
                self.entities.push(Entity {
                    name: name.to_string(),
                    attributes: Vec::new(),
                });
                self.entities.len() - 1
            }
        }
    }
}

fn relationship_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^([A-Za-z_][\w-]*)\s+(\|o|\|\||\}o|\}\|)(--|\.\.)(o\||\|\||o\{|\|\{)\s+([A-Za-z_][\w-]*)\s*:\s*(.+)$"#,
        )
        .expect("relationship pattern is valid")
    })
}

fn entity_open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z_][\w-]*)\s*\{$").expect("entity pattern is valid"))
}

fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^([A-Za-z_][\w\[\]()-]*)\s+([A-Za-z_*][\w-]*)((?:\s+(?:PK|FK|UK)\s*,?)*)\s*(?:"([^"]*)")?$"#)
            .expect("attribute pattern is valid")
    })
}

fn unquote(label: &str) -> String {
    let label = label.trim();
    label
        .strip_prefix('"')
        .and_then(|l| l.strip_suffix('"'))
        .unwrap_or(label)
        .to_string()
}

fn line_error(line_no: usize, msg: impl fmt::Display) -> PilotError {
    PilotError::diagram(format!("line {line_no}: {msg}"))
}

/// Parses an `erDiagram` source.
pub fn parse(source: &str) -> Result<ErDiagram> {
    let mut diagram = ErDiagram::default();
    let mut seen_header = false;
    // (entity index, line where the block opened)
    let mut open_block: Option<(usize, usize)> = None;

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with("%%") {
            continue;
        }

        if !seen_header {
            if line != "erDiagram" {
                return Err(line_error(
                    line_no,
                    format!("expected 'erDiagram', found '{line}'"),
                ));
            }
            seen_header = true;
            continue;
        }

        if let Some((entity_index, _)) = open_block {
            if line == "}" {
                open_block = None;
                continue;
            }
            let caps = attribute_regex()
                .captures(line)
                .ok_or_else(|| line_error(line_no, format!("invalid attribute '{line}'")))?;
            let keys = caps
                .get(3)
                .map(|m| {
                    m.as_str()
                        .split(|c: char| c == ',' || c.is_whitespace())
                        .filter_map(KeyKind::parse)
                        .collect()
                })
                .unwrap_or_default();
            diagram.entities[entity_index].attributes.push(Attribute {
                ty: caps[1].to_string(),
                name: caps[2].to_string(),
                keys,
                comment: caps.get(4).map(|m| m.as_str().to_string()),
            });
            continue;
        }

        if let Some(caps) = entity_open_regex().captures(line) {
            let entity_index = diagram.ensure_entity(&caps[1]);
            open_block = Some((entity_index, line_no));
            continue;
        }

        if let Some(caps) = relationship_regex().captures(line) {
            let (Some(left_cardinality), Some(right_cardinality)) = (
                Cardinality::from_left(&caps[2]),
                Cardinality::from_right(&caps[4]),
            ) else {
                return Err(line_error(line_no, "invalid cardinality"));
            };
            diagram.ensure_entity(&caps[1]);
            diagram.ensure_entity(&caps[5]);
            diagram.relationships.push(Relationship {
                left: caps[1].to_string(),
                left_cardinality,
                right: caps[5].to_string(),
                right_cardinality,
                identifying: &caps[3] == "--",
                label: unquote(&caps[6]),
            });
            continue;
        }

        return Err(line_error(
            line_no,
            format!("unrecognized statement '{line}'"),
        ));
    }

    if !seen_header {
        return Err(PilotError::diagram("diagram is empty"));
    }
    if let Some((entity_index, opened_at)) = open_block {
        return Err(line_error(
            opened_at,
            format!(
                "entity '{}' is never closed",
                diagram.entities[entity_index].name
            ),
        ));
    }

    Ok(diagram)
}
