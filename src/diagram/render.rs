//! Text rendering of parsed ER diagrams.
//!
//! Entities become boxed column listings; relationships are listed below as
//! `left 1 ──── 0..* right  (label)` lines, dashed for non-identifying ones.

use super::parser::{Entity, ErDiagram, Relationship};

const SOLID: &str = "────";
const DASHED: &str = "┄┄┄┄";

/// Renders the whole diagram as lines of text.
pub fn render(diagram: &ErDiagram) -> Vec<String> {
    let mut lines = Vec::new();

    for (index, entity) in diagram.entities.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.extend(render_entity(entity));
    }

    if !diagram.relationships.is_empty() {
        lines.push(String::new());
        lines.push("Relationships".to_string());
        let name_width = diagram
            .relationships
            .iter()
            .map(|r| r.left.chars().count())
            .max()
            .unwrap_or(0);
        lines.extend(
            diagram
                .relationships
                .iter()
                .map(|r| render_relationship(r, name_width)),
        );
    }

    lines
}

/// Renders one entity as a box.
pub fn render_entity(entity: &Entity) -> Vec<String> {
    let name_width = entity
        .attributes
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(0);

    let rows: Vec<String> = entity
        .attributes
        .iter()
        .map(|a| {
            let keys = a
                .keys
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(",");
            let mut row = format!("{:<name_width$}  {}", a.name, a.ty);
            if !keys.is_empty() {
                row.push(' ');
                row.push_str(&keys);
            }
            row
        })
        .collect();

    let title = format!(" {} ", entity.name);
    let inner_width = rows
        .iter()
        .map(|r| r.chars().count() + 2)
        .chain(std::iter::once(title.chars().count() + 2))
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let fill = inner_width.saturating_sub(title.chars().count() + 1);
    lines.push(format!("┌─{title}{}┐", "─".repeat(fill)));
    for row in rows {
        let pad = inner_width.saturating_sub(row.chars().count() + 2);
        lines.push(format!("│ {row}{} │", " ".repeat(pad)));
    }
    lines.push(format!("└{}┘", "─".repeat(inner_width)));
    lines
}

/// Renders one relationship line, padding the left entity to `name_width`.
pub fn render_relationship(relationship: &Relationship, name_width: usize) -> String {
    let line = if relationship.identifying { SOLID } else { DASHED };
    format!(
        "  {:<name_width$} {} {line} {} {}  ({})",
        relationship.left,
        relationship.left_cardinality,
        relationship.right_cardinality,
        relationship.right,
        relationship.label,
    )
}
