//! Template catalog.
//!
//! A closed table of canned schema bundles keyed by [`CatalogKey`]. Lookups
//! are total: every key has exactly one template.

use crate::config::DisplayConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier selecting one of the fixed templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKey {
    Ecommerce,
    Blog,
}

impl CatalogKey {
    /// All keys, in catalog order.
    pub const ALL: [CatalogKey; 2] = [CatalogKey::Ecommerce, CatalogKey::Blog];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ecommerce => "ecommerce",
            Self::Blog => "blog",
        }
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ecommerce" => Ok(Self::Ecommerce),
            "blog" => Ok(Self::Blog),
            _ => Err(format!(
                "Unknown catalog key: {s}. Expected: ecommerce or blog"
            )),
        }
    }
}

/// The SQL / diagram / queries produced by one generation.
///
/// Replaced wholesale on every generation, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaBundle {
    /// Template the bundle came from.
    pub key: CatalogKey,
    /// SQL DDL.
    pub sql: String,
    /// Mermaid `erDiagram` source.
    pub diagram: String,
    /// Example queries, in display order.
    pub queries: Vec<String>,
    /// Whether the diagram should be offered to the user.
    pub diagram_enabled: bool,
    /// Whether the queries should be offered to the user.
    pub queries_enabled: bool,
}

struct Template {
    sql: &'static str,
    diagram: &'static str,
    queries: &'static [&'static str],
}

const ECOMMERCE: Template = Template {
    sql: include_str!("templates/ecommerce.sql"),
    diagram: include_str!("templates/ecommerce.mmd"),
    queries: &[
        "-- Get all products in a category with stock\nSELECT p.*, c.name as category_name\nFROM products p\nJOIN categories c ON p.category_id = c.id\nWHERE p.stock_quantity > 0\nORDER BY p.name;",
        "-- Get user's recent orders\nSELECT o.*, u.email, u.first_name, u.last_name\nFROM orders o\nJOIN users u ON o.user_id = u.id\nWHERE o.created_at >= NOW() - INTERVAL '30 days'\nORDER BY o.created_at DESC;",
        "-- Top selling products\nSELECT p.name, p.price, SUM(oi.quantity) as total_sold\nFROM products p\nJOIN order_items oi ON p.id = oi.product_id\nJOIN orders o ON oi.order_id = o.id\nWHERE o.status = 'completed'\nGROUP BY p.id, p.name, p.price\nORDER BY total_sold DESC\nLIMIT 10;",
    ],
};

const BLOG: Template = Template {
    sql: include_str!("templates/blog.sql"),
    diagram: include_str!("templates/blog.mmd"),
    queries: &[
        "-- Get published posts with author info\nSELECT p.*, u.username, u.avatar_url\nFROM posts p\nJOIN users u ON p.author_id = u.id\nWHERE p.status = 'published'\nORDER BY p.published_at DESC;",
        "-- Get posts by tag\nSELECT p.title, p.slug, p.excerpt, t.name as tag_name\nFROM posts p\nJOIN post_tags pt ON p.id = pt.post_id\nJOIN tags t ON pt.tag_id = t.id\nWHERE t.slug = 'technology'\nAND p.status = 'published';",
        "-- Get comment count per post\nSELECT p.title, COUNT(c.id) as comment_count\nFROM posts p\nLEFT JOIN comments c ON p.id = c.post_id AND c.status = 'approved'\nWHERE p.status = 'published'\nGROUP BY p.id, p.title\nORDER BY comment_count DESC;",
    ],
};

/// The template table plus the feature flags stamped onto every bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    diagram_enabled: bool,
    queries_enabled: bool,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl Catalog {
    pub fn new(diagram_enabled: bool, queries_enabled: bool) -> Self {
        Self {
            diagram_enabled,
            queries_enabled,
        }
    }

    /// Builds a catalog whose flags follow the `[display]` config section.
    pub fn from_display(display: &DisplayConfig) -> Self {
        Self::new(display.diagram, display.queries)
    }

    /// Returns the bundle for `key`.
    pub fn lookup(&self, key: CatalogKey) -> SchemaBundle {
        let template = match key {
            CatalogKey::Ecommerce => &ECOMMERCE,
            CatalogKey::Blog => &BLOG,
        };

        SchemaBundle {
            key,
            sql: template.sql.trim_end().to_string(),
            diagram: template.diagram.trim_end().to_string(),
            queries: template.queries.iter().map(|q| q.to_string()).collect(),
            diagram_enabled: self.diagram_enabled,
            queries_enabled: self.queries_enabled,
        }
    }
}
