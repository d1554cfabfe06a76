//! Display surface for generated schemas.
//!
//! The store decides *what* is on display; a [`DisplaySurface`] decides how
//! it is shown. [`SchemaView`] is the TUI implementation: it keeps the tab,
//! scroll and query selection of the schema panel and pre-renders the
//! diagram once per bundle.

use crate::catalog::SchemaBundle;
use crate::diagram::DiagramView;
use crate::export;

/// Something that can show a bundle.
pub trait DisplaySurface {
    /// Shows a freshly generated bundle, replacing whatever was shown.
    fn present(&mut self, bundle: &SchemaBundle);

    /// Returns to the empty state.
    fn clear(&mut self);
}

/// Tabs of the schema panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaTab {
    #[default]
    Sql,
    Diagram,
    Queries,
}

impl SchemaTab {
    pub const ALL: [SchemaTab; 3] = [SchemaTab::Sql, SchemaTab::Diagram, SchemaTab::Queries];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Sql => "SQL Schema",
            Self::Diagram => "ERD",
            Self::Queries => "Queries",
        }
    }

    /// Whether the tab is offered for `bundle`.
    pub fn is_available(&self, bundle: &SchemaBundle) -> bool {
        match self {
            Self::Sql => true,
            Self::Diagram => bundle.diagram_enabled,
            Self::Queries => bundle.queries_enabled,
        }
    }

    /// Tab for the `1`/`2`/`3` shortcuts.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::Sql),
            '2' => Some(Self::Diagram),
            '3' => Some(Self::Queries),
            _ => None,
        }
    }
}

/// Content the user can copy or save from the current tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Shown in toasts, e.g. "SQL schema" or "Query 2".
    pub label: String,
    /// Suggested file name when saving.
    pub filename: String,
    pub content: String,
}

/// State of the schema panel.
#[derive(Debug, Default)]
pub struct SchemaView {
    bundle: Option<SchemaBundle>,
    diagram: Option<DiagramView>,
    tab: SchemaTab,
    scroll: u16,
    selected_query: usize,
}

impl DisplaySurface for SchemaView {
    fn present(&mut self, bundle: &SchemaBundle) {
        self.diagram = bundle
            .diagram_enabled
            .then(|| DiagramView::build(&bundle.diagram));
        self.bundle = Some(bundle.clone());
        self.tab = SchemaTab::Sql;
        self.scroll = 0;
        self.selected_query = 0;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

impl SchemaView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bundle(&self) -> Option<&SchemaBundle> {
        self.bundle.as_ref()
    }

    pub fn diagram(&self) -> Option<&DiagramView> {
        self.diagram.as_ref()
    }

    pub fn tab(&self) -> SchemaTab {
        self.tab
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn selected_query(&self) -> usize {
        self.selected_query
    }

    /// Tabs offered for the current bundle; empty when nothing is shown.
    pub fn available_tabs(&self) -> Vec<SchemaTab> {
        match &self.bundle {
            Some(bundle) => SchemaTab::ALL
                .into_iter()
                .filter(|t| t.is_available(bundle))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Switches to `tab` if it is offered. Returns whether it switched.
    pub fn select_tab(&mut self, tab: SchemaTab) -> bool {
        if !self.available_tabs().contains(&tab) {
            return false;
        }
        if self.tab != tab {
            self.tab = tab;
            self.scroll = 0;
        }
        true
    }

    pub fn next_tab(&mut self) {
        self.step_tab(1);
    }

    pub fn prev_tab(&mut self) {
        self.step_tab(-1);
    }

    fn step_tab(&mut self, delta: isize) {
        let tabs = self.available_tabs();
        if tabs.is_empty() {
            return;
        }
        let current = tabs.iter().position(|t| *t == self.tab).unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.select_tab(tabs[next]);
    }

    /// Up arrow: previous query on the Queries tab, otherwise scroll.
    pub fn move_up(&mut self) {
        if self.tab == SchemaTab::Queries {
            self.selected_query = self.selected_query.saturating_sub(1);
        } else {
            self.scroll = self.scroll.saturating_sub(1);
        }
    }

    /// Down arrow: next query on the Queries tab, otherwise scroll.
    pub fn move_down(&mut self) {
        if self.tab == SchemaTab::Queries {
            let count = self.bundle.as_ref().map_or(0, |b| b.queries.len());
            if self.selected_query + 1 < count {
                self.selected_query += 1;
            }
        } else {
            self.scroll = self.scroll.saturating_add(1);
        }
    }

    /// What `c`/`s` act on in the current tab.
    ///
    /// The ERD tab offers the SQL, since the diagram itself is only a view.
    pub fn artifact(&self) -> Option<Artifact> {
        let bundle = self.bundle.as_ref()?;
        match self.tab {
            SchemaTab::Sql | SchemaTab::Diagram => Some(Artifact {
                label: "SQL schema".to_string(),
                filename: export::SCHEMA_FILENAME.to_string(),
                content: bundle.sql.clone(),
            }),
            SchemaTab::Queries => {
                let query = bundle.queries.get(self.selected_query)?;
                Some(Artifact {
                    label: format!("Query {}", self.selected_query + 1),
                    filename: export::query_filename(self.selected_query),
                    content: query.clone(),
                })
            }
        }
    }
}

/// Surface that records calls, for tests of code driving a surface.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub presented: Vec<SchemaBundle>,
    pub clears: usize,
}

#[cfg(test)]
impl DisplaySurface for RecordingSurface {
    fn present(&mut self, bundle: &SchemaBundle) {
        self.presented.push(bundle.clone());
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}
