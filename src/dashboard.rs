//! Reactive bindings between filter controls and derived outputs.
//!
//! The wiring is declared as data in [`dependents`]: an input event names a
//! [`Source`], every [`Node`] that depends on it is recomputed, and each
//! recomputed node in turn triggers its own dependents. The derived values
//! are pure functions of the dataset and the latest input snapshot.
//!
//! ```text
//! set filter ──┐
//! language ────┼──> Table ──> SetCounts, LanguageCounts, Summary, Preview
//! date picker ─┘                                                  ^
//! row selection ──────────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::loader::Dataset;
use crate::models::{DateRange, FilterCriteria, FilteredView, GroupCount, GroupField, SummaryStats};
use crate::queries::{filter, group_by, summarize, ImageResolver};

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A derived output the rendering surface displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Table,
    SetCounts,
    LanguageCounts,
    Summary,
    Preview,
}

/// Something whose change triggers recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    SetFilter,
    LanguageFilter,
    DatePicker,
    RowSelection,
    Node(Node),
}

/// Nodes recomputed when `source` changes.
pub fn dependents(source: Source) -> &'static [Node] {
    match source {
        Source::SetFilter | Source::LanguageFilter | Source::DatePicker => &[Node::Table],
        Source::RowSelection => &[Node::Preview],
        Source::Node(Node::Table) => &[
            Node::SetCounts,
            Node::LanguageCounts,
            Node::Summary,
            Node::Preview,
        ],
        Source::Node(_) => &[],
    }
}

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// A raw user interaction reported by the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Input {
    /// New set-name selection; empty clears the restriction.
    SetNames(Vec<String>),
    /// New language selection; empty clears the restriction.
    Languages(Vec<String>),
    DateRange(DateRange),
    /// Selected row index into the current table, if any.
    Selection(Option<usize>),
}

impl Input {
    pub fn source(&self) -> Source {
        match self {
            Self::SetNames(_) => Source::SetFilter,
            Self::Languages(_) => Source::LanguageFilter,
            Self::DateRange(_) => Source::DatePicker,
            Self::Selection(_) => Source::RowSelection,
        }
    }
}

/// A freshly recomputed output value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", content = "value", rename_all = "snake_case")]
pub enum Update {
    Table(FilteredView),
    SetCounts(GroupCount),
    LanguageCounts(GroupCount),
    Summary(SummaryStats),
    Preview(String),
}

impl Update {
    pub fn node(&self) -> Node {
        match self {
            Self::Table(_) => Node::Table,
            Self::SetCounts(_) => Node::SetCounts,
            Self::LanguageCounts(_) => Node::LanguageCounts,
            Self::Summary(_) => Node::Summary,
            Self::Preview(_) => Node::Preview,
        }
    }
}

/// Every current output at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub criteria: FilterCriteria,
    pub selection: Option<usize>,
    pub table: FilteredView,
    pub set_counts: GroupCount,
    pub language_counts: GroupCount,
    pub summary: SummaryStats,
    pub preview: String,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Holds the latest input snapshot and the outputs derived from it.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    resolver: ImageResolver,
    criteria: FilterCriteria,
    selection: Option<usize>,
    table: FilteredView,
    set_counts: GroupCount,
    language_counts: GroupCount,
    summary: SummaryStats,
    preview: String,
}

impl Dashboard {
    /// Start with no filters and no selection, all outputs computed.
    pub fn new(dataset: Arc<Dataset>, resolver: ImageResolver) -> Self {
        let mut dashboard = Self {
            dataset,
            resolver,
            criteria: FilterCriteria::default(),
            selection: None,
            table: FilteredView::default(),
            set_counts: GroupCount::new(),
            language_counts: GroupCount::new(),
            summary: SummaryStats::default(),
            preview: String::new(),
        };
        dashboard.propagate(&[Node::Table]);
        dashboard
    }

    /// Apply one input event and return the outputs it recomputed, in
    /// dependency order.
    pub fn handle(&mut self, input: Input) -> Vec<Update> {
        let source = input.source();
        match input {
            Input::SetNames(names) => self.criteria.set_names = names.into_iter().collect(),
            Input::Languages(languages) => {
                self.criteria.languages = languages.into_iter().collect()
            }
            Input::DateRange(range) => self.criteria.date_range = range,
            Input::Selection(index) => self.selection = index,
        }
        self.propagate(dependents(source))
    }

    fn propagate(&mut self, roots: &[Node]) -> Vec<Update> {
        let mut updates = Vec::new();
        let mut queue: VecDeque<Node> = roots.iter().copied().collect();
        while let Some(node) = queue.pop_front() {
            updates.push(self.recompute(node));
            queue.extend(dependents(Source::Node(node)).iter().copied());
        }
        updates
    }

    fn recompute(&mut self, node: Node) -> Update {
        match node {
            Node::Table => {
                self.table = filter(self.dataset.records(), &self.criteria);
                Update::Table(self.table.clone())
            }
            Node::SetCounts => {
                self.set_counts = group_by(&self.table, GroupField::SetName);
                Update::SetCounts(self.set_counts.clone())
            }
            Node::LanguageCounts => {
                self.language_counts = group_by(&self.table, GroupField::Language);
                Update::LanguageCounts(self.language_counts.clone())
            }
            Node::Summary => {
                self.summary = summarize(&self.table);
                Update::Summary(self.summary.clone())
            }
            Node::Preview => {
                // A stale index past the end of the table resolves to no image
                let selected = self.selection.and_then(|i| self.table.get(i));
                self.preview = self.resolver.resolve(selected);
                Update::Preview(self.preview.clone())
            }
        }
    }

    // -- Accessors ---------------------------------------------------------

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn table(&self) -> &FilteredView {
        &self.table
    }

    pub fn set_counts(&self) -> &GroupCount {
        &self.set_counts
    }

    pub fn language_counts(&self) -> &GroupCount {
        &self.language_counts
    }

    pub fn summary(&self) -> &SummaryStats {
        &self.summary
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            criteria: self.criteria.clone(),
            selection: self.selection,
            table: self.table.clone(),
            set_counts: self.set_counts.clone(),
            language_counts: self.language_counts.clone(),
            summary: self.summary.clone(),
            preview: self.preview.clone(),
        }
    }
}
