//! Card collection dashboard core.
//!
//! Loads a spreadsheet of owned trading cards once, then recomputes the
//! filtered table, per-set and per-language counts, summary numbers and the
//! selected card's preview URL whenever the rendering surface reports a
//! filter or selection change.
//!
//! # Quick start
//!
//! ```no_run
//! use card_dashboard::{CardDashboard, Input};
//!
//! let mut dashboard = CardDashboard::builder()
//!     .source("Card_list.xlsx")
//!     .owner("Luke")
//!     .build()
//!     .unwrap();
//!
//! // Narrow the table to one set and pick its first row
//! dashboard.handle(Input::SetNames(vec!["Scarlet & Violet".into()]));
//! dashboard.handle(Input::Selection(Some(0)));
//!
//! println!("{}", dashboard.headline().join("\n"));
//! println!("{}", dashboard.preview());
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod models;
pub mod presentation;
pub mod queries;
pub mod sql_builder;
pub mod workbook;

#[cfg(feature = "async")]
pub use async_client::AsyncCardDashboard;
pub use connection::Connection;
pub use dashboard::{Dashboard, Input, Node, Snapshot, Update};
pub use error::{LoadError, Result};
pub use loader::{Dataset, FilterOptions, SourceFormat};
pub use models::{CardRecord, DateRange, FilterCriteria, FilteredView, GroupCount, GroupField, SummaryStats};
pub use queries::{filter, group_by, resolve_image, summarize, ImageResolver};
pub use sql_builder::SqlBuilder;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use presentation::{BarChart, TableRow};

// ---------------------------------------------------------------------------
// CardDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CardDashboard`].
///
/// Use [`CardDashboard::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CardDashboardBuilder::build) to load the
/// collection.
pub struct CardDashboardBuilder {
    source: Option<PathBuf>,
    sheet: Option<String>,
    image_base_url: String,
    owner: String,
}

impl Default for CardDashboardBuilder {
    fn default() -> Self {
        Self {
            source: None,
            sheet: None,
            image_base_url: config::IMAGE_BASE_URL.to_string(),
            owner: config::DEFAULT_OWNER.to_string(),
        }
    }
}

impl CardDashboardBuilder {
    /// Path of the collection spreadsheet (`.xlsx`, `.xls`, `.csv`, `.tsv`).
    pub fn source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Worksheet to read from a workbook. Defaults to the first one.
    pub fn sheet(mut self, name: &str) -> Self {
        self.sheet = Some(name.to_string());
        self
    }

    /// Asset host used for card previews.
    pub fn image_base_url(mut self, url: &str) -> Self {
        self.image_base_url = url.to_string();
        self
    }

    /// Collection owner named in the summary headline.
    pub fn owner(mut self, name: &str) -> Self {
        self.owner = name.to_string();
        self
    }

    /// Load the spreadsheet and compute the initial, unfiltered outputs.
    ///
    /// Fails with [`LoadError`] if no source was configured, the file is
    /// missing or unreadable, or required columns are absent.
    pub fn build(self) -> Result<CardDashboard> {
        let source = self.source.clone().ok_or_else(|| {
            LoadError::InvalidArgument("no source spreadsheet configured".into())
        })?;
        let dataset = loader::load_dataset(&source, self.sheet.as_deref())?;
        Ok(self.build_with_dataset(dataset))
    }

    /// Skip loading and drive the dashboard from records already in memory.
    pub fn build_with_dataset(self, dataset: Dataset) -> CardDashboard {
        let resolver = ImageResolver::new(&self.image_base_url);
        CardDashboard {
            bindings: Dashboard::new(Arc::new(dataset), resolver),
            source: self.source,
            owner: self.owner,
        }
    }
}

// ---------------------------------------------------------------------------
// CardDashboard
// ---------------------------------------------------------------------------

/// The main entry point: a loaded collection plus its reactive bindings.
///
/// Created via [`CardDashboard::builder()`].
pub struct CardDashboard {
    bindings: Dashboard,
    source: Option<PathBuf>,
    owner: String,
}

impl CardDashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> CardDashboardBuilder {
        CardDashboardBuilder::default()
    }

    // -- Inputs ------------------------------------------------------------

    /// Feed one user interaction through the bindings.
    ///
    /// Returns only the outputs that depend on the changed input.
    pub fn handle(&mut self, input: Input) -> Vec<Update> {
        self.bindings.handle(input)
    }

    // -- Outputs -----------------------------------------------------------

    pub fn dataset(&self) -> &Dataset {
        self.bindings.dataset()
    }

    /// Set names, languages and date bounds for the filter controls.
    pub fn options(&self) -> FilterOptions {
        self.dataset().options()
    }

    pub fn view(&self) -> &FilteredView {
        self.bindings.table()
    }

    pub fn summary(&self) -> &SummaryStats {
        self.bindings.summary()
    }

    /// URL of the selected card's image, or `""` without a valid selection.
    pub fn preview(&self) -> &str {
        self.bindings.preview()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.bindings.snapshot()
    }

    pub fn headline(&self) -> [String; 2] {
        presentation::headline(&self.owner, self.summary())
    }

    pub fn set_chart(&self) -> BarChart {
        presentation::set_chart(self.bindings.set_counts())
    }

    pub fn language_chart(&self) -> BarChart {
        presentation::language_chart(self.bindings.language_counts())
    }

    /// Zero-based page of display rows from the current table.
    pub fn table_page(&self, index: usize) -> Vec<TableRow> {
        presentation::table_rows(presentation::page(self.view(), index))
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Return a reference to the underlying bindings for advanced usage.
    pub fn bindings(&self) -> &Dashboard {
        &self.bindings
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CardDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self
            .source
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());
        write!(
            f,
            "CardDashboard(source={}, owner={}, cards={}, visible={})",
            source,
            self.owner,
            self.dataset().len(),
            self.view().len()
        )
    }
}
