//! Async wrapper around [`CardDashboard`] for use in async runtimes (Tokio, etc.).
//!
//! Loading reads the whole spreadsheet through DuckDB, so it runs on the
//! blocking thread pool via [`tokio::task::spawn_blocking`]. Event handling
//! is dispatched the same way to keep the event loop free.
//!
//! # Example
//!
//! ```no_run
//! use card_dashboard::{AsyncCardDashboard, Input};
//!
//! # async fn example() -> card_dashboard::Result<()> {
//! let dashboard = AsyncCardDashboard::builder()
//!     .source("Card_list.xlsx")
//!     .build()
//!     .await?;
//!
//! let updates = dashboard.handle(Input::Languages(vec!["German".into()])).await?;
//! let headline = dashboard.run(|d| Ok(d.headline())).await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::dashboard::{Input, Snapshot, Update};
use crate::error::{LoadError, Result};
use crate::{config, CardDashboard};

// ---------------------------------------------------------------------------
// AsyncCardDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCardDashboard`].
pub struct AsyncCardDashboardBuilder {
    source: Option<PathBuf>,
    sheet: Option<String>,
    image_base_url: String,
    owner: String,
}

impl Default for AsyncCardDashboardBuilder {
    fn default() -> Self {
        Self {
            source: None,
            sheet: None,
            image_base_url: config::IMAGE_BASE_URL.to_string(),
            owner: config::DEFAULT_OWNER.to_string(),
        }
    }
}

impl AsyncCardDashboardBuilder {
    /// Path of the collection spreadsheet.
    pub fn source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Worksheet to read from a workbook.
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

    /// Load the collection on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncCardDashboard> {
        tokio::task::spawn_blocking(move || {
            let mut builder = CardDashboard::builder()
                .image_base_url(&self.image_base_url)
                .owner(&self.owner);
            if let Some(path) = self.source {
                builder = builder.source(path);
            }
            if let Some(sheet) = self.sheet {
                builder = builder.sheet(&sheet);
            }
            let dashboard = builder.build()?;
            Ok(AsyncCardDashboard {
                inner: Arc::new(Mutex::new(dashboard)),
            })
        })
        .await
        .map_err(|e| LoadError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncCardDashboard
// ---------------------------------------------------------------------------

/// Async wrapper around [`CardDashboard`].
///
/// The dashboard sits behind a [`Mutex`]; every call runs on the blocking
/// pool with the lock held.
#[derive(Clone)]
pub struct AsyncCardDashboard {
    inner: Arc<Mutex<CardDashboard>>,
}

impl AsyncCardDashboard {
    /// Create a new builder for configuring the async dashboard.
    pub fn builder() -> AsyncCardDashboardBuilder {
        AsyncCardDashboardBuilder::default()
    }

    /// Run a sync dashboard operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut CardDashboard) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dashboard = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = dashboard
                .lock()
                .map_err(|_| LoadError::InvalidArgument("dashboard lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| LoadError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Feed one user interaction through the bindings.
    pub async fn handle(&self, input: Input) -> Result<Vec<Update>> {
        self.run(move |d| Ok(d.handle(input))).await
    }

    /// Every current output at once.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        self.run(|d| Ok(d.snapshot())).await
    }
}
