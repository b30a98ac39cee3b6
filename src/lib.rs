//! foldergrid: folder trees, move workflows and configurable data grids for
//! inventory-management consoles.
//!
//! The crate is the headless core behind a "folders on the left, grid on the right"
//! screen for products or customers:
//! - A folder hierarchy derived from the flat list a backend returns
//! - Navigation, multi-select and two move workflows (items into a folder, a folder
//!   under a new parent) with cycle protection
//! - Per-grid column order, widths, visibility, sort and page size persisted through a
//!   key-value collaborator
//! - A pointer/touch gesture machine for header reorder, sort clicks and resizing
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Host screen (web view, TUI, native shell)               │
//! └──────────────────────────────────────────────────────────┘
//!        │ folder / row clicks              │ header pointer events
//! ┌────────────────────────────┐   ┌────────────────────────────┐
//! │ app/                       │   │ drag/                      │
//! │ - FolderWorkspace          │   │ - DragController           │
//! │ - MoveMode, SelectionSet   │   │ - HeaderLayout hit testing │
//! └────────────────────────────┘   └────────────────────────────┘
//!        │             │                    │ GridAction
//! ┌────────────┐ ┌───────────┐     ┌────────────────────────────┐
//! │ tree/      │ │ backend/  │     │ grid/                      │
//! │ pure fns   │ │ async API │     │ - GridConfigStore          │
//! └────────────┘ └───────────┘     │ - row pipeline             │
//!                                  └────────────────────────────┘
//!                                           │
//!                                  ┌────────────────────────────┐
//!                                  │ storage/ KeyValueStore     │
//!                                  └────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Folder and item records, errors
//! - [`tree`]: Tree building, breadcrumbs, cycle checks, counts
//! - [`backend`]: Async backend trait and an in-memory implementation
//! - [`app`]: Selection and move engine
//! - [`grid`]: Column catalogs, configuration store, row pipeline
//! - [`drag`]: Header gesture state machines
//! - [`storage`]: Key-value persistence
//! - [`observability`]: Tracing setup with JSON-lines span export
//!
//! # Example
//!
//! ```
//! use foldergrid::backend::MemoryBackend;
//! use foldergrid::domain::{FolderId, FolderRecord, ItemId, Product};
//! use foldergrid::FolderWorkspace;
//!
//! # futures_util::FutureExt::now_or_never(async {
//! let backend = MemoryBackend::new(
//!     vec![FolderRecord::new(7, "Drinks", None)],
//!     vec![Product::new(5, "Cola", None), Product::new(6, "Juice", None)],
//! );
//! let mut workspace = FolderWorkspace::load(backend).await?;
//! workspace.toggle_item(ItemId(5));
//! workspace.toggle_item(ItemId(6));
//! workspace.begin_move_items()?;
//! let report = workspace.commit_move_items(Some(FolderId(7))).await?;
//! assert_eq!(report.message, "2 products moved to \"Drinks\"");
//! assert_eq!(workspace.item_count(Some(FolderId(7))), 2);
//! # Ok::<(), foldergrid::ConsoleError>(())
//! # }).unwrap().unwrap();
//! ```

pub mod app;
pub mod backend;
pub mod domain;
pub mod drag;
pub mod grid;
pub mod observability;
pub mod storage;
pub mod tree;

pub use app::{FolderActivation, FolderWorkspace, MoveMode, MoveReport, SelectionSet};
pub use domain::{ConsoleError, Result};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use storage::JsonFileStore;

/// File inside `data_dir` holding persisted grid settings.
pub const SETTINGS_FILE: &str = "grid-settings.json";

/// Host configuration, usually read from a TOML file.
///
/// ```toml
/// data_dir = "/var/lib/console"
/// trace_level = "debug"
/// drag_threshold = 10.0
/// reassign_batch_size = 100
/// rows_per_page = 10
/// ```
///
/// Every key is optional. Out-of-range numbers are pulled back into range rather than
/// rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for the settings file and trace output. Default: `.foldergrid`
    pub data_dir: PathBuf,

    /// Tracing filter directive (`trace`, `debug`, `info`, …). Default: `info`
    pub trace_level: Option<String>,

    /// Horizontal pointer travel in pixels that turns a header press into a drag. Default: 10
    pub drag_threshold: f64,

    /// Item ids per reassignment request. Default: 100
    pub reassign_batch_size: usize,

    /// Page size for grids without a stored preference (5..=50). Default: 10
    pub rows_per_page: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".foldergrid"),
            trace_level: None,
            drag_threshold: drag::DEFAULT_DRAG_THRESHOLD,
            reassign_batch_size: app::DEFAULT_REASSIGN_BATCH,
            rows_per_page: grid::DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl Config {
    /// Parses TOML, filling gaps with defaults and clamping numbers.
    ///
    /// ```
    /// use foldergrid::Config;
    ///
    /// let config = Config::from_toml_str("rows_per_page = 500\nreassign_batch_size = 0").unwrap();
    /// assert_eq!(config.rows_per_page, 50);
    /// assert_eq!(config.reassign_batch_size, 1);
    /// assert_eq!(config.drag_threshold, 10.0);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] for malformed TOML or mistyped values.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| ConsoleError::Config(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the file cannot be read and
    /// [`ConsoleError::Config`] if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    #[must_use]
    fn normalized(mut self) -> Self {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            self.drag_threshold = drag::DEFAULT_DRAG_THRESHOLD;
        }
        self.reassign_batch_size = self.reassign_batch_size.max(1);
        self.rows_per_page = grid::store::clamp_rows_per_page(self.rows_per_page);
        self
    }

    /// Path of the persisted grid settings.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }
}

/// Sets up tracing and opens the grid settings store in `config.data_dir`.
///
/// Tracing failures are ignored; the store is required.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the settings file
/// exists but cannot be read.
pub fn initialize(config: &Config) -> Result<JsonFileStore> {
    observability::init_tracing(config);
    std::fs::create_dir_all(&config.data_dir)?;
    let store = JsonFileStore::open(config.settings_path())?;
    tracing::info!(settings = %config.settings_path().display(), "foldergrid initialized");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = Config::from_toml_str("rows_per_page = \"many\"").unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn negative_threshold_falls_back() {
        let config = Config::from_toml_str("drag_threshold = -3.0\ntrace_level = \"debug\"").unwrap();
        assert_eq!(config.drag_threshold, drag::DEFAULT_DRAG_THRESHOLD);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn from_file_reads_data_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("console.toml");
        std::fs::write(&path, "data_dir = \"/tmp/console\"").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/console"));
        assert_eq!(config.settings_path(), PathBuf::from("/tmp/console/grid-settings.json"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConsoleError::Io(_)));
    }
}
