//! Persisted grid configuration.

use super::columns::GridColumn;
use super::config::{
    ColumnConfig, GridBehavior, SortState, Step, DEFAULT_ROWS_PER_PAGE, MAX_ROWS_PER_PAGE, MIN_ROWS_PER_PAGE,
};
use crate::domain::error::{ConsoleError, Result};
use crate::storage::KeyValueStore;

const ORDER: &str = "ColumnOrder";
const WIDTHS: &str = "ColumnWidths";
const VISIBILITY: &str = "ColumnVisibility";
const SORT: &str = "SortConfig";
const ROWS_PER_PAGE: &str = "RowsPerPage";
const FUNCTION_SETTINGS: &str = "FunctionSettings";

/// A configuration change requested by the header gesture layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction<C> {
    Reorder { dragged: C, target: C },
    ToggleSort(C),
    SetWidth(C, u32),
}

/// Column configuration of one grid, backed by a [`KeyValueStore`].
///
/// Every effective change is written back immediately. If the write fails the
/// in-memory change is kept and the storage error is returned.
#[derive(Debug)]
pub struct GridConfigStore<C: GridColumn, S: KeyValueStore> {
    store: S,
    config: ColumnConfig<C>,
    rows_per_page: usize,
    behavior: GridBehavior,
}

fn storage_key<C: GridColumn>(aspect: &str) -> String {
    format!("{}{aspect}", C::STORAGE_PREFIX)
}

/// Clamps a page size into the allowed range.
#[must_use]
pub fn clamp_rows_per_page(rows: usize) -> usize {
    rows.clamp(MIN_ROWS_PER_PAGE, MAX_ROWS_PER_PAGE)
}

impl<C: GridColumn, S: KeyValueStore> GridConfigStore<C, S> {
    /// Reads the persisted configuration, falling back to defaults for anything
    /// missing, unreadable or undecodable. Never fails.
    pub fn load(store: S) -> Self {
        Self::load_with_page_size(store, DEFAULT_ROWS_PER_PAGE)
    }

    /// Like [`load`](Self::load), with a host-chosen page size for grids that have
    /// none stored yet.
    pub fn load_with_page_size(store: S, default_rows: usize) -> Self {
        let _span = tracing::debug_span!("grid_config_load", grid = C::STORAGE_PREFIX).entered();

        let read = |aspect: &str| -> Option<String> {
            let key = storage_key::<C>(aspect);
            match store.get(&key) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "grid setting unreadable, using default");
                    None
                }
            }
        };

        let config = ColumnConfig::decode(
            read(ORDER).as_deref(),
            read(WIDTHS).as_deref(),
            read(VISIBILITY).as_deref(),
            read(SORT).as_deref(),
        );

        let rows_per_page = read(ROWS_PER_PAGE)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map_or(clamp_rows_per_page(default_rows), |n| {
                clamp_rows_per_page(usize::try_from(n.max(0)).unwrap_or(MAX_ROWS_PER_PAGE))
            });

        let behavior = read(FUNCTION_SETTINGS)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        tracing::debug!(columns = config.order().len(), rows_per_page, "grid config loaded");
        Self {
            store,
            config,
            rows_per_page,
            behavior,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ColumnConfig<C> {
        &self.config
    }

    #[must_use]
    pub const fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    #[must_use]
    pub const fn behavior(&self) -> GridBehavior {
        self.behavior
    }

    #[must_use]
    pub fn sort(&self) -> Option<SortState<C>> {
        self.config.sort()
    }

    #[must_use]
    pub fn visible_columns(&self) -> Vec<C> {
        self.config.visible_columns()
    }

    /// Gives the underlying store back.
    pub fn into_inner(self) -> S {
        self.store
    }

    fn write(&mut self, aspect: &str, value: &str) -> Result<()> {
        let key = storage_key::<C>(aspect);
        self.store.set(&key, value).map_err(|e| match e {
            ConsoleError::Storage(_) => e,
            other => ConsoleError::Storage(other.to_string()),
        })
    }

    /// Writes order, widths, visibility and sort.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Storage`] if any write fails.
    pub fn persist(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("grid_config_persist", grid = C::STORAGE_PREFIX).entered();
        let order = self.config.encode_order();
        let widths = self.config.encode_widths();
        let visibility = self.config.encode_visibility();
        let sort = self.config.encode_sort();
        self.write(ORDER, &order)?;
        self.write(WIDTHS, &widths)?;
        self.write(VISIBILITY, &visibility)?;
        self.write(SORT, &sort)
    }

    fn persist_if(&mut self, changed: bool) -> Result<bool> {
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    /// Replaces the column order (completed to a full permutation).
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Storage`] if persisting fails.
    pub fn set_order(&mut self, order: impl IntoIterator<Item = C>) -> Result<bool> {
        let changed = self.config.set_order(order);
        self.persist_if(changed)
    }

    /// Sets a column width, clamped to the minimum.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Storage`] if persisting fails.
    pub fn set_width(&mut self, column: C, width: u32) -> Result<bool> {
        let changed = self.config.set_width(column, width);
        self.persist_if(changed)
    }

    /// # Errors
    ///
    /// Returns [`ConsoleError::Storage`] if persisting fails.
    pub fn set_visibility(&mut self, column: C, visible: bool) -> Result<bool> {
        let changed = self.config.set_visibility(column, visible);
        self.persist_if(changed)
    }

    /// Header-click sort toggle.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Storage`] if persisting fails.
    pub fn set_sort(&mut self, column: C) -> Result<bool> {
        let changed = self.config.toggle_sort(column);
        self.persist_if(changed)
    }

    /// # Errors
    ///
    /// Returns [`ConsoleError::Storage`] if persisting fails.
    pub fn reorder(&mut self, dragged: C, target: C) -> Result<bool> {
        let changed = self.config.reorder(dragged, target);
        self.persist_if(changed)
    }

    /// # Errors
    ///
    /// Returns [`ConsoleError::Storage`] if persisting fails.
    pub fn move_column(&mut self, column: C, step: Step) -> Result<bool> {
        let changed = self.config.move_column(column, step);
        self.persist_if(changed)
    }

    /// Restores default order, widths and visibility, clears the sort and persists.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Storage`] if persisting fails.
    pub fn reset_to_defaults(&mut self) -> Result<()> {
        self.config = ColumnConfig::default();
        tracing::debug!(grid = C::STORAGE_PREFIX, "grid config reset");
        self.persist()
    }

    /// Sets the page size (clamped to 5..=50) and returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Storage`] if persisting fails.
    pub fn set_rows_per_page(&mut self, rows: usize) -> Result<usize> {
        self.rows_per_page = clamp_rows_per_page(rows);
        let value = self.rows_per_page.to_string();
        self.write(ROWS_PER_PAGE, &value)?;
        Ok(self.rows_per_page)
    }

    /// # Errors
    ///
    /// Returns [`ConsoleError::Storage`] if persisting fails.
    pub fn set_behavior(&mut self, behavior: GridBehavior) -> Result<()> {
        self.behavior = behavior;
        let value =
            serde_json::to_string(&behavior).map_err(|e| ConsoleError::Storage(e.to_string()))?;
        self.write(FUNCTION_SETTINGS, &value)
    }

    /// Applies a gesture outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Storage`] if persisting fails.
    pub fn apply(&mut self, action: GridAction<C>) -> Result<bool> {
        tracing::trace!(?action, "grid action");
        match action {
            GridAction::Reorder { dragged, target } => self.reorder(dragged, target),
            GridAction::ToggleSort(column) => self.set_sort(column),
            GridAction::SetWidth(column, width) => self.set_width(column, width),
        }
    }
}
