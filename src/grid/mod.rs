//! Data-grid state: column catalogs, persisted column configuration and the row
//! pipeline.
//!
//! # Modules
//!
//! - [`columns`]: Closed column enums per grid with labels, alignment and widths
//! - [`config`]: Order, widths, visibility and sort plus their JSON encoding
//! - [`store`]: Configuration backed by a [`KeyValueStore`](crate::storage::KeyValueStore)
//! - [`rows`]: Folder scope, fuzzy search, sorting and pagination
//!
//! # Example
//!
//! ```
//! use foldergrid::grid::{GridConfigStore, ProductColumn};
//! use foldergrid::storage::MemoryStore;
//!
//! let mut grid = GridConfigStore::<ProductColumn, _>::load(MemoryStore::new());
//! grid.set_width(ProductColumn::Name, 10).unwrap();
//! assert_eq!(grid.config().width(ProductColumn::Name), 50);
//! ```

pub mod columns;
pub mod config;
pub mod rows;
pub mod store;

pub use columns::{Align, CustomerColumn, GridColumn, ProductColumn};
pub use config::{
    ColumnConfig, GridBehavior, SortDirection, SortState, Step, DEFAULT_ROWS_PER_PAGE, MAX_ROWS_PER_PAGE,
    MIN_COLUMN_WIDTH, MIN_ROWS_PER_PAGE,
};
pub use rows::{CellValue, GridRow, RowPage, RowQuery};
pub use store::{GridAction, GridConfigStore};
