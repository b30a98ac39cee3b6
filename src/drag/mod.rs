//! Pointer and touch gestures on a grid header.
//!
//! The host normalizes mouse and touch input into [`PointerEvent`]s and feeds them to a
//! [`DragController`] together with the current [`ColumnConfig`](crate::grid::ColumnConfig)
//! and a [`HitTester`] (usually a [`HeaderLayout`]). The controller answers with
//! [`GridAction`](crate::grid::GridAction)s that the host applies to its
//! [`GridConfigStore`](crate::grid::GridConfigStore).
//!
//! # Example
//!
//! ```
//! use foldergrid::drag::{DragController, HeaderLayout, Point, PointerEvent};
//! use foldergrid::grid::{GridAction, GridConfigStore, ProductColumn};
//! use foldergrid::storage::MemoryStore;
//!
//! let mut grid = GridConfigStore::<ProductColumn, _>::load(MemoryStore::new());
//! let mut drag = DragController::default();
//!
//! for event in [
//!     PointerEvent::Down(Point::new(200.0, 10.0)),
//!     PointerEvent::Up(Point::new(202.0, 10.0)),
//! ] {
//!     let layout = HeaderLayout::new(grid.config(), 0.0, 40.0);
//!     for action in drag.handle_event(event, grid.config(), &layout) {
//!         grid.apply(action).unwrap();
//!     }
//! }
//! assert_eq!(grid.sort().map(|s| s.column), Some(ProductColumn::Name));
//! ```

mod controller;
mod layout;

pub use controller::{DragController, DragState, PointerEvent, DEFAULT_DRAG_THRESHOLD};
pub use layout::{ColumnSpan, HeaderLayout, HitTarget, HitTester, Point, RESIZE_HANDLE_WIDTH};
