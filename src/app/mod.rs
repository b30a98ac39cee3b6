//! Application layer: selection and move engine.
//!
//! Sits between the host screen and the backend / tree layers. The host forwards
//! folder clicks, row clicks and toolbar commands; the workspace validates them,
//! talks to the backend and reloads its cached lists.
//!
//! ```text
//! Row / folder click → FolderWorkspace → validation → Backend request → reload
//!                             │
//!                             └── MoveMode decides whether a folder click
//!                                 navigates or completes a move
//! ```
//!
//! # Modules
//!
//! - [`modes`]: Move mode state machine
//! - [`selection`]: Item multi-select
//! - [`workspace`]: Navigation, folder management and move commits

pub mod modes;
pub mod selection;
pub mod workspace;

pub use modes::MoveMode;
pub use selection::SelectionSet;
pub use workspace::{FolderActivation, FolderWorkspace, MoveReport, SidebarRow, DEFAULT_REASSIGN_BATCH};
