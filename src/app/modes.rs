//! Move mode state machine.
//!
//! The folder sidebar interprets a click differently depending on the active mode:
//!
//! - **Idle**: the click navigates into the folder
//! - **`MovingItems`**: the click files the selected items into the folder
//! - **`MovingFolder`**: the click reparents the remembered folder under the target
//!
//! Only one move can be pending. Entering either move mode replaces the other, and
//! both return to `Idle` on cancel or after a successful commit.

use crate::domain::FolderId;

/// Pending move workflow, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveMode {
    /// No move pending; folder clicks navigate.
    #[default]
    Idle,

    /// The current selection waits for a target folder.
    MovingItems,

    /// The contained folder waits for a new parent.
    MovingFolder(FolderId),
}

impl MoveMode {
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Folder being moved, when in [`MoveMode::MovingFolder`].
    #[must_use]
    pub const fn moving_folder(self) -> Option<FolderId> {
        match self {
            Self::MovingFolder(id) => Some(id),
            Self::Idle | Self::MovingItems => None,
        }
    }

    /// Prompt shown while the mode is active.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::MovingItems => Some("Choose a folder for the selected items"),
            Self::MovingFolder(_) => Some("Choose the new parent folder"),
        }
    }
}
