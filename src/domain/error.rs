//! Error types for folder and grid operations.
//!
//! This module defines the centralized error type [`ConsoleError`] and a type alias
//! [`Result`] used throughout the crate. Variants fall into three groups:
//!
//! - **Validation**: rejected locally before any backend call (empty names, cycles,
//!   empty selections, unknown folders, missing move mode, disabled delete)
//! - **Backend**: the remote collaborator refused or failed a request
//! - **Storage / configuration**: the key-value store or config file could not be used
//!
//! The `Display` text of every variant is suitable for a user-facing notice.
//! Decode failures of persisted grid configuration never surface as errors; the grid
//! store falls back to defaults instead.

use crate::domain::folder::FolderId;
use thiserror::Error;

/// The main error type for folder tree, move and grid operations.
///
/// Nothing in this crate treats an error as fatal: every variant leaves the in-memory
/// model at its last known good state, so callers can show the message and carry on.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// A folder name was empty or whitespace only.
    #[error("Folder name is required")]
    EmptyFolderName,

    /// Reparenting would make a folder its own ancestor.
    ///
    /// Raised by [`would_create_cycle`](crate::tree::would_create_cycle) checks before
    /// the backend is contacted.
    #[error("A folder cannot be moved into itself or one of its subfolders")]
    CycleDetected {
        /// Folder being moved.
        moving: FolderId,
        /// Requested new parent.
        target: FolderId,
    },

    /// An operation needing selected items was invoked with nothing selected.
    #[error("Select at least one item first")]
    EmptySelection,

    /// A folder id does not exist in the current folder list.
    #[error("Folder {0} not found")]
    FolderNotFound(FolderId),

    /// A move commit was requested while no matching move mode is active.
    #[error("No move is in progress")]
    NoActiveMove,

    /// The grid's behavior flags turn deleting off.
    #[error("Deleting is disabled for this list")]
    DeleteDisabled,

    /// The backend collaborator rejected or failed a request.
    ///
    /// The string carries the backend's own message when it supplied one.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Reading from or writing to the key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConsoleError {
    /// Returns `true` for errors raised locally before any backend call.
    ///
    /// Hosts use this to decide between "fix your input" and "try again later" notices.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyFolderName
                | Self::CycleDetected { .. }
                | Self::EmptySelection
                | Self::FolderNotFound(_)
                | Self::NoActiveMove
                | Self::DeleteDisabled
        )
    }
}

/// A specialized `Result` type for crate operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_classified() {
        assert!(ConsoleError::EmptyFolderName.is_validation());
        assert!(ConsoleError::EmptySelection.is_validation());
        assert!(ConsoleError::DeleteDisabled.is_validation());
        assert!(ConsoleError::CycleDetected {
            moving: FolderId(1),
            target: FolderId(3),
        }
        .is_validation());
        assert!(!ConsoleError::Backend("offline".into()).is_validation());
        assert!(!ConsoleError::Storage("disk full".into()).is_validation());
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            ConsoleError::FolderNotFound(FolderId(9)).to_string(),
            "Folder 9 not found"
        );
        assert_eq!(
            ConsoleError::Backend("folder is not empty".into()).to_string(),
            "Backend error: folder is not empty"
        );
    }
}
