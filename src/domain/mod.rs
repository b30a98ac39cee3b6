//! Domain layer: folders, leaf items and the crate error type.
//!
//! Nothing here knows about the backend, the key-value store or pointer input; the
//! types are plain data shared by every other layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`folder`]: Folder records, derived tree nodes, breadcrumb entries
//! - [`item`]: Leaf item trait with the product and customer models

pub mod error;
pub mod folder;
pub mod item;

pub use error::{ConsoleError, Result};
pub use folder::{
    normalize_folder_name, FolderId, FolderNode, FolderPatch, FolderRecord, NewFolder, PathEntry,
    ROOT_LABEL,
};
pub use item::{Customer, ItemId, LeafItem, Product};
