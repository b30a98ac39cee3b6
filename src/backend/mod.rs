//! Remote backend collaborator.
//!
//! The REST service owning folders and leaf items is reached only through the
//! [`Backend`] trait. Each method maps to one request; the move engine decides when to
//! call them and what to reload afterwards.
//!
//! # Implementations
//!
//! - [`MemoryBackend`]: in-process backend applying the same server-side rules, used
//!   by tests and offline demos
//!
//! HTTP clients live with the host application and implement the trait there.

mod memory;

pub use memory::MemoryBackend;

use crate::domain::error::Result;
use crate::domain::{FolderId, FolderPatch, FolderRecord, ItemId, LeafItem, NewFolder};
use async_trait::async_trait;

/// Folder and leaf item operations offered by the backend.
///
/// Requests are independent: the trait promises no ordering between concurrent
/// calls. Server-side policies (such as refusing to delete a non-empty folder) are
/// reported as [`ConsoleError::Backend`](crate::ConsoleError::Backend).
#[async_trait]
pub trait Backend: Send + Sync {
    /// Leaf item type managed next to the folders (products or customers).
    type Item: LeafItem + Send + Sync;

    /// Lists every folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_folders(&self) -> Result<Vec<FolderRecord>>;

    /// Creates a folder and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the folder.
    async fn create_folder(&self, folder: NewFolder) -> Result<FolderRecord>;

    /// Applies a partial update and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder is unknown or the update is rejected.
    async fn update_folder(&self, id: FolderId, patch: FolderPatch) -> Result<FolderRecord>;

    /// Deletes a folder. The backend refuses folders that still hold anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder is unknown, non-empty, or the request fails.
    async fn delete_folder(&self, id: FolderId) -> Result<()>;

    /// Lists every leaf item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_items(&self) -> Result<Vec<Self::Item>>;

    /// Files every item in `item_ids` into `folder_id` (`None` = unfiled).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn reassign_items_folder(&self, item_ids: Vec<ItemId>, folder_id: Option<FolderId>) -> Result<()>;

    /// Deletes every item in `item_ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if an id is unknown or the request fails.
    async fn delete_items(&self, item_ids: Vec<ItemId>) -> Result<()>;
}
