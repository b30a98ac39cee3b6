//! In-process backend.

use super::Backend;
use crate::domain::error::{ConsoleError, Result};
use crate::domain::{FolderId, FolderPatch, FolderRecord, ItemId, LeafItem, NewFolder};
use crate::tree::would_create_cycle;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct State<I> {
    folders: Vec<FolderRecord>,
    items: Vec<I>,
    next_folder_id: i64,
    available: bool,
    requests: Vec<&'static str>,
}

/// A [`Backend`] that keeps folders and items in memory.
///
/// Applies the same rules the REST service enforces: names are trimmed and required,
/// parents must exist, folders cannot be reparented below themselves, and only empty
/// folders can be deleted. [`set_available`](Self::set_available) simulates an outage.
#[derive(Debug)]
pub struct MemoryBackend<I> {
    state: Mutex<State<I>>,
}

impl<I: LeafItem> MemoryBackend<I> {
    pub fn new(folders: Vec<FolderRecord>, items: Vec<I>) -> Self {
        let next_folder_id = folders.iter().map(|f| f.id.0).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(State {
                folders,
                items,
                next_folder_id,
                available: true,
                requests: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State<I>>> {
        self.state
            .lock()
            .map_err(|e| ConsoleError::Backend(format!("backend state poisoned: {e}")))
    }

    fn begin(&self, request: &'static str) -> Result<MutexGuard<'_, State<I>>> {
        let mut state = self.lock()?;
        state.requests.push(request);
        if !state.available {
            return Err(ConsoleError::Backend("service unavailable".to_string()));
        }
        Ok(state)
    }

    /// Toggles simulated availability; while unavailable every request fails.
    pub fn set_available(&self, available: bool) {
        if let Ok(mut state) = self.lock() {
            state.available = available;
        }
    }

    /// Names of the requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<&'static str> {
        self.lock().map(|s| s.requests.clone()).unwrap_or_default()
    }

    /// Snapshot of the stored folders.
    #[must_use]
    pub fn folders(&self) -> Vec<FolderRecord> {
        self.lock().map(|s| s.folders.clone()).unwrap_or_default()
    }

    /// Snapshot of the stored items.
    #[must_use]
    pub fn items(&self) -> Vec<I> {
        self.lock().map(|s| s.items.clone()).unwrap_or_default()
    }
}

fn required_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ConsoleError::Backend("Folder name is required".to_string()));
    }
    Ok(name.to_string())
}

fn ensure_exists(folders: &[FolderRecord], id: FolderId, what: &str) -> Result<()> {
    if folders.iter().any(|f| f.id == id) {
        Ok(())
    } else {
        Err(ConsoleError::Backend(format!("{what} {id} not found")))
    }
}

#[async_trait]
impl<I: LeafItem + Send + Sync> Backend for MemoryBackend<I> {
    type Item = I;

    async fn list_folders(&self) -> Result<Vec<FolderRecord>> {
        let state = self.begin("list_folders")?;
        Ok(state.folders.clone())
    }

    async fn create_folder(&self, folder: NewFolder) -> Result<FolderRecord> {
        let mut state = self.begin("create_folder")?;
        let name = required_name(&folder.name)?;
        if let Some(parent) = folder.parent_id {
            ensure_exists(&state.folders, parent, "Parent folder")?;
        }

        let now = Utc::now();
        let record = FolderRecord {
            id: FolderId(state.next_folder_id),
            name,
            parent_id: folder.parent_id,
            created_at: Some(now),
            updated_at: Some(now),
        };
        state.next_folder_id += 1;
        state.folders.push(record.clone());
        Ok(record)
    }

    async fn update_folder(&self, id: FolderId, patch: FolderPatch) -> Result<FolderRecord> {
        let mut state = self.begin("update_folder")?;
        ensure_exists(&state.folders, id, "Folder")?;

        let name = patch.name.as_deref().map(required_name).transpose()?;
        if let Some(parent) = patch.parent_id {
            if let Some(parent_id) = parent {
                ensure_exists(&state.folders, parent_id, "Parent folder")?;
            }
            if would_create_cycle(id, parent, &state.folders) {
                return Err(ConsoleError::Backend(
                    "Folder cannot be moved into its own subfolder".to_string(),
                ));
            }
        }

        let record = state
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| ConsoleError::Backend(format!("Folder {id} not found")))?;
        if let Some(name) = name {
            record.name = name;
        }
        if let Some(parent) = patch.parent_id {
            record.parent_id = parent;
        }
        record.updated_at = Some(Utc::now());
        Ok(record.clone())
    }

    async fn delete_folder(&self, id: FolderId) -> Result<()> {
        let mut state = self.begin("delete_folder")?;
        ensure_exists(&state.folders, id, "Folder")?;

        let has_children = state.folders.iter().any(|f| f.parent_id == Some(id));
        let has_items = state.items.iter().any(|i| i.folder_id() == Some(id));
        if has_children || has_items {
            return Err(ConsoleError::Backend("Folder is not empty".to_string()));
        }

        state.folders.retain(|f| f.id != id);
        Ok(())
    }

    async fn list_items(&self) -> Result<Vec<I>> {
        let state = self.begin("list_items")?;
        Ok(state.items.clone())
    }

    async fn reassign_items_folder(&self, item_ids: Vec<ItemId>, folder_id: Option<FolderId>) -> Result<()> {
        let mut state = self.begin("reassign_items_folder")?;
        if let Some(folder) = folder_id {
            ensure_exists(&state.folders, folder, "Folder")?;
        }

        let wanted: HashSet<ItemId> = item_ids.into_iter().collect();
        for item in state.items.iter_mut().filter(|i| wanted.contains(&i.id())) {
            item.set_folder_id(folder_id);
        }
        Ok(())
    }

    async fn delete_items(&self, item_ids: Vec<ItemId>) -> Result<()> {
        let mut state = self.begin("delete_items")?;
        let wanted: HashSet<ItemId> = item_ids.into_iter().collect();
        if let Some(missing) = wanted.iter().find(|id| !state.items.iter().any(|i| i.id() == **id)) {
            return Err(ConsoleError::Backend(format!("Item {missing} not found")));
        }

        state.items.retain(|i| !wanted.contains(&i.id()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    fn backend() -> MemoryBackend<Product> {
        MemoryBackend::new(
            vec![FolderRecord::new(1, "A", None), FolderRecord::new(2, "B", Some(1))],
            vec![Product::new(10, "Tea", Some(2))],
        )
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids_and_trims() {
        let backend = backend();
        let created = backend
            .create_folder(NewFolder {
                name: "  Coffee ".into(),
                parent_id: Some(FolderId(1)),
            })
            .await
            .unwrap();
        assert_eq!(created.id, FolderId(3));
        assert_eq!(created.name, "Coffee");
        assert!(created.created_at.is_some());
    }

    #[tokio::test]
    async fn refuses_to_delete_non_empty_folders() {
        let backend = backend();
        let err = backend.delete_folder(FolderId(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Backend error: Folder is not empty");

        backend
            .reassign_items_folder(vec![ItemId(10)], None)
            .await
            .unwrap();
        backend.delete_folder(FolderId(2)).await.unwrap();
        assert_eq!(backend.folders().len(), 1);
    }

    #[tokio::test]
    async fn rejects_reparent_below_itself() {
        let backend = backend();
        let err = backend
            .update_folder(FolderId(1), FolderPatch::reparent(Some(FolderId(2))))
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Backend(_)));
    }

    #[tokio::test]
    async fn deleting_items_is_all_or_nothing() {
        let backend = backend();
        let err = backend
            .delete_items(vec![ItemId(10), ItemId(99)])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Backend error: Item 99 not found");
        assert_eq!(backend.items().len(), 1);

        backend.delete_items(vec![ItemId(10)]).await.unwrap();
        assert!(backend.items().is_empty());
    }

    #[tokio::test]
    async fn outage_fails_every_request() {
        let backend = backend();
        backend.set_available(false);
        assert!(backend.list_folders().await.is_err());
        backend.set_available(true);
        assert!(backend.list_folders().await.is_ok());
        assert_eq!(backend.requests(), ["list_folders", "list_folders"]);
    }
}
