//! Folder navigation, selection and move orchestration.
//!
//! [`FolderWorkspace`] is the single source of truth for one folder-plus-grid screen
//! (products or customers). It caches the last folder and item lists fetched from the
//! [`Backend`], tracks the active folder, expanded sidebar branches, the item selection
//! and the pending [`MoveMode`], and runs every backend round trip.
//!
//! # Consistency rules
//!
//! - Validation happens before any request; a rejected operation leaves every field
//!   untouched.
//! - Local lists change only after the backend confirmed a mutation, by reloading
//!   them. Nothing is applied optimistically, so a failed request needs no rollback.
//! - Item moves are split into batches sent concurrently; the reload waits for the
//!   whole batch set.
//! - Every mutating method takes `&mut self`, so two commits can never overlap on the
//!   same workspace.

use super::modes::MoveMode;
use super::selection::SelectionSet;
use crate::backend::Backend;
use crate::domain::error::{ConsoleError, Result};
use crate::domain::{
    normalize_folder_name, FolderId, FolderNode, FolderPatch, FolderRecord, ItemId, LeafItem,
    NewFolder, PathEntry, ROOT_LABEL,
};
use crate::grid::GridBehavior;
use crate::tree;
use futures_util::future::{try_join, try_join_all};
use std::collections::HashSet;
use std::fmt;
use tracing::Instrument;

/// Default number of item ids per reassignment request.
pub const DEFAULT_REASSIGN_BATCH: usize = 100;

/// Outcome of a successful move commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// Items or folders whose location actually changed.
    pub moved: usize,
    /// Destination folder (`None` = the "All" bucket / root).
    pub target: Option<FolderId>,
    /// User-facing confirmation.
    pub message: String,
}

impl MoveReport {
    /// `false` when everything already sat at the target and no request was sent.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.moved > 0
    }
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// What a folder click ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderActivation {
    /// Idle mode: the folder became the active one.
    Opened(Option<FolderId>),
    /// Items mode: the selection was filed into the folder.
    ItemsMoved(MoveReport),
    /// Folder mode: the pending folder was reparented under it.
    FolderMoved(MoveReport),
}

/// One flattened sidebar line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    pub depth: usize,
    pub id: FolderId,
    pub name: String,
    pub item_count: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub active: bool,
}

/// Folder tree, item list and move state for one entity screen.
pub struct FolderWorkspace<B: Backend> {
    backend: B,
    folders: Vec<FolderRecord>,
    items: Vec<B::Item>,
    selection: SelectionSet,
    mode: MoveMode,
    active_folder: Option<FolderId>,
    expanded: HashSet<FolderId>,
    batch_size: usize,
}

impl<B: Backend> fmt::Debug for FolderWorkspace<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FolderWorkspace")
            .field("folders", &self.folders.len())
            .field("items", &self.items.len())
            .field("selection", &self.selection.len())
            .field("mode", &self.mode)
            .field("active_folder", &self.active_folder)
            .finish_non_exhaustive()
    }
}

impl<B: Backend> FolderWorkspace<B> {
    /// Creates an empty workspace. Call [`refresh`](Self::refresh) to load data.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            folders: Vec::new(),
            items: Vec::new(),
            selection: SelectionSet::new(),
            mode: MoveMode::Idle,
            active_folder: None,
            expanded: HashSet::new(),
            batch_size: DEFAULT_REASSIGN_BATCH,
        }
    }

    /// Sets how many item ids go into one reassignment request (at least 1).
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Creates a workspace and loads folders and items.
    ///
    /// # Errors
    ///
    /// Returns an error if either list request fails.
    pub async fn load(backend: B) -> Result<Self> {
        let mut workspace = Self::new(backend);
        workspace.refresh().await?;
        Ok(workspace)
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn folders(&self) -> &[FolderRecord] {
        &self.folders
    }

    #[must_use]
    pub fn items(&self) -> &[B::Item] {
        &self.items
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub const fn mode(&self) -> MoveMode {
        self.mode
    }

    #[must_use]
    pub const fn active_folder(&self) -> Option<FolderId> {
        self.active_folder
    }

    #[must_use]
    pub fn folder(&self, id: FolderId) -> Option<&FolderRecord> {
        self.folders.iter().find(|f| f.id == id)
    }

    fn require_folder(&self, id: FolderId) -> Result<&FolderRecord> {
        self.folder(id).ok_or(ConsoleError::FolderNotFound(id))
    }

    fn folder_label(&self, id: Option<FolderId>) -> String {
        id.and_then(|id| self.folder(id))
            .map_or_else(|| ROOT_LABEL.to_string(), |f| f.name.clone())
    }

    // ---- derived views ----------------------------------------------------------

    /// Folder hierarchy with direct item counts, rebuilt on every call.
    #[must_use]
    pub fn tree(&self) -> Vec<FolderNode> {
        tree::build_counted_tree(&self.folders, &self.items)
    }

    /// Breadcrumb of the active folder.
    #[must_use]
    pub fn breadcrumb(&self) -> Vec<PathEntry> {
        tree::path_to(self.active_folder, &self.folders)
    }

    #[must_use]
    pub fn item_count(&self, folder: Option<FolderId>) -> usize {
        tree::count_items_in_folder(folder, &self.items)
    }

    /// Items shown for the active folder: its direct items, or everything under "All".
    #[must_use]
    pub fn visible_items(&self) -> Vec<&B::Item> {
        match self.active_folder {
            None => self.items.iter().collect(),
            Some(id) => self.items.iter().filter(|i| i.folder_id() == Some(id)).collect(),
        }
    }

    // ---- navigation -------------------------------------------------------------

    /// Makes `folder` the active folder. Changing folders clears the selection.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::FolderNotFound`] for unknown ids.
    pub fn open_folder(&mut self, folder: Option<FolderId>) -> Result<()> {
        if let Some(id) = folder {
            self.require_folder(id)?;
        }
        if self.active_folder != folder {
            tracing::debug!(from = ?self.active_folder, to = ?folder, "active folder changed");
            self.active_folder = folder;
            self.selection.clear();
        }
        Ok(())
    }

    #[must_use]
    pub fn is_expanded(&self, id: FolderId) -> bool {
        self.expanded.contains(&id)
    }

    /// Expands or collapses a sidebar branch; returns the new state.
    pub fn toggle_expanded(&mut self, id: FolderId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    /// Expands every ancestor of `id` (and `id` itself) so it is visible.
    pub fn expand_path_to(&mut self, id: FolderId) {
        self.expanded.extend(tree::ancestor_chain(id, &self.folders));
    }

    /// Sidebar rows in display order, honoring the expanded set.
    #[must_use]
    pub fn sidebar(&self) -> Vec<SidebarRow> {
        let roots = self.tree();
        tree::visible_rows(&roots, &|id| self.expanded.contains(&id))
            .into_iter()
            .map(|(depth, node)| SidebarRow {
                depth,
                id: node.id(),
                name: node.name().to_string(),
                item_count: node.item_count,
                has_children: node.has_children(),
                expanded: self.expanded.contains(&node.id()),
                active: self.active_folder == Some(node.id()),
            })
            .collect()
    }

    // ---- selection --------------------------------------------------------------

    /// Applies a row click using the grid's behavior flags.
    pub fn click_item(&mut self, id: ItemId, ctrl: bool, behavior: &GridBehavior) {
        self.selection.click(id, ctrl, behavior);
    }

    pub fn toggle_item(&mut self, id: ItemId) -> bool {
        self.selection.toggle(id)
    }

    /// Selects every item visible in the active folder.
    pub fn select_all_visible(&mut self) {
        let ids: Vec<ItemId> = self.visible_items().iter().map(|i| i.id()).collect();
        self.selection.select_all(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ---- move modes -------------------------------------------------------------

    /// Enters [`MoveMode::MovingItems`], replacing any pending folder move.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::EmptySelection`] when nothing is selected.
    pub fn begin_move_items(&mut self) -> Result<()> {
        if self.selection.is_empty() {
            return Err(ConsoleError::EmptySelection);
        }
        self.mode = MoveMode::MovingItems;
        tracing::debug!(selected = self.selection.len(), "move items mode entered");
        Ok(())
    }

    /// Enters [`MoveMode::MovingFolder`], replacing any pending item move.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::FolderNotFound`] for unknown ids.
    pub fn begin_move_folder(&mut self, folder: FolderId) -> Result<()> {
        self.require_folder(folder)?;
        self.mode = MoveMode::MovingFolder(folder);
        tracing::debug!(folder = %folder, "move folder mode entered");
        Ok(())
    }

    /// Leaves any move mode without touching the backend. Returns `true` if a move
    /// was pending.
    pub fn cancel_move(&mut self) -> bool {
        let was_active = !self.mode.is_idle();
        self.mode = MoveMode::Idle;
        was_active
    }

    /// Handles a click on a folder (`None` = the "All" bucket) according to the mode.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`open_folder`](Self::open_folder),
    /// [`commit_move_items`](Self::commit_move_items) or
    /// [`commit_move_folder`](Self::commit_move_folder).
    pub async fn activate_folder(&mut self, target: Option<FolderId>) -> Result<FolderActivation> {
        match self.mode {
            MoveMode::Idle => {
                self.open_folder(target)?;
                Ok(FolderActivation::Opened(target))
            }
            MoveMode::MovingItems => self.commit_move_items(target).await.map(FolderActivation::ItemsMoved),
            MoveMode::MovingFolder(_) => self
                .commit_move_folder(target)
                .await
                .map(FolderActivation::FolderMoved),
        }
    }

    /// Files every selected item into `target`.
    ///
    /// Items already in `target` are skipped; if none remain the call succeeds without
    /// contacting the backend. On success the selection is cleared, the mode returns to
    /// idle and folders and items are reloaded.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::NoActiveMove`] while a folder move is pending
    /// - [`ConsoleError::EmptySelection`] when nothing is selected
    /// - [`ConsoleError::FolderNotFound`] for an unknown target
    /// - [`ConsoleError::Backend`] if any batch fails; selection and mode are kept
    pub async fn commit_move_items(&mut self, target: Option<FolderId>) -> Result<MoveReport> {
        let span = tracing::debug_span!(
            "commit_move_items",
            selected = self.selection.len(),
            target = ?target
        );
        self.move_items(target).instrument(span).await
    }

    async fn move_items(&mut self, target: Option<FolderId>) -> Result<MoveReport> {
        if self.mode.moving_folder().is_some() {
            return Err(ConsoleError::NoActiveMove);
        }
        if self.selection.is_empty() {
            return Err(ConsoleError::EmptySelection);
        }
        if let Some(id) = target {
            self.require_folder(id)?;
        }

        let pending: Vec<ItemId> = self
            .selection
            .iter()
            .filter(|id| {
                self.items
                    .iter()
                    .find(|item| item.id() == *id)
                    .map_or(true, |item| item.folder_id() != target)
            })
            .collect();

        if !pending.is_empty() {
            let batches = pending
                .chunks(self.batch_size)
                .map(|chunk| self.backend.reassign_items_folder(chunk.to_vec(), target));
            try_join_all(batches).await.inspect_err(|e| {
                tracing::warn!(error = %e, "item reassignment failed");
            })?;
        }

        let selected = self.selection.len();
        self.selection.clear();
        self.mode = MoveMode::Idle;

        let message = format!(
            "{selected} {} moved to \"{}\"",
            <B::Item as LeafItem>::noun(selected),
            self.folder_label(target)
        );

        if !pending.is_empty() {
            self.refresh().await?;
        }

        tracing::info!(moved = pending.len(), "items moved");
        Ok(MoveReport {
            moved: pending.len(),
            target,
            message,
        })
    }

    /// Reparents the folder remembered by [`MoveMode::MovingFolder`] under `target`.
    ///
    /// The cycle check runs first and a violation never reaches the backend. Moving a
    /// folder to its current parent succeeds without a request. If the moved folder was
    /// the active one, navigation follows to `target`.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::NoActiveMove`] outside folder move mode
    /// - [`ConsoleError::FolderNotFound`] for an unknown source or target
    /// - [`ConsoleError::CycleDetected`] if `target` is the folder or lies below it;
    ///   the mode stays active so another target can be picked
    /// - [`ConsoleError::Backend`] if the update fails; mode and lists are kept
    pub async fn commit_move_folder(&mut self, target: Option<FolderId>) -> Result<MoveReport> {
        let span = tracing::debug_span!("commit_move_folder", mode = ?self.mode, target = ?target);
        self.move_folder(target).instrument(span).await
    }

    async fn move_folder(&mut self, target: Option<FolderId>) -> Result<MoveReport> {
        let source = self.mode.moving_folder().ok_or(ConsoleError::NoActiveMove)?;
        let current_parent = self.require_folder(source)?.parent_id;
        if let Some(id) = target {
            self.require_folder(id)?;
            if tree::would_create_cycle(source, target, &self.folders) {
                tracing::debug!(moving = %source, target = %id, "reparent rejected: cycle");
                return Err(ConsoleError::CycleDetected { moving: source, target: id });
            }
        }

        let name = self.folder_label(Some(source));
        let message = format!("\"{name}\" moved to \"{}\"", self.folder_label(target));

        if current_parent == target {
            self.mode = MoveMode::Idle;
            return Ok(MoveReport {
                moved: 0,
                target,
                message,
            });
        }

        self.backend
            .update_folder(source, FolderPatch::reparent(target))
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "folder reparent failed"))?;

        self.mode = MoveMode::Idle;
        self.refresh_folders().await?;
        if let Some(id) = target {
            self.expand_path_to(id);
        }
        if self.active_folder == Some(source) {
            self.active_folder = target;
            self.selection.clear();
        }

        tracing::info!(folder = %source, "folder moved");
        Ok(MoveReport {
            moved: 1,
            target,
            message,
        })
    }

    // ---- bulk delete ------------------------------------------------------------

    /// Deletes every selected item.
    ///
    /// Ids go out in concurrent batches. Items are reloaded and the selection cleared
    /// only after every batch succeeded. Returns the number of deleted items.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::DeleteDisabled`] when `behavior` turns deleting off
    /// - [`ConsoleError::EmptySelection`] when nothing is selected
    /// - [`ConsoleError::Backend`] if any batch fails; the selection is kept
    pub async fn delete_selected(&mut self, behavior: &GridBehavior) -> Result<usize> {
        let span = tracing::debug_span!("delete_selected", selected = self.selection.len());
        self.delete_items(behavior).instrument(span).await
    }

    async fn delete_items(&mut self, behavior: &GridBehavior) -> Result<usize> {
        if !behavior.delete_enabled {
            return Err(ConsoleError::DeleteDisabled);
        }
        if self.selection.is_empty() {
            return Err(ConsoleError::EmptySelection);
        }

        let ids = self.selection.to_vec();
        let batches = ids
            .chunks(self.batch_size)
            .map(|chunk| self.backend.delete_items(chunk.to_vec()));
        try_join_all(batches).await.inspect_err(|e| {
            tracing::warn!(error = %e, "item delete failed");
        })?;

        self.selection.clear();
        if self.mode == MoveMode::MovingItems {
            self.mode = MoveMode::Idle;
        }
        self.refresh().await?;

        tracing::info!(deleted = ids.len(), "items deleted");
        Ok(ids.len())
    }

    // ---- folder management -----------------------------------------------------

    /// Creates a folder under `parent` (`None` = root) and reloads the folder list.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::EmptyFolderName`] for blank names
    /// - [`ConsoleError::FolderNotFound`] for an unknown parent
    /// - [`ConsoleError::Backend`] if the request fails
    pub async fn create_folder(&mut self, name: &str, parent: Option<FolderId>) -> Result<FolderRecord> {
        let name = normalize_folder_name(name)?;
        if let Some(id) = parent {
            self.require_folder(id)?;
        }

        let created = self
            .backend
            .create_folder(NewFolder { name, parent_id: parent })
            .await?;
        self.refresh_folders().await?;
        if let Some(id) = parent {
            self.expand_path_to(id);
        }

        tracing::info!(folder = %created.id, "folder created");
        Ok(created)
    }

    /// Renames a folder and reloads the folder list.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::EmptyFolderName`] for blank names
    /// - [`ConsoleError::FolderNotFound`] for unknown ids
    /// - [`ConsoleError::Backend`] if the request fails
    pub async fn rename_folder(&mut self, id: FolderId, name: &str) -> Result<FolderRecord> {
        let name = normalize_folder_name(name)?;
        self.require_folder(id)?;

        let updated = self.backend.update_folder(id, FolderPatch::rename(name)).await?;
        self.refresh_folders().await?;
        Ok(updated)
    }

    /// Deletes a folder. The backend refuses non-empty folders.
    ///
    /// If the deleted folder was active, navigation falls back to "All"; if it was
    /// waiting to be moved, the move is dropped.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::FolderNotFound`] for unknown ids
    /// - [`ConsoleError::Backend`] if the backend refuses or fails
    pub async fn delete_folder(&mut self, id: FolderId) -> Result<()> {
        self.require_folder(id)?;
        self.backend.delete_folder(id).await?;

        self.expanded.remove(&id);
        if self.active_folder == Some(id) {
            self.active_folder = None;
            self.selection.clear();
        }
        if self.mode == MoveMode::MovingFolder(id) {
            self.mode = MoveMode::Idle;
        }
        self.refresh_folders().await?;

        tracing::info!(folder = %id, "folder deleted");
        Ok(())
    }

    // ---- reload -----------------------------------------------------------------

    /// Reloads folders and items concurrently.
    ///
    /// Selected ids that no longer exist are dropped; an active or moving folder that
    /// disappeared resets navigation or the mode.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails; the cached lists are then kept.
    pub async fn refresh(&mut self) -> Result<()> {
        let (folders, items) = try_join(self.backend.list_folders(), self.backend.list_items()).await?;
        self.items = items;
        let known: HashSet<ItemId> = self.items.iter().map(LeafItem::id).collect();
        self.selection.retain(|id| known.contains(&id));
        self.replace_folders(folders);
        tracing::debug!(folders = self.folders.len(), items = self.items.len(), "workspace refreshed");
        Ok(())
    }

    /// Reloads only the folder list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the cached list is then kept.
    pub async fn refresh_folders(&mut self) -> Result<()> {
        let folders = self.backend.list_folders().await?;
        self.replace_folders(folders);
        Ok(())
    }

    fn replace_folders(&mut self, folders: Vec<FolderRecord>) {
        self.folders = folders;
        let known: HashSet<FolderId> = self.folders.iter().map(|f| f.id).collect();
        self.expanded.retain(|id| known.contains(id));
        if self.active_folder.is_some_and(|id| !known.contains(&id)) {
            self.active_folder = None;
            self.selection.clear();
        }
        if self.mode.moving_folder().is_some_and(|id| !known.contains(&id)) {
            self.mode = MoveMode::Idle;
        }
    }
}
