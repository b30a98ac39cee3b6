//! Folder domain model.
//!
//! Folders (called categories on the product side) form a hierarchy through their
//! `parent_id` link. The backend hands them out as a flat list of [`FolderRecord`]s;
//! the [`tree`](crate::tree) module derives [`FolderNode`] hierarchies from that list
//! on every read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the synthetic root bucket holding unfiled items.
pub const ROOT_LABEL: &str = "All";

/// Backend identifier of a folder (always `>= 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(pub i64);

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A folder as stored by the backend.
///
/// `parent_id == None` marks a root folder. The parent relation is expected to be
/// acyclic; the move engine refuses any reparent that would break this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub id: FolderId,
    pub name: String,
    pub parent_id: Option<FolderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FolderRecord {
    /// Creates a record without timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use foldergrid::domain::{FolderId, FolderRecord};
    ///
    /// let drinks = FolderRecord::new(2, "Drinks", Some(1));
    /// assert_eq!(drinks.parent_id, Some(FolderId(1)));
    /// assert!(!drinks.is_root());
    /// ```
    pub fn new(id: i64, name: impl Into<String>, parent_id: Option<i64>) -> Self {
        Self {
            id: FolderId(id),
            name: name.into(),
            parent_id: parent_id.map(FolderId),
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns `true` if the folder has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A folder with its derived children and direct item count.
///
/// Built fresh from the flat record list; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    pub record: FolderRecord,
    pub children: Vec<FolderNode>,
    /// Number of leaf items assigned directly to this folder.
    pub item_count: usize,
}

impl FolderNode {
    #[must_use]
    pub const fn id(&self) -> FolderId {
        self.record.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }
}

/// One breadcrumb segment. `id == None` is the synthetic "All" bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    pub id: Option<FolderId>,
    pub name: String,
}

impl PathEntry {
    #[must_use]
    pub fn root() -> Self {
        Self {
            id: None,
            name: ROOT_LABEL.to_string(),
        }
    }
}

/// Payload of a folder creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFolder {
    pub name: String,
    pub parent_id: Option<FolderId>,
}

/// Partial folder update. `None` fields are left untouched by the backend.
///
/// `parent_id` is doubly optional: `Some(None)` moves the folder to the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<FolderId>>,
}

impl FolderPatch {
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parent_id: None,
        }
    }

    #[must_use]
    pub const fn reparent(parent_id: Option<FolderId>) -> Self {
        Self {
            name: None,
            parent_id: Some(parent_id),
        }
    }
}

/// Trims a folder name and rejects empty results.
///
/// # Errors
///
/// Returns [`ConsoleError::EmptyFolderName`](crate::ConsoleError::EmptyFolderName) for
/// empty or whitespace-only input.
pub fn normalize_folder_name(raw: &str) -> crate::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(crate::ConsoleError::EmptyFolderName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_record_deserializes_backend_shape() {
        let json = r#"{"id":3,"name":"Snacks","parent_id":null,"created_at":"2024-05-01T10:00:00Z"}"#;
        let record: FolderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, FolderId(3));
        assert!(record.is_root());
        assert!(record.created_at.is_some());
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn folder_names_are_trimmed() {
        assert_eq!(normalize_folder_name("  Drinks ").unwrap(), "Drinks");
        assert!(matches!(
            normalize_folder_name("   "),
            Err(crate::ConsoleError::EmptyFolderName)
        ));
    }

    #[test]
    fn reparent_patch_serializes_null_parent() {
        let patch = FolderPatch::reparent(None);
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"parent_id":null}"#);
        let rename = FolderPatch::rename("Tea");
        assert_eq!(serde_json::to_string(&rename).unwrap(), r#"{"name":"Tea"}"#);
    }
}
