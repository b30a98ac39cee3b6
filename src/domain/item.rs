//! Leaf items: the products and customers that live inside folders.
//!
//! Leaf items are owned by the backend. This crate only reads them, counts them per
//! folder and requests folder reassignment, so the [`LeafItem`] trait exposes nothing
//! beyond identity and folder membership.

use crate::domain::folder::FolderId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier of a leaf item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record that can be filed into at most one folder.
///
/// `folder_id() == None` means the item is unfiled and shows up only under "All".
pub trait LeafItem: Clone {
    fn id(&self) -> ItemId;
    fn folder_id(&self) -> Option<FolderId>;
    fn set_folder_id(&mut self, folder_id: Option<FolderId>);

    /// Noun used in user-facing move reports ("3 products moved ...").
    fn noun(count: usize) -> &'static str;
}

/// A stock-keeping product. Its folder is called a category by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub sale_price: Option<f64>,
    /// Quantity on hand in the warehouse.
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(rename = "category_id", default)]
    pub folder_id: Option<FolderId>,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, folder_id: Option<i64>) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            code: None,
            barcode: None,
            unit: None,
            purchase_price: None,
            sale_price: None,
            quantity: None,
            folder_id: folder_id.map(FolderId),
        }
    }

    /// Stock value at purchase price; missing quantity counts as zero.
    #[must_use]
    pub fn purchase_total(&self) -> Option<f64> {
        self.purchase_price.map(|p| p * self.quantity.unwrap_or(0.0))
    }

    /// Stock value at sale price; missing quantity counts as zero.
    #[must_use]
    pub fn sale_total(&self) -> Option<f64> {
        self.sale_price.map(|p| p * self.quantity.unwrap_or(0.0))
    }
}

impl LeafItem for Product {
    fn id(&self) -> ItemId {
        self.id
    }

    fn folder_id(&self) -> Option<FolderId> {
        self.folder_id
    }

    fn set_folder_id(&mut self, folder_id: Option<FolderId>) {
        self.folder_id = folder_id;
    }

    fn noun(count: usize) -> &'static str {
        if count == 1 { "product" } else { "products" }
    }
}

/// A customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub folder_id: Option<FolderId>,
    /// Folder display name when the backend joins it in.
    #[serde(default)]
    pub folder_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl Customer {
    pub fn new(id: i64, name: impl Into<String>, folder_id: Option<i64>) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            code: None,
            phone: None,
            email: None,
            balance: None,
            folder_id: folder_id.map(FolderId),
            folder_name: None,
            is_active: None,
        }
    }
}

impl LeafItem for Customer {
    fn id(&self) -> ItemId {
        self.id
    }

    fn folder_id(&self) -> Option<FolderId> {
        self.folder_id
    }

    fn set_folder_id(&mut self, folder_id: Option<FolderId>) {
        self.folder_id = folder_id;
        // Stale once the folder changes; the next refresh brings the new name.
        self.folder_name = None;
    }

    fn noun(count: usize) -> &'static str {
        if count == 1 { "customer" } else { "customers" }
    }
}
