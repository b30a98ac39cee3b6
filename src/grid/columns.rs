//! Closed column catalogs for the product and customer grids.

use std::fmt::Debug;
use std::hash::Hash;

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A column identifier belonging to one grid's closed catalog.
///
/// Every variant carries its persisted key, header label, alignment and default width.
/// Exactly one column per catalog is the selection (checkbox) column: it is always
/// visible, never reordered and never sorted.
pub trait GridColumn: Copy + Eq + Hash + Ord + Debug + Send + Sync + 'static {
    /// Every column in default order.
    const ALL: &'static [Self];

    /// Prefix of the persisted keys, e.g. `productTable` → `productTableColumnOrder`.
    const STORAGE_PREFIX: &'static str;

    fn key(self) -> &'static str;

    fn label(self) -> &'static str;

    fn align(self) -> Align;

    fn default_width(self) -> u32;

    fn default_visible(self) -> bool {
        true
    }

    fn is_selection(self) -> bool;

    fn is_sortable(self) -> bool;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }

    /// The catalog's selection column, if it has one.
    fn selection_column() -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.is_selection())
    }
}

/// Columns of the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductColumn {
    Checkbox,
    RowNumber,
    Id,
    Name,
    Code,
    Barcode,
    Unit,
    PurchasePrice,
    SalePrice,
    Quantity,
    PurchaseTotal,
    SaleTotal,
}

impl GridColumn for ProductColumn {
    const ALL: &'static [Self] = &[
        Self::Checkbox,
        Self::RowNumber,
        Self::Id,
        Self::Name,
        Self::Code,
        Self::Barcode,
        Self::Unit,
        Self::PurchasePrice,
        Self::SalePrice,
        Self::Quantity,
        Self::PurchaseTotal,
        Self::SaleTotal,
    ];

    const STORAGE_PREFIX: &'static str = "productTable";

    fn key(self) -> &'static str {
        match self {
            Self::Checkbox => "checkbox",
            Self::RowNumber => "rowNumber",
            Self::Id => "id",
            Self::Name => "name",
            Self::Code => "code",
            Self::Barcode => "barcode",
            Self::Unit => "unit",
            Self::PurchasePrice => "purchase_price",
            Self::SalePrice => "sale_price",
            Self::Quantity => "quantity",
            Self::PurchaseTotal => "purchase_total",
            Self::SaleTotal => "sale_total",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Checkbox => "",
            Self::RowNumber => "№",
            Self::Id => "ID",
            Self::Name => "Product name",
            Self::Code => "Code",
            Self::Barcode => "Barcode",
            Self::Unit => "Unit",
            Self::PurchasePrice => "Purchase price",
            Self::SalePrice => "Sale price",
            Self::Quantity => "Stock",
            Self::PurchaseTotal => "Purchase total",
            Self::SaleTotal => "Sale total",
        }
    }

    fn align(self) -> Align {
        match self {
            Self::Checkbox | Self::RowNumber | Self::Id => Align::Center,
            Self::Name | Self::Code | Self::Barcode | Self::Unit => Align::Left,
            Self::PurchasePrice | Self::SalePrice | Self::Quantity | Self::PurchaseTotal | Self::SaleTotal => {
                Align::Right
            }
        }
    }

    fn default_width(self) -> u32 {
        match self {
            Self::Checkbox => 50,
            Self::RowNumber | Self::Id => 60,
            Self::Name => 200,
            Self::Code => 110,
            Self::Barcode => 150,
            Self::Unit => 80,
            Self::Quantity => 90,
            Self::PurchasePrice | Self::SalePrice | Self::PurchaseTotal | Self::SaleTotal => 120,
        }
    }

    fn is_selection(self) -> bool {
        self == Self::Checkbox
    }

    fn is_sortable(self) -> bool {
        !matches!(self, Self::Checkbox | Self::RowNumber)
    }
}

/// Columns of the customer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CustomerColumn {
    Checkbox,
    RowNumber,
    Code,
    Name,
    Phone,
    Folder,
    Balance,
}

impl GridColumn for CustomerColumn {
    const ALL: &'static [Self] = &[
        Self::Checkbox,
        Self::RowNumber,
        Self::Code,
        Self::Name,
        Self::Phone,
        Self::Folder,
        Self::Balance,
    ];

    const STORAGE_PREFIX: &'static str = "customerTable";

    fn key(self) -> &'static str {
        match self {
            Self::Checkbox => "checkbox",
            Self::RowNumber => "rowNumber",
            Self::Code => "code",
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Folder => "folder",
            Self::Balance => "balance",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Checkbox => "",
            Self::RowNumber => "№",
            Self::Code => "Code",
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Folder => "Folder",
            Self::Balance => "Balance",
        }
    }

    fn align(self) -> Align {
        match self {
            Self::Checkbox | Self::RowNumber => Align::Center,
            Self::Code | Self::Name | Self::Phone | Self::Folder => Align::Left,
            Self::Balance => Align::Right,
        }
    }

    fn default_width(self) -> u32 {
        match self {
            Self::Checkbox => 50,
            Self::RowNumber => 70,
            Self::Code => 120,
            Self::Name => 200,
            Self::Phone | Self::Folder => 150,
            Self::Balance => 100,
        }
    }

    fn is_selection(self) -> bool {
        self == Self::Checkbox
    }

    fn is_sortable(self) -> bool {
        !matches!(self, Self::Checkbox | Self::RowNumber)
    }
}
