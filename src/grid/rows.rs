//! Row pipeline: folder scope, search, sort and pagination.
//!
//! The grid never owns its rows; it borrows the workspace's item list and produces a
//! [`RowPage`] of references for the current view. Each stage is also exposed on its
//! own so hosts can compose them differently.

use super::columns::{CustomerColumn, GridColumn, ProductColumn};
use super::config::{SortDirection, SortState, DEFAULT_ROWS_PER_PAGE};
use crate::domain::{Customer, FolderId, LeafItem, Product};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;
use std::fmt;

/// Typed content of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl CellValue {
    fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) if !s.is_empty() => Self::Text(s.to_string()),
            _ => Self::Empty,
        }
    }

    fn decimal(value: Option<f64>) -> Self {
        value.filter(|v| v.is_finite()).map_or(Self::Empty, Self::Decimal)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Decimal(n) => Some(*n),
            Self::Empty | Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(n) => write!(f, "{n:.2}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A leaf item that can be shown in a grid with columns `C`.
///
/// The selection and row-number columns render from grid state, not from the row,
/// and report [`CellValue::Empty`].
pub trait GridRow<C: GridColumn>: LeafItem {
    fn cell(&self, column: C) -> CellValue;
}

impl GridRow<ProductColumn> for Product {
    fn cell(&self, column: ProductColumn) -> CellValue {
        match column {
            ProductColumn::Checkbox | ProductColumn::RowNumber => CellValue::Empty,
            ProductColumn::Id => CellValue::Integer(self.id.0),
            ProductColumn::Name => CellValue::text(Some(self.name.as_str())),
            ProductColumn::Code => CellValue::text(self.code.as_deref()),
            ProductColumn::Barcode => CellValue::text(self.barcode.as_deref()),
            ProductColumn::Unit => CellValue::text(self.unit.as_deref()),
            ProductColumn::PurchasePrice => CellValue::decimal(self.purchase_price),
            ProductColumn::SalePrice => CellValue::decimal(self.sale_price),
            ProductColumn::Quantity => CellValue::decimal(self.quantity),
            ProductColumn::PurchaseTotal => CellValue::decimal(self.purchase_total()),
            ProductColumn::SaleTotal => CellValue::decimal(self.sale_total()),
        }
    }
}

impl GridRow<CustomerColumn> for Customer {
    fn cell(&self, column: CustomerColumn) -> CellValue {
        match column {
            CustomerColumn::Checkbox | CustomerColumn::RowNumber => CellValue::Empty,
            CustomerColumn::Code => CellValue::text(self.code.as_deref()),
            CustomerColumn::Name => CellValue::text(Some(self.name.as_str())),
            CustomerColumn::Phone => CellValue::text(self.phone.as_deref()),
            CustomerColumn::Folder => CellValue::text(self.folder_name.as_deref()),
            CustomerColumn::Balance => CellValue::decimal(self.balance),
        }
    }
}

/// Orders two cells; empty cells sort after everything regardless of `direction`.
#[must_use]
pub fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    let ordered = match (a, b) {
        (CellValue::Empty, CellValue::Empty) => return Ordering::Equal,
        (CellValue::Empty, _) => return Ordering::Greater,
        (_, CellValue::Empty) => return Ordering::Less,
        _ => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => a.to_string().to_lowercase().cmp(&b.to_string().to_lowercase()),
        },
    };
    match direction {
        SortDirection::Asc => ordered,
        SortDirection::Desc => ordered.reverse(),
    }
}

/// Stable sort of `rows` by the given column.
pub fn sort_rows<C: GridColumn, R: GridRow<C>>(rows: &mut [&R], sort: SortState<C>) {
    let _span = tracing::debug_span!("sort_rows", rows = rows.len(), column = ?sort.column).entered();
    rows.sort_by(|a, b| compare_cells(&a.cell(sort.column), &b.cell(sort.column), sort.direction));
}

/// Rows directly inside `folder`; `None` keeps every row.
pub fn scope_rows<R: LeafItem>(rows: &[R], folder: Option<FolderId>) -> Vec<&R> {
    match folder {
        None => rows.iter().collect(),
        Some(id) => rows.iter().filter(|r| r.folder_id() == Some(id)).collect(),
    }
}

/// Whitespace-separated, lower-cased search tokens.
fn tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Keeps rows where every token fuzzy-matches the chosen column, or any text cell
/// when no column is given. An empty query keeps everything.
pub fn filter_rows<'a, C: GridColumn, R: GridRow<C>>(rows: Vec<&'a R>, query: &str, column: Option<C>) -> Vec<&'a R> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return rows;
    }
    let _span = tracing::debug_span!("filter_rows", rows = rows.len(), tokens = tokens.len()).entered();

    let matcher = SkimMatcherV2::default();
    let columns: Vec<C> = column.map_or_else(|| C::ALL.to_vec(), |c| vec![c]);

    let filtered: Vec<&R> = rows
        .into_iter()
        .filter(|row| {
            let haystacks: Vec<String> = columns
                .iter()
                .filter_map(|c| {
                    let cell = row.cell(*c);
                    match &cell {
                        CellValue::Text(s) => Some(s.to_lowercase()),
                        CellValue::Integer(_) | CellValue::Decimal(_) if column.is_some() => Some(cell.to_string()),
                        _ => None,
                    }
                })
                .collect();
            tokens
                .iter()
                .all(|token| haystacks.iter().any(|h| matcher.fuzzy_match(h, token).is_some()))
        })
        .collect();

    tracing::debug!(matched = filtered.len(), "search filter applied");
    filtered
}

/// Character ranges of `text` matched by `query`, merged into `(start, end)` runs for
/// highlighting. Empty when nothing matches.
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let Some((_score, indices)) = SkimMatcherV2::default().fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// One page of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPage<'a, R> {
    pub rows: Vec<&'a R>,
    /// 1-based page actually shown after clamping.
    pub page: usize,
    pub page_count: usize,
    /// Rows matching the query across all pages.
    pub total: usize,
    /// Zero-based index of the first row, for the row-number column.
    pub offset: usize,
}

/// Cuts one 1-based page out of `rows`, clamping `page` into range.
#[must_use]
pub fn paginate<R>(rows: Vec<&R>, page: usize, rows_per_page: usize) -> RowPage<'_, R> {
    let per_page = rows_per_page.max(1);
    let total = rows.len();
    let page_count = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, page_count);
    let offset = (page - 1) * per_page;
    let rows = rows.into_iter().skip(offset).take(per_page).collect();
    RowPage {
        rows,
        page,
        page_count,
        total,
        offset,
    }
}

/// Everything that shapes the visible rows of a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowQuery<C> {
    pub folder: Option<FolderId>,
    pub search: String,
    pub search_column: Option<C>,
    pub sort: Option<SortState<C>>,
    pub page: usize,
    pub rows_per_page: usize,
}

impl<C> Default for RowQuery<C> {
    fn default() -> Self {
        Self {
            folder: None,
            search: String::new(),
            search_column: None,
            sort: None,
            page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl<C: GridColumn> RowQuery<C> {
    /// Runs scope, search, sort and pagination in that order.
    pub fn run<'a, R: GridRow<C>>(&self, rows: &'a [R]) -> RowPage<'a, R> {
        let scoped = scope_rows(rows, self.folder);
        let mut matched = filter_rows(scoped, &self.search, self.search_column);
        if let Some(sort) = self.sort {
            sort_rows(&mut matched, sort);
        }
        paginate(matched, self.page, self.rows_per_page)
    }
}
