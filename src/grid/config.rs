//! Column configuration of one grid instance and its persisted encoding.
//!
//! Every aspect is stored under its own key as a small JSON document, the same shape
//! the web console writes:
//!
//! | aspect     | example value                                   |
//! |------------|-------------------------------------------------|
//! | order      | `["checkbox","name","code"]`                    |
//! | widths     | `{"checkbox":50,"name":120}`                    |
//! | visibility | `{"checkbox":true,"code":false}`                |
//! | sort       | `{"key":"name","direction":"asc"}` or `null`    |
//!
//! Decoding is lenient: unknown keys are ignored, columns missing from a stored
//! document are merged in with their defaults, and an undecodable document is replaced
//! by the defaults wholesale.

use super::columns::GridColumn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Narrowest width a column can be resized to, in pixels.
pub const MIN_COLUMN_WIDTH: u32 = 50;

/// Default and bounds for the page size setting.
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;
pub const MIN_ROWS_PER_PAGE: usize = 5;
pub const MAX_ROWS_PER_PAGE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<C> {
    pub column: C,
    pub direction: SortDirection,
}

/// Direction for [`ColumnConfig::move_column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// Row interaction switches, persisted as `<prefix>FunctionSettings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridBehavior {
    pub multi_select: bool,
    pub ctrl_click_multi_select: bool,
    pub delete_enabled: bool,
}

impl Default for GridBehavior {
    fn default() -> Self {
        Self {
            multi_select: true,
            ctrl_click_multi_select: true,
            delete_enabled: true,
        }
    }
}

/// Order, widths, visibility and sort of one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConfig<C: GridColumn> {
    order: Vec<C>,
    widths: HashMap<C, u32>,
    visibility: HashMap<C, bool>,
    sort: Option<SortState<C>>,
}

impl<C: GridColumn> Default for ColumnConfig<C> {
    fn default() -> Self {
        Self {
            order: C::ALL.to_vec(),
            widths: C::ALL.iter().map(|c| (*c, c.default_width())).collect(),
            visibility: C::ALL.iter().map(|c| (*c, c.default_visible())).collect(),
            sort: None,
        }
    }
}

impl<C: GridColumn> ColumnConfig<C> {
    #[must_use]
    pub fn order(&self) -> &[C] {
        &self.order
    }

    #[must_use]
    pub fn width(&self, column: C) -> u32 {
        self.widths.get(&column).copied().unwrap_or_else(|| column.default_width())
    }

    /// The selection column always reports visible.
    #[must_use]
    pub fn is_visible(&self, column: C) -> bool {
        column.is_selection() || self.visibility.get(&column).copied().unwrap_or(true)
    }

    #[must_use]
    pub fn sort(&self) -> Option<SortState<C>> {
        self.sort
    }

    /// Order filtered by visibility.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<C> {
        self.order.iter().copied().filter(|c| self.is_visible(*c)).collect()
    }

    /// Position of `column` in the current order.
    #[must_use]
    pub fn position(&self, column: C) -> Option<usize> {
        self.order.iter().position(|c| *c == column)
    }

    /// Replaces the order. Unknown duplicates are dropped and missing columns appended,
    /// so the result is always a permutation of the catalog.
    pub fn set_order(&mut self, order: impl IntoIterator<Item = C>) -> bool {
        let mut next: Vec<C> = Vec::with_capacity(C::ALL.len());
        for column in order {
            if !next.contains(&column) {
                next.push(column);
            }
        }
        for column in C::ALL {
            if !next.contains(column) {
                next.push(*column);
            }
        }
        if next == self.order {
            return false;
        }
        self.order = next;
        true
    }

    /// Sets a width, clamped to [`MIN_COLUMN_WIDTH`].
    pub fn set_width(&mut self, column: C, width: u32) -> bool {
        let width = width.max(MIN_COLUMN_WIDTH);
        self.widths.insert(column, width) != Some(width)
    }

    /// Shows or hides a column. The selection column cannot be hidden.
    pub fn set_visibility(&mut self, column: C, visible: bool) -> bool {
        if column.is_selection() {
            return false;
        }
        self.visibility.insert(column, visible) != Some(visible)
    }

    /// Header click: the sorted column flips direction, another sortable column starts
    /// ascending, a non-sortable column changes nothing.
    pub fn toggle_sort(&mut self, column: C) -> bool {
        if !column.is_sortable() {
            return false;
        }
        let direction = match self.sort {
            Some(current) if current.column == column => current.direction.flipped(),
            _ => SortDirection::Asc,
        };
        self.sort = Some(SortState { column, direction });
        true
    }

    pub fn clear_sort(&mut self) -> bool {
        self.sort.take().is_some()
    }

    /// Drag-and-drop reorder: `dragged` takes the position `target` had.
    ///
    /// No-op when the two are equal or either is the selection column.
    pub fn reorder(&mut self, dragged: C, target: C) -> bool {
        if dragged == target || dragged.is_selection() || target.is_selection() {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(dragged), self.position(target)) else {
            return false;
        };
        self.order.remove(from);
        self.order.insert(to, dragged);
        true
    }

    /// Swaps `column` with its neighbour. The selection column never moves and is never
    /// displaced.
    pub fn move_column(&mut self, column: C, step: Step) -> bool {
        if column.is_selection() {
            return false;
        }
        let Some(index) = self.position(column) else {
            return false;
        };
        let neighbour = match step {
            Step::Up => index.checked_sub(1),
            Step::Down => Some(index + 1).filter(|i| *i < self.order.len()),
        };
        match neighbour {
            Some(other) if !self.order[other].is_selection() => {
                self.order.swap(index, other);
                true
            }
            _ => false,
        }
    }

    // ---- persisted encoding ------------------------------------------------------

    pub(crate) fn encode_order(&self) -> String {
        let keys: Vec<&str> = self.order.iter().map(|c| c.key()).collect();
        serde_json::to_string(&keys).unwrap_or_else(|_| "[]".to_string())
    }

    pub(crate) fn encode_widths(&self) -> String {
        let map: BTreeMap<&str, u32> = C::ALL.iter().map(|c| (c.key(), self.width(*c))).collect();
        serde_json::to_string(&map).unwrap_or_else(|_| "{}".to_string())
    }

    pub(crate) fn encode_visibility(&self) -> String {
        let map: BTreeMap<&str, bool> = C::ALL.iter().map(|c| (c.key(), self.is_visible(*c))).collect();
        serde_json::to_string(&map).unwrap_or_else(|_| "{}".to_string())
    }

    pub(crate) fn encode_sort(&self) -> String {
        let raw = self.sort.map(|s| RawSort {
            key: s.column.key().to_string(),
            direction: s.direction,
        });
        serde_json::to_string(&raw).unwrap_or_else(|_| "null".to_string())
    }

    /// Rebuilds a configuration from the four persisted documents.
    ///
    /// Each document is decoded independently; a missing or malformed one leaves that
    /// aspect at its defaults.
    pub(crate) fn decode(
        order: Option<&str>,
        widths: Option<&str>,
        visibility: Option<&str>,
        sort: Option<&str>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(keys) = order.and_then(|raw| parse::<Vec<String>>(raw, "order")) {
            config.set_order(keys.iter().filter_map(|k| C::from_key(k)));
        }

        if let Some(map) = widths.and_then(|raw| parse::<BTreeMap<String, f64>>(raw, "widths")) {
            for (key, width) in map {
                if let Some(column) = C::from_key(&key) {
                    if width.is_finite() {
                        config.set_width(column, width.round().clamp(0.0, f64::from(u32::MAX)) as u32);
                    }
                }
            }
        }

        if let Some(map) = visibility.and_then(|raw| parse::<BTreeMap<String, bool>>(raw, "visibility")) {
            for (key, visible) in map {
                if let Some(column) = C::from_key(&key) {
                    config.set_visibility(column, visible);
                }
            }
        }

        if let Some(Some(raw)) = sort.and_then(|raw| parse::<Option<RawSort>>(raw, "sort")) {
            config.sort = C::from_key(&raw.key)
                .filter(|c| c.is_sortable())
                .map(|column| SortState {
                    column,
                    direction: raw.direction,
                });
        }

        config
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RawSort {
    key: String,
    direction: SortDirection,
}

fn parse<T: serde::de::DeserializeOwned>(raw: &str, aspect: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(aspect, error = %e, "ignoring undecodable grid setting");
            None
        }
    }
}
