//! Multi-select of leaf items.

use crate::domain::ItemId;
use crate::grid::GridBehavior;
use std::collections::BTreeSet;

/// Set of selected item ids.
///
/// Insertion order carries no meaning; iteration is ascending by id so bulk requests
/// are issued in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<ItemId>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.ids.iter().copied()
    }

    pub fn insert(&mut self, id: ItemId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        self.ids.remove(&id)
    }

    /// Flips membership of `id`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Makes `id` the only selected item.
    pub fn select_only(&mut self, id: ItemId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    /// Replaces the selection with every id in `ids`.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(ItemId) -> bool) {
        self.ids.retain(|id| keep(*id));
    }

    /// Applies a row click according to the grid's behavior flags.
    ///
    /// - multi-select off and no ctrl: the row becomes the only selection
    /// - ctrl-click multi-select on and no ctrl: the row becomes the only selection
    /// - otherwise the row's membership is toggled
    pub fn click(&mut self, id: ItemId, ctrl: bool, behavior: &GridBehavior) {
        let exclusive = (!behavior.multi_select || behavior.ctrl_click_multi_select) && !ctrl;
        if exclusive {
            self.select_only(id);
        } else {
            self.toggle(id);
        }
    }

    /// Snapshot of the ids in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<ItemId> {
        self.ids.iter().copied().collect()
    }
}
