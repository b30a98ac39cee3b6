//! Ancestry queries over the flat folder list.
//!
//! These walk `parent_id` pointers directly instead of building a tree, so they also
//! work for folders the tree builder drops. Every walk tracks visited ids and stops on
//! a repeat, which keeps corrupt backend data from looping forever.

use crate::domain::{FolderId, FolderRecord, LeafItem, PathEntry};
use std::collections::{HashMap, HashSet};

fn index(records: &[FolderRecord]) -> HashMap<FolderId, &FolderRecord> {
    records.iter().map(|r| (r.id, r)).collect()
}

/// Returns `target` followed by its ancestors, nearest first.
///
/// Stops at a root, at a parent that does not exist, or at a repeated id.
#[must_use]
pub fn ancestor_chain(target: FolderId, records: &[FolderRecord]) -> Vec<FolderId> {
    let by_id = index(records);
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = Some(target);

    while let Some(id) = current {
        if !seen.insert(id) {
            break;
        }
        chain.push(id);
        current = by_id.get(&id).and_then(|r| r.parent_id);
    }
    chain
}

/// Breadcrumb for `folder`: the "All" bucket followed by the folders from the root
/// down to `folder` itself.
///
/// `None` and unknown ids both yield just the "All" entry.
///
/// # Examples
///
/// ```
/// use foldergrid::domain::{FolderId, FolderRecord};
/// use foldergrid::tree::path_to;
///
/// let records = vec![
///     FolderRecord::new(1, "Food", None),
///     FolderRecord::new(2, "Drinks", Some(1)),
/// ];
/// let names: Vec<_> = path_to(Some(FolderId(2)), &records)
///     .into_iter()
///     .map(|e| e.name)
///     .collect();
/// assert_eq!(names, ["All", "Food", "Drinks"]);
/// ```
#[must_use]
pub fn path_to(folder: Option<FolderId>, records: &[FolderRecord]) -> Vec<PathEntry> {
    let mut path = vec![PathEntry::root()];
    let Some(folder) = folder else {
        return path;
    };

    let by_id = index(records);
    let mut segments: Vec<PathEntry> = ancestor_chain(folder, records)
        .into_iter()
        .filter_map(|id| by_id.get(&id))
        .map(|r| PathEntry {
            id: Some(r.id),
            name: r.name.clone(),
        })
        .collect();
    segments.reverse();
    path.extend(segments);
    path
}

/// Whether making `target` the parent of `moving` would create a cycle.
///
/// True when `target` is `moving` itself or any folder below it, found by walking
/// the ancestor chain of `target`. A `None` target (the root) never creates one.
///
/// # Examples
///
/// ```
/// use foldergrid::domain::{FolderId, FolderRecord};
/// use foldergrid::tree::would_create_cycle;
///
/// let records = vec![
///     FolderRecord::new(1, "A", None),
///     FolderRecord::new(2, "B", Some(1)),
///     FolderRecord::new(3, "C", Some(2)),
/// ];
/// assert!(would_create_cycle(FolderId(1), Some(FolderId(3)), &records));
/// assert!(!would_create_cycle(FolderId(1), None, &records));
/// assert!(!would_create_cycle(FolderId(3), Some(FolderId(1)), &records));
/// ```
#[must_use]
pub fn would_create_cycle(moving: FolderId, target: Option<FolderId>, records: &[FolderRecord]) -> bool {
    target.is_some_and(|target| ancestor_chain(target, records).contains(&moving))
}

/// All folders strictly below `folder`, in breadth-first order.
#[must_use]
pub fn descendants(folder: FolderId, records: &[FolderRecord]) -> Vec<FolderId> {
    let mut children_of: HashMap<FolderId, Vec<FolderId>> = HashMap::new();
    for record in records {
        if let Some(parent) = record.parent_id {
            children_of.entry(parent).or_default().push(record.id);
        }
    }

    let mut out = Vec::new();
    let mut seen = HashSet::from([folder]);
    let mut queue = std::collections::VecDeque::from([folder]);
    while let Some(id) = queue.pop_front() {
        for &child in children_of.get(&id).into_iter().flatten() {
            if seen.insert(child) {
                out.push(child);
                queue.push_back(child);
            }
        }
    }
    out
}

/// Number of items filed directly in `folder`; `None` counts every item.
#[must_use]
pub fn count_items_in_folder<I: LeafItem>(folder: Option<FolderId>, items: &[I]) -> usize {
    match folder {
        None => items.len(),
        Some(id) => items.iter().filter(|item| item.folder_id() == Some(id)).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Customer;
    use crate::tree::build_tree;

    fn chain() -> Vec<FolderRecord> {
        vec![
            FolderRecord::new(1, "A", None),
            FolderRecord::new(2, "B", Some(1)),
            FolderRecord::new(3, "C", Some(2)),
        ]
    }

    fn wide() -> Vec<FolderRecord> {
        vec![
            FolderRecord::new(1, "A", None),
            FolderRecord::new(2, "B", Some(1)),
            FolderRecord::new(3, "C", Some(2)),
            FolderRecord::new(4, "D", Some(1)),
            FolderRecord::new(5, "E", None),
            FolderRecord::new(6, "F", Some(5)),
            FolderRecord::new(7, "G", Some(4)),
        ]
    }

    #[test]
    fn cycle_scenario() {
        let records = chain();
        assert!(would_create_cycle(FolderId(1), Some(FolderId(3)), &records));
        assert!(would_create_cycle(FolderId(2), Some(FolderId(2)), &records));
        assert!(!would_create_cycle(FolderId(1), None, &records));
        assert!(!would_create_cycle(FolderId(3), Some(FolderId(1)), &records));
    }

    #[test]
    fn cycle_iff_target_is_self_or_descendant() {
        let records = wide();
        let ids: Vec<FolderId> = records.iter().map(|r| r.id).collect();
        for &moving in &ids {
            let below = descendants(moving, &records);
            for &target in &ids {
                let expected = target == moving || below.contains(&target);
                assert_eq!(
                    would_create_cycle(moving, Some(target), &records),
                    expected,
                    "moving {moving} under {target}"
                );
            }
        }
    }

    #[test]
    fn path_starts_with_all_bucket() {
        let records = chain();
        let path = path_to(Some(FolderId(3)), &records);
        let ids: Vec<_> = path.iter().map(|e| e.id).collect();
        assert_eq!(ids, [None, Some(FolderId(1)), Some(FolderId(2)), Some(FolderId(3))]);
        assert_eq!(path[0].name, "All");

        assert_eq!(path_to(None, &records), vec![PathEntry::root()]);
        assert_eq!(path_to(Some(FolderId(77)), &records), vec![PathEntry::root()]);
    }

    #[test]
    fn path_of_orphan_stops_at_missing_parent() {
        let mut records = chain();
        records.push(FolderRecord::new(9, "Lost", Some(50)));
        let names: Vec<_> = path_to(Some(FolderId(9)), &records).into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["All", "Lost"]);
    }

    #[test]
    fn ancestor_walk_terminates_on_corrupt_cycle() {
        let records = vec![FolderRecord::new(1, "X", Some(2)), FolderRecord::new(2, "Y", Some(1))];
        assert_eq!(ancestor_chain(FolderId(1), &records), [FolderId(1), FolderId(2)]);
        assert!(would_create_cycle(FolderId(2), Some(FolderId(1)), &records));
    }

    #[test]
    fn counting_all_matches_item_total() {
        let records = wide();
        let items: Vec<Customer> = (1..=12)
            .map(|i| Customer::new(i, format!("c{i}"), if i % 3 == 0 { None } else { Some(i % 7 + 1) }))
            .collect();
        let _ = build_tree(&records);
        assert_eq!(count_items_in_folder(None, &items), items.len());

        let per_folder: usize = records
            .iter()
            .map(|r| count_items_in_folder(Some(r.id), &items))
            .sum();
        let unfiled = items.iter().filter(|c| c.folder_id.is_none()).count();
        assert_eq!(per_folder + unfiled, items.len());
    }

    #[test]
    fn descendants_are_breadth_first() {
        assert_eq!(
            descendants(FolderId(1), &wide()),
            [FolderId(2), FolderId(4), FolderId(3), FolderId(7)]
        );
        assert!(descendants(FolderId(7), &wide()).is_empty());
    }
}
