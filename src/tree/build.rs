//! Tree construction from the flat folder list.

use crate::domain::{FolderId, FolderNode, FolderRecord, LeafItem};
use std::collections::HashMap;

/// Builds the folder hierarchy with zero item counts.
///
/// Children keep the order in which they appear in `records` (the backend sorts by
/// name). Records whose `parent_id` points at a folder that does not exist are orphans
/// and are left out of the tree; they stay reachable through the flat list only.
/// Records caught in a parent cycle are unreachable from any root and are likewise
/// left out, so construction always terminates.
///
/// # Examples
///
/// ```
/// use foldergrid::domain::FolderRecord;
/// use foldergrid::tree::build_tree;
///
/// let records = vec![
///     FolderRecord::new(1, "Food", None),
///     FolderRecord::new(2, "Drinks", Some(1)),
///     FolderRecord::new(3, "Lost", Some(99)),
/// ];
/// let roots = build_tree(&records);
/// assert_eq!(roots.len(), 1);
/// assert_eq!(roots[0].children[0].name(), "Drinks");
/// ```
#[must_use]
pub fn build_tree(records: &[FolderRecord]) -> Vec<FolderNode> {
    build_with_counts(records, &HashMap::new())
}

/// Builds the folder hierarchy with direct item counts filled in.
#[must_use]
pub fn build_counted_tree<I: LeafItem>(records: &[FolderRecord], items: &[I]) -> Vec<FolderNode> {
    let mut counts: HashMap<FolderId, usize> = HashMap::new();
    for folder_id in items.iter().filter_map(LeafItem::folder_id) {
        *counts.entry(folder_id).or_default() += 1;
    }
    build_with_counts(records, &counts)
}

fn build_with_counts(records: &[FolderRecord], counts: &HashMap<FolderId, usize>) -> Vec<FolderNode> {
    let _span = tracing::debug_span!("build_tree", folders = records.len()).entered();

    let mut children_of: HashMap<FolderId, Vec<&FolderRecord>> = HashMap::new();
    let mut roots = Vec::new();
    for record in records {
        match record.parent_id {
            None => roots.push(record),
            Some(parent) => children_of.entry(parent).or_default().push(record),
        }
    }

    let tree: Vec<FolderNode> = roots
        .into_iter()
        .map(|root| attach(root, &children_of, counts))
        .collect();

    let placed: usize = tree.iter().map(FolderNode::subtree_len).sum();
    if placed < records.len() {
        tracing::debug!(
            dropped = records.len() - placed,
            "folders without a reachable parent left out of tree"
        );
    }

    tree
}

fn attach(
    record: &FolderRecord,
    children_of: &HashMap<FolderId, Vec<&FolderRecord>>,
    counts: &HashMap<FolderId, usize>,
) -> FolderNode {
    let children = children_of
        .get(&record.id)
        .map(|kids| {
            kids.iter()
                .filter(|kid| kid.id != record.id)
                .map(|kid| attach(kid, children_of, counts))
                .collect()
        })
        .unwrap_or_default();

    FolderNode {
        record: record.clone(),
        children,
        item_count: counts.get(&record.id).copied().unwrap_or(0),
    }
}

/// Depth-first search for a node by id.
#[must_use]
pub fn find_node(id: FolderId, roots: &[FolderNode]) -> Option<&FolderNode> {
    roots.iter().find_map(|node| {
        if node.id() == id {
            Some(node)
        } else {
            find_node(id, &node.children)
        }
    })
}

/// Flattens a tree into `(depth, node)` pairs in display order.
///
/// Only descends into nodes for which `expanded` returns `true`, which is how the
/// sidebar renders collapsed branches.
pub fn visible_rows<'a>(
    roots: &'a [FolderNode],
    expanded: &dyn Fn(FolderId) -> bool,
) -> Vec<(usize, &'a FolderNode)> {
    fn walk<'a>(
        nodes: &'a [FolderNode],
        depth: usize,
        expanded: &dyn Fn(FolderId) -> bool,
        out: &mut Vec<(usize, &'a FolderNode)>,
    ) {
        for node in nodes {
            out.push((depth, node));
            if expanded(node.id()) {
                walk(&node.children, depth + 1, expanded, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(roots, 0, expanded, &mut out);
    out
}
