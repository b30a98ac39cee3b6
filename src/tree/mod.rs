//! Folder tree model.
//!
//! Pure functions over the flat [`FolderRecord`](crate::domain::FolderRecord) list the
//! backend returns. The hierarchy is rebuilt on every read instead of being cached and
//! patched, so no derived node ever outlives the list it came from.
//!
//! - [`build_tree`] / [`build_counted_tree`]: derive root nodes (orphans dropped)
//! - [`find_node`]: depth-first lookup
//! - [`path_to`]: breadcrumb, always starting at the "All" bucket
//! - [`would_create_cycle`]: reparent guard evaluated before every folder move
//! - [`count_items_in_folder`]: direct item count, or all items for the root bucket

mod ancestry;
mod build;

pub use ancestry::{ancestor_chain, count_items_in_folder, descendants, path_to, would_create_cycle};
pub use build::{build_counted_tree, build_tree, find_node, visible_rows};
