//! Persistence layer for per-grid view configuration.
//!
//! Grid settings (column order, widths, visibility, sort, page size) are written
//! through the [`KeyValueStore`] collaborator. Folder and item data is never stored
//! here; it belongs to the [`backend`](crate::backend).
//!
//! # Modules
//!
//! - `backend`: The `KeyValueStore` trait
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: In-memory implementation
//! - `shared`: Clonable `Arc<Mutex<_>>` handle

pub mod backend;
pub mod json;
pub mod memory;
pub mod shared;

pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use shared::SharedStore;
