//! Key-value store abstraction.
//!
//! Grid view configuration is persisted through the [`KeyValueStore`] trait so the
//! grid store can run against a JSON file, a browser-style local storage bridge or a
//! plain in-memory map in tests. Values are opaque strings; callers own the encoding.

use crate::domain::error::Result;

/// String-keyed persistence collaborator.
///
/// # Implementations
///
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local map
/// - [`JsonFileStore`](crate::storage::JsonFileStore): single JSON file with atomic writes
/// - [`SharedStore`](crate::storage::SharedStore): clonable handle around another store
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be read. A missing key is
    /// `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be made durable.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
