//! Clonable handle that lets several grids persist into one store.

use crate::domain::error::{ConsoleError, Result};
use crate::storage::backend::KeyValueStore;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared ownership wrapper around a [`KeyValueStore`].
///
/// The product grid and the customer grid each keep a clone; keys are namespaced per
/// grid so the two never collide.
#[derive(Debug)]
pub struct SharedStore<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> SharedStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, S>> {
        self.inner
            .lock()
            .map_err(|e| ConsoleError::Storage(format!("store lock poisoned: {e}")))
    }

    /// Runs `f` with exclusive access to the wrapped store.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock was poisoned.
    pub fn with<T>(&self, f: impl FnOnce(&mut S) -> T) -> Result<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }
}

impl<S: KeyValueStore> KeyValueStore for SharedStore<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.lock()?.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.lock()?.set(key, value)
    }
}
