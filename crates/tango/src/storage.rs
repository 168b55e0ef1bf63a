//! Durable key-value storage local to the device, used for the session marker and preferences.
//!
//! Everything stored here is best-effort: callers log and ignore [`TangoError::StorageUnavailable`].

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
mod file;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::BrowserStorage;
pub use file::FileStorage;

use crate::error::{TangoError, TangoResult};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

pub trait LocalStorage {
    fn get(&self, key: &str) -> TangoResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> TangoResult<()>;
    fn remove(&self, key: &str) -> TangoResult<()>;
}

/// Storage that only lives as long as the process. Clones share the same entries.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    entries: Option<Arc<Mutex<HashMap<String, String>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: Some(Arc::default()),
        }
    }

    /// Storage that fails every operation, like a sandboxed browser without local storage.
    pub fn unavailable() -> Self {
        Self { entries: None }
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> TangoResult<T> {
        let entries = self
            .entries
            .as_ref()
            .ok_or_else(|| TangoError::storage("local storage is disabled"))?;
        let mut entries = entries
            .lock()
            .map_err(|_| TangoError::storage("local storage lock poisoned"))?;
        Ok(f(&mut entries))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> TangoResult<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> TangoResult<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> TangoResult<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}

impl<S: LocalStorage + ?Sized> LocalStorage for Arc<S> {
    fn get(&self, key: &str) -> TangoResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> TangoResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> TangoResult<()> {
        (**self).remove(key)
    }
}
