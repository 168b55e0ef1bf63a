//! Local storage kept in a JSON file.

use super::LocalStorage;
use crate::error::{TangoError, TangoResult};
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

/// Stores entries as a single JSON object, rewritten on every change.
/// Clones share the same file and entries.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: Arc<PathBuf>,
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FileStorage {
    /// Opens the file at `path`. A missing or empty file is treated as empty storage.
    pub fn open(path: impl Into<PathBuf>) -> TangoResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        tracing::debug!("Opened local storage at {}", path.display());
        Ok(Self {
            path: Arc::new(path),
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `f` to a copy of the entries and only keeps the result if it was written to disk.
    fn modify(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> TangoResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| TangoError::storage("local storage lock poisoned"))?;
        let mut modified = entries.clone();
        f(&mut modified);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(self.path.as_path(), serde_json::to_string_pretty(&modified)?)?;
        *entries = modified;
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> TangoResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| TangoError::storage("local storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> TangoResult<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> TangoResult<()> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}
