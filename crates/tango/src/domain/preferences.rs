use crate::storage::LocalStorage;

pub const SKIP_DELETE_CONFIRMATION_KEY: &str = "tango.skip_delete_confirmation";

/// User preferences persisted to local storage. Failures are logged and otherwise ignored.
pub struct Preferences<S> {
    storage: S,
}

impl<S: LocalStorage> Preferences<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Whether deletions skip the confirmation prompt. Defaults to false.
    pub fn skip_delete_confirmation(&self) -> bool {
        match self.storage.get(SKIP_DELETE_CONFIRMATION_KEY) {
            Ok(Some(value)) => value == "true",
            Ok(None) => false,
            Err(err) => {
                tracing::warn!("Failed to read preference: {err}");
                false
            }
        }
    }

    pub fn set_skip_delete_confirmation(&self, skip: bool) {
        let value = if skip { "true" } else { "false" };
        if let Err(err) = self.storage.set(SKIP_DELETE_CONFIRMATION_KEY, value) {
            tracing::warn!("Failed to save preference: {err}");
        }
    }
}
