//! Local storage backed by the browser's `window.localStorage`.

use super::LocalStorage;
use crate::error::{TangoError, TangoResult};
use wasm_bindgen::JsValue;
use web_sys::Storage;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> TangoResult<Storage> {
        web_sys::window()
            .ok_or_else(|| TangoError::storage("no window"))?
            .local_storage()
            .map_err(from_js)?
            .ok_or_else(|| TangoError::storage("local storage is disabled"))
    }
}

fn from_js(value: JsValue) -> TangoError {
    TangoError::storage(format!("{value:?}"))
}

impl LocalStorage for BrowserStorage {
    fn get(&self, key: &str) -> TangoResult<Option<String>> {
        self.storage()?.get_item(key).map_err(from_js)
    }

    fn set(&self, key: &str, value: &str) -> TangoResult<()> {
        self.storage()?.set_item(key, value).map_err(from_js)
    }

    fn remove(&self, key: &str) -> TangoResult<()> {
        self.storage()?.remove_item(key).map_err(from_js)
    }
}
