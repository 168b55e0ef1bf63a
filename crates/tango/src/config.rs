//! Names of the backend records and local files the app works with.

use std::{env, path::PathBuf};
use tango_core::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub dictionary_collection: String,
    pub primary_document: String,
    pub secondary_document: String,
    pub inspirations_collection: String,
    /// Path of the record whose `digest` field holds the admin password digest.
    pub auth_document: String,
    pub storage_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_collection: "dictionaries".to_string(),
            primary_document: "eng".to_string(),
            secondary_document: "japanese".to_string(),
            inspirations_collection: "inspirations".to_string(),
            auth_document: "config/auth".to_string(),
            storage_path: PathBuf::from("./data/storage.json"),
        }
    }
}

impl Config {
    /// Reads the config from the environment, falling back to the defaults for unset variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        let load = |key: &str, default: String| match var(key) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => {
                tracing::debug!("{key} not set, using default: {default}");
                default
            }
        };
        Self {
            dictionary_collection: load("TANGO_DICTIONARY_COLLECTION", default.dictionary_collection),
            primary_document: load("TANGO_PRIMARY_DOCUMENT", default.primary_document),
            secondary_document: load("TANGO_SECONDARY_DOCUMENT", default.secondary_document),
            inspirations_collection: load(
                "TANGO_INSPIRATIONS_COLLECTION",
                default.inspirations_collection,
            ),
            auth_document: load("TANGO_AUTH_DOCUMENT", default.auth_document),
            storage_path: load(
                "TANGO_STORAGE_PATH",
                default.storage_path.display().to_string(),
            )
            .into(),
        }
    }

    pub fn document_id(&self, category: Category) -> &str {
        match category {
            Category::Primary => &self.primary_document,
            Category::Secondary => &self.secondary_document,
        }
    }

    /// The `collection/document` path of a category's word document.
    pub fn document_path(&self, category: Category) -> String {
        format!(
            "{}/{}",
            self.dictionary_collection,
            self.document_id(category)
        )
    }

    /// The `collection/document` path of an inspiration.
    pub fn inspiration_path(&self, id: &str) -> String {
        format!("{}/{id}", self.inspirations_collection)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn uses_defaults_for_missing_vars() {
        let config = Config::from_vars(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.document_path(Category::Primary), "dictionaries/eng");
        assert_eq!(
            config.document_path(Category::Secondary),
            "dictionaries/japanese"
        );
    }

    #[test]
    fn reads_vars() {
        let vars = HashMap::from([
            ("TANGO_PRIMARY_DOCUMENT", "english"),
            ("TANGO_STORAGE_PATH", " /tmp/tango.json "),
            ("TANGO_AUTH_DOCUMENT", ""),
            ("TANGO_INSPIRATIONS_COLLECTION", "quotes"),
        ]);
        let config = Config::from_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.document_path(Category::Primary), "dictionaries/english");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/tango.json"));
        assert_eq!(config.auth_document, "config/auth");
        assert_eq!(config.inspiration_path("abc"), "quotes/abc");
    }
}
