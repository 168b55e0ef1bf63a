//! Tango core types and functions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two word lists a pair can belong to.
/// Each category is backed by a single document whose keys are words and values are translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Primary,
    Secondary,
}

impl Category {
    /// Both categories in display order.
    pub const ALL: [Category; 2] = [Category::Primary, Category::Secondary];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct WordPair {
    pub word: String,
    pub translation: String,
    pub category: Category,
}

impl WordPair {
    pub fn new(category: Category, word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            category,
        }
    }

    /// Materialises the pairs stored in a category document, one per field, in field order.
    pub fn from_fields<I, K, V>(category: Category, fields: I) -> Vec<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        fields
            .into_iter()
            .map(|(word, translation)| Self::new(category, word, translation))
            .collect()
    }
}

/// A quote stored in the inspirations collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Inspiration {
    /// Assigned by the backend on insert.
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: String,
}

/// An inspiration that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewInspiration {
    pub content: String,
    #[serde(default)]
    pub source: String,
}

impl NewInspiration {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
        }
    }

    pub fn with_id(self, id: String) -> Inspiration {
        Inspiration {
            id,
            content: self.content,
            source: self.source,
        }
    }
}

// translations are sometimes entered with escaped newlines,
// which are flattened for single line previews
pub fn display_text(text: &str) -> String {
    text.replace("\\n", " ")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn materialises_fields_in_order() {
        let pairs = WordPair::from_fields(Category::Primary, [("cat", "ねこ"), ("dog", "いぬ")]);
        assert_eq!(
            pairs,
            vec![
                WordPair::new(Category::Primary, "cat", "ねこ"),
                WordPair::new(Category::Primary, "dog", "いぬ"),
            ]
        );
    }

    #[test]
    fn materialises_empty_document() {
        let pairs = WordPair::from_fields(Category::Secondary, Vec::<(String, String)>::new());
        assert!(pairs.is_empty());
    }

    #[test]
    fn flattens_escaped_newlines() {
        assert_eq!(display_text(r"first\nsecond"), "first second");
        assert_eq!(display_text("real\nnewline"), "real\nnewline");
        assert_eq!(display_text(""), "");
    }

    #[test]
    fn decodes_inspiration_with_missing_fields() {
        let inspiration: Inspiration = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(inspiration.content, "");
        assert_eq!(inspiration.source, "");
    }

    #[test]
    fn serialises_category_lowercase() {
        let json = serde_json::to_string(&Category::Secondary).unwrap();
        assert_eq!(json, r#""secondary""#);
    }
}
