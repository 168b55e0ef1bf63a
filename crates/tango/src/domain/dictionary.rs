//! Word pairs in the two category documents.

use super::required;
use crate::{backend::Backend, error::TangoResult};
use futures_util::stream::BoxStream;
use tango_core::{Category, WordPair};

pub struct Dictionary<B> {
    backend: B,
}

impl<B: Backend> Dictionary<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn words(&self, category: Category) -> BoxStream<'static, TangoResult<Vec<WordPair>>> {
        self.backend.words(category)
    }

    /// Stores a new pair, or replaces the translation if the word already exists in the category.
    /// Both fields are trimmed and must not be empty.
    pub async fn add_word(
        &self,
        category: Category,
        word: &str,
        translation: &str,
    ) -> TangoResult<WordPair> {
        let word = required(word, "word")?;
        let translation = required(translation, "translation")?;
        let pair = WordPair::new(category, word, translation);

        tracing::info!("Adding {} to {category}", pair.word);
        if let Err(err) = self.backend.add_word_pair(&pair).await {
            tracing::error!("Failed to add {}: {err}", pair.word);
            return Err(err);
        }
        Ok(pair)
    }

    pub async fn delete_word(&self, pair: &WordPair) -> TangoResult<()> {
        tracing::info!("Deleting {} from {}", pair.word, pair.category);
        if let Err(err) = self.backend.delete_word_pair(pair).await {
            tracing::error!("Failed to delete {}: {err}", pair.word);
            return Err(err);
        }
        Ok(())
    }
}
