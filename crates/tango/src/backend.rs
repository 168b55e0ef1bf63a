//! The document store the app is backed by.
//!
//! Word pairs live in one document per category, keyed by word. Inspirations are one document
//! each in their own collection. The admin password digest lives in a single config record.

pub mod memory;

pub use memory::MemoryBackend;

use crate::error::TangoResult;
use futures_util::stream::BoxStream;
use std::future::Future;
use tango_core::{Category, Inspiration, NewInspiration, WordPair};

/// Provides the stored digest that submitted passwords are checked against.
pub trait CredentialSource {
    /// Fetches the hex-encoded digest. `None` if the config record is missing.
    fn auth_digest(&self) -> impl Future<Output = TangoResult<Option<String>>> + Send;
}

pub trait Backend: CredentialSource {
    /// Live decoded contents of a category's document.
    /// Emits the current contents on subscribe and again after every remote change.
    fn words(&self, category: Category) -> BoxStream<'static, TangoResult<Vec<WordPair>>>;

    /// Upserts a single `word -> translation` field into the pair's category document.
    fn add_word_pair(&self, pair: &WordPair) -> impl Future<Output = TangoResult<()>> + Send;

    /// Removes a single field from the pair's category document.
    fn delete_word_pair(&self, pair: &WordPair) -> impl Future<Output = TangoResult<()>> + Send;

    /// Live contents of the inspirations collection.
    fn inspirations(&self) -> BoxStream<'static, TangoResult<Vec<Inspiration>>>;

    fn add_inspiration(
        &self,
        inspiration: &NewInspiration,
    ) -> impl Future<Output = TangoResult<()>> + Send;

    fn delete_inspiration(&self, id: &str) -> impl Future<Output = TangoResult<()>> + Send;

    /// Inserts every item in one transaction. Either all of them are stored or none are.
    fn batch_import_inspirations(
        &self,
        inspirations: &[NewInspiration],
    ) -> impl Future<Output = TangoResult<()>> + Send;
}
