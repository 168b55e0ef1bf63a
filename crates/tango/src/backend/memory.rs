//! In-process document store.

use super::{Backend, CredentialSource};
use crate::{
    config::Config,
    error::{TangoError, TangoResult},
    reactive::State,
};
use futures_util::{stream::BoxStream, StreamExt};
use rand::{distr::Alphanumeric, Rng};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tango_core::{Category, Inspiration, NewInspiration, WordPair};

/// Field name -> value. Fields enumerate in sorted order.
type Document = BTreeMap<String, String>;
/// Document id -> inspiration.
type Collection = BTreeMap<String, NewInspiration>;

const ID_LENGTH: usize = 20;
const DIGEST_FIELD: &str = "digest";

/// A document store kept in memory, with live subscriptions.
/// Clones share the same store.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    config: Config,
    /// Keyed by `collection/document` path. `None` means the document does not exist.
    documents: HashMap<String, State<Option<Document>>>,
    /// Keyed by collection name.
    collections: HashMap<String, State<Collection>>,
    offline: AtomicBool,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl MemoryBackend {
    pub fn new(config: Config) -> Self {
        let documents = Category::ALL
            .into_iter()
            .map(|category| config.document_path(category))
            .chain([config.auth_document.clone()])
            .map(|path| (path, State::new(None)))
            .collect();
        let collections = HashMap::from([(
            config.inspirations_collection.clone(),
            State::default(),
        )]);
        Self {
            inner: Arc::new(Inner {
                config,
                documents,
                collections,
                offline: AtomicBool::new(false),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// While offline, every write and digest fetch fails and new subscriptions error out.
    pub fn set_offline(&self, offline: bool) {
        tracing::info!("Backend offline: {offline}");
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    /// Replaces a category document wholesale.
    pub fn set_document<I, K, V>(&self, category: Category, fields: I) -> TangoResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let document = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.category_document(category)?.set(Some(document));
        Ok(())
    }

    pub fn remove_document(&self, category: Category) -> TangoResult<()> {
        self.category_document(category)?.set(None);
        Ok(())
    }

    /// Stores the admin password digest, or removes the config record with `None`.
    pub fn set_auth_digest(&self, digest: Option<&str>) {
        let record = digest.map(|digest| Document::from([(DIGEST_FIELD.to_string(), digest.to_string())]));
        if let Some(document) = self.inner.documents.get(&self.inner.config.auth_document) {
            document.set(record);
        }
    }

    /// Paths of the existing documents in `collection`, sorted.
    pub fn document_paths(&self, collection: &str) -> Vec<String> {
        let mut paths = self
            .inner
            .documents
            .iter()
            .filter(|(path, document)| {
                path.split_once('/')
                    .is_some_and(|(prefix, _)| prefix == collection)
                    && document.with(Option::is_some)
            })
            .map(|(path, _)| path.clone())
            .collect::<Vec<_>>();
        if let Some(documents) = self.inner.collections.get(collection) {
            documents.with(|documents| {
                paths.extend(documents.keys().map(|id| format!("{collection}/{id}")))
            });
        }
        paths.sort();
        paths
    }

    fn inspirations_collection(&self) -> TangoResult<&State<Collection>> {
        let name = &self.inner.config.inspirations_collection;
        self.inner
            .collections
            .get(name)
            .ok_or_else(|| TangoError::NotFound(name.clone()))
    }

    fn document(&self, path: &str) -> TangoResult<&State<Option<Document>>> {
        self.inner
            .documents
            .get(path)
            .ok_or_else(|| TangoError::NotFound(path.to_string()))
    }

    fn category_document(&self, category: Category) -> TangoResult<&State<Option<Document>>> {
        self.document(&self.inner.config.document_path(category))
    }

    fn check_online(&self) -> TangoResult<()> {
        if self.inner.offline.load(Ordering::SeqCst) {
            Err(TangoError::network("backend unreachable"))
        } else {
            Ok(())
        }
    }

    fn generate_id(existing: &Collection) -> String {
        loop {
            let id = rand::rng()
                .sample_iter(&Alphanumeric)
                .take(ID_LENGTH)
                .map(char::from)
                .collect::<String>();
            if !existing.contains_key(&id) {
                return id;
            }
        }
    }
}

impl CredentialSource for MemoryBackend {
    async fn auth_digest(&self) -> TangoResult<Option<String>> {
        self.check_online()?;
        let document = self.document(&self.inner.config.auth_document)?;
        let digest = document.with(|record| {
            record
                .as_ref()
                .and_then(|fields| fields.get(DIGEST_FIELD).cloned())
        });
        Ok(digest)
    }
}

impl Backend for MemoryBackend {
    fn words(&self, category: Category) -> BoxStream<'static, TangoResult<Vec<WordPair>>> {
        let document = self
            .check_online()
            .and_then(|_| self.category_document(category));
        match document {
            Ok(document) => document
                .stream()
                .map(move |fields| Ok(WordPair::from_fields(category, fields.unwrap_or_default())))
                .boxed(),
            Err(err) => futures_util::stream::iter([Err(err)]).boxed(),
        }
    }

    async fn add_word_pair(&self, pair: &WordPair) -> TangoResult<()> {
        self.check_online()?;
        tracing::debug!("Upserting {} into {}", pair.word, pair.category);
        self.category_document(pair.category)?.update(|document| {
            document
                .get_or_insert_with(Document::new)
                .insert(pair.word.clone(), pair.translation.clone());
        });
        Ok(())
    }

    async fn delete_word_pair(&self, pair: &WordPair) -> TangoResult<()> {
        self.check_online()?;
        let document = self.category_document(pair.category)?;
        if document.with(Option::is_none) {
            return Err(TangoError::NotFound(
                self.inner.config.document_path(pair.category),
            ));
        }
        tracing::debug!("Removing {} from {}", pair.word, pair.category);
        document.update_if(|document| {
            document
                .as_mut()
                .map(|fields| fields.remove(&pair.word).is_some())
                .unwrap_or_default()
        });
        Ok(())
    }

    fn inspirations(&self) -> BoxStream<'static, TangoResult<Vec<Inspiration>>> {
        let collection = self
            .check_online()
            .and_then(|_| self.inspirations_collection());
        match collection {
            Ok(collection) => collection
                .stream()
                .map(|collection| {
                    Ok(collection
                        .into_iter()
                        .map(|(id, inspiration)| inspiration.with_id(id))
                        .collect())
                })
                .boxed(),
            Err(err) => futures_util::stream::iter([Err(err)]).boxed(),
        }
    }

    async fn add_inspiration(&self, inspiration: &NewInspiration) -> TangoResult<()> {
        self.batch_import_inspirations(std::slice::from_ref(inspiration))
            .await
    }

    async fn delete_inspiration(&self, id: &str) -> TangoResult<()> {
        self.check_online()?;
        tracing::debug!("Removing {}", self.inner.config.inspiration_path(id));
        self.inspirations_collection()?
            .update_if(|collection| collection.remove(id).is_some());
        Ok(())
    }

    async fn batch_import_inspirations(&self, inspirations: &[NewInspiration]) -> TangoResult<()> {
        self.check_online()?;
        self.inspirations_collection()?.update(|collection| {
            for inspiration in inspirations {
                let id = Self::generate_id(collection);
                tracing::debug!("Inserting {}", self.inner.config.inspiration_path(&id));
                collection.insert(id, inspiration.clone());
            }
        });
        Ok(())
    }
}
