//! Inspirational quotes.

use super::required;
use crate::{backend::Backend, error::TangoResult, seed};
use futures_util::stream::BoxStream;
use tango_core::{Inspiration, NewInspiration};

pub struct Inspirations<B> {
    backend: B,
}

impl<B: Backend> Inspirations<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn list(&self) -> BoxStream<'static, TangoResult<Vec<Inspiration>>> {
        self.backend.inspirations()
    }

    /// Stores a quote. The content is required, the source may be left empty.
    pub async fn add(&self, content: &str, source: &str) -> TangoResult<()> {
        let inspiration = validate(&NewInspiration::new(content, source))?;
        tracing::info!("Adding inspiration from {:?}", inspiration.source);
        if let Err(err) = self.backend.add_inspiration(&inspiration).await {
            tracing::error!("Failed to add inspiration: {err}");
            return Err(err);
        }
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> TangoResult<()> {
        tracing::info!("Deleting inspiration {id}");
        if let Err(err) = self.backend.delete_inspiration(id).await {
            tracing::error!("Failed to delete inspiration {id}: {err}");
            return Err(err);
        }
        Ok(())
    }

    /// Stores every quote or none of them. All of them are validated before anything is sent.
    pub async fn batch_import(&self, inspirations: &[NewInspiration]) -> TangoResult<usize> {
        let inspirations = inspirations
            .iter()
            .map(validate)
            .collect::<TangoResult<Vec<_>>>()?;
        tracing::info!("Importing {} inspirations", inspirations.len());
        if let Err(err) = self.backend.batch_import_inspirations(&inspirations).await {
            tracing::error!("Failed to import inspirations: {err}");
            return Err(err);
        }
        Ok(inspirations.len())
    }

    /// Imports the quotes bundled with the app.
    pub async fn import_seed(&self) -> TangoResult<usize> {
        self.batch_import(&seed::inspirations()).await
    }
}

fn validate(inspiration: &NewInspiration) -> TangoResult<NewInspiration> {
    let content = required(&inspiration.content, "content")?;
    Ok(NewInspiration::new(content, inspiration.source.trim()))
}
