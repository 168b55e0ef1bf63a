//! The write side of the app. Every write requires an unlocked [`AuthGate`].

use super::{dictionary::Dictionary, inspirations::Inspirations, preferences::Preferences};
use crate::{
    auth::AuthGate,
    backend::Backend,
    error::{TangoError, TangoResult},
    storage::LocalStorage,
};
use tango_core::{display_text, Category, Inspiration, NewInspiration, WordPair};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Word(WordPair),
    Inspiration(Inspiration),
}

impl DeleteTarget {
    /// Single-line text for the confirmation prompt.
    pub fn preview(&self) -> String {
        match self {
            Self::Word(pair) => format!(
                "{} - {}",
                display_text(&pair.word),
                display_text(&pair.translation)
            ),
            Self::Inspiration(inspiration) => display_text(&inspiration.content),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRequest {
    /// The user should be asked first, then [`Admin::confirm_delete`] called with their answer.
    NeedsConfirmation { preview: String },
    Deleted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confirmation {
    pub confirmed: bool,
    pub dont_show_again: bool,
}

pub struct Admin<B, S> {
    gate: AuthGate<B, S>,
    dictionary: Dictionary<B>,
    inspirations: Inspirations<B>,
    preferences: Preferences<S>,
}

impl<B, S> Admin<B, S>
where
    B: Backend + Clone,
    S: LocalStorage + Clone,
{
    pub fn new(backend: B, storage: S) -> Self {
        Self {
            gate: AuthGate::new(backend.clone(), storage.clone()),
            dictionary: Dictionary::new(backend.clone()),
            inspirations: Inspirations::new(backend),
            preferences: Preferences::new(storage),
        }
    }

    pub fn gate(&self) -> &AuthGate<B, S> {
        &self.gate
    }

    pub fn dictionary(&self) -> &Dictionary<B> {
        &self.dictionary
    }

    pub fn inspirations(&self) -> &Inspirations<B> {
        &self.inspirations
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.preferences
    }

    fn ensure_unlocked(&self) -> TangoResult<()> {
        if self.gate.is_authenticated() {
            Ok(())
        } else {
            tracing::warn!("Refusing write while locked");
            Err(TangoError::Locked)
        }
    }

    pub async fn add_word(
        &self,
        category: Category,
        word: &str,
        translation: &str,
    ) -> TangoResult<WordPair> {
        self.ensure_unlocked()?;
        self.dictionary.add_word(category, word, translation).await
    }

    pub async fn add_inspiration(&self, content: &str, source: &str) -> TangoResult<()> {
        self.ensure_unlocked()?;
        self.inspirations.add(content, source).await
    }

    pub async fn import_inspirations(&self, items: &[NewInspiration]) -> TangoResult<usize> {
        self.ensure_unlocked()?;
        self.inspirations.batch_import(items).await
    }

    pub async fn import_seed(&self) -> TangoResult<usize> {
        self.ensure_unlocked()?;
        self.inspirations.import_seed().await
    }

    /// Deletes the target right away if the user opted out of confirmations,
    /// otherwise returns the prompt to show.
    pub async fn request_delete(&self, target: &DeleteTarget) -> TangoResult<DeleteRequest> {
        self.ensure_unlocked()?;
        if self.preferences.skip_delete_confirmation() {
            self.delete(target).await?;
            Ok(DeleteRequest::Deleted)
        } else {
            Ok(DeleteRequest::NeedsConfirmation {
                preview: target.preview(),
            })
        }
    }

    /// Applies the user's answer to a confirmation prompt. Returns whether the target was deleted.
    pub async fn confirm_delete(
        &self,
        target: &DeleteTarget,
        confirmation: Confirmation,
    ) -> TangoResult<bool> {
        self.ensure_unlocked()?;
        if !confirmation.confirmed {
            tracing::debug!("Deletion cancelled");
            return Ok(false);
        }
        if confirmation.dont_show_again {
            self.preferences.set_skip_delete_confirmation(true);
        }
        self.delete(target).await?;
        Ok(true)
    }

    async fn delete(&self, target: &DeleteTarget) -> TangoResult<()> {
        match target {
            DeleteTarget::Word(pair) => self.dictionary.delete_word(pair).await,
            DeleteTarget::Inspiration(inspiration) => {
                self.inspirations.delete(&inspiration.id).await
            }
        }
    }
}
