//! Derives the visible card lists from the live word lists and the cards the user has hidden.
//!
//! Each output is recomputed from the latest value of its inputs whenever one of them changes:
//! - visible primary: primary words, hidden set
//! - visible secondary: secondary words, hidden set
//! - visible all: both of the above, primary first

use crate::{
    backend::Backend,
    error::TangoResult,
    reactive::{ReadState, State},
};
use futures_util::{Stream, StreamExt};
use std::{collections::BTreeSet, pin::pin};
use tango_core::{Category, WordPair};

pub type HiddenSet = BTreeSet<String>;

#[derive(Debug)]
pub struct ViewComposer {
    primary: State<Vec<WordPair>>,
    secondary: State<Vec<WordPair>>,
    hidden: State<HiddenSet>,
    visible_primary: State<Vec<WordPair>>,
    visible_secondary: State<Vec<WordPair>>,
    visible_all: State<Vec<WordPair>>,
}

#[derive(Debug, Clone, Copy)]
enum Input {
    Words(Category),
    Hidden,
}

impl Default for ViewComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewComposer {
    pub fn new() -> Self {
        Self {
            primary: State::default(),
            secondary: State::default(),
            hidden: State::default(),
            visible_primary: State::default(),
            visible_secondary: State::default(),
            visible_all: State::default(),
        }
    }

    /// Records the latest snapshot of a category and recomputes the lists depending on it.
    /// A failed snapshot counts as an empty list.
    pub fn set_words(&self, category: Category, snapshot: TangoResult<Vec<WordPair>>) {
        let words = snapshot.unwrap_or_else(|err| {
            tracing::warn!("Failed to load {category} words, showing none: {err}");
            Vec::new()
        });
        tracing::trace!("Received {} {category} words", words.len());
        self.words(category).set(words);
        self.recompute(Input::Words(category));
    }

    /// Hides every card whose word is `word`, in both categories.
    /// There is no way to unhide a card other than starting a new session.
    pub fn hide(&self, word: impl Into<String>) {
        let word = word.into();
        tracing::debug!("Hiding {word}");
        if self.hidden.update_if(|hidden| hidden.insert(word)) {
            self.recompute(Input::Hidden);
        }
    }

    pub fn hidden(&self) -> ReadState<HiddenSet> {
        self.hidden.reader()
    }

    pub fn visible_primary(&self) -> ReadState<Vec<WordPair>> {
        self.visible_primary.reader()
    }

    pub fn visible_secondary(&self) -> ReadState<Vec<WordPair>> {
        self.visible_secondary.reader()
    }

    pub fn visible_all(&self) -> ReadState<Vec<WordPair>> {
        self.visible_all.reader()
    }

    pub fn visible(&self, category: Category) -> ReadState<Vec<WordPair>> {
        match category {
            Category::Primary => self.visible_primary(),
            Category::Secondary => self.visible_secondary(),
        }
    }

    /// Feeds the composer from the two live word lists until both of them end.
    /// Snapshots are applied one at a time in arrival order.
    pub async fn run<P, S>(&self, primary: P, secondary: S)
    where
        P: Stream<Item = TangoResult<Vec<WordPair>>>,
        S: Stream<Item = TangoResult<Vec<WordPair>>>,
    {
        let primary = primary.map(|snapshot| (Category::Primary, snapshot));
        let secondary = secondary.map(|snapshot| (Category::Secondary, snapshot));
        let mut snapshots = pin!(futures_util::stream::select(primary, secondary));
        while let Some((category, snapshot)) = snapshots.next().await {
            self.set_words(category, snapshot);
        }
        tracing::debug!("Word subscriptions ended");
    }

    /// Subscribes to both categories on the backend and runs the composer on them.
    pub async fn bind<B: Backend>(&self, backend: &B) {
        self.run(
            backend.words(Category::Primary),
            backend.words(Category::Secondary),
        )
        .await
    }

    fn words(&self, category: Category) -> &State<Vec<WordPair>> {
        match category {
            Category::Primary => &self.primary,
            Category::Secondary => &self.secondary,
        }
    }

    fn visible_state(&self, category: Category) -> &State<Vec<WordPair>> {
        match category {
            Category::Primary => &self.visible_primary,
            Category::Secondary => &self.visible_secondary,
        }
    }

    fn recompute(&self, input: Input) {
        let categories: &[Category] = match input {
            Input::Words(Category::Primary) => &[Category::Primary],
            Input::Words(Category::Secondary) => &[Category::Secondary],
            Input::Hidden => &Category::ALL,
        };
        self.hidden.with(|hidden| {
            for &category in categories {
                let visible = self
                    .words(category)
                    .with(|words| filter_hidden(words, hidden));
                self.visible_state(category).set(visible);
            }
        });

        let mut all = self.visible_primary.get();
        self.visible_secondary
            .with(|secondary| all.extend_from_slice(secondary));
        self.visible_all.set(all);
    }
}

/// The words not in `hidden`, in their original order.
pub fn filter_hidden(words: &[WordPair], hidden: &HiddenSet) -> Vec<WordPair> {
    words
        .iter()
        .filter(|pair| !hidden.contains(&pair.word))
        .cloned()
        .collect()
}
