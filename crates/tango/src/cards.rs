use tango_core::WordPair;

/// A word pair shown one side at a time. Flipping is local and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pair: WordPair,
    flipped: bool,
}

impl Flashcard {
    pub fn new(pair: WordPair) -> Self {
        Self {
            pair,
            flipped: false,
        }
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// The word, or the translation once flipped.
    pub fn face(&self) -> &str {
        if self.flipped {
            &self.pair.translation
        } else {
            &self.pair.word
        }
    }

    pub fn pair(&self) -> &WordPair {
        &self.pair
    }
}

impl From<WordPair> for Flashcard {
    fn from(pair: WordPair) -> Self {
        Self::new(pair)
    }
}
