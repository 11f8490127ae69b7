use crate::style::{Hyphens, WordBreak};
use std::fmt;
use std::sync::Arc;

/// Splits a word into the parts it may be hyphenated between. Returning the
/// word unchanged as a single part disables hyphenation for it.
pub type HyphenationCallback = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

const DEFAULT_HYPHEN: &str = "-";

/// Options that steer segmentation and line breaking of paragraphs
#[derive(Clone, Default)]
pub struct LayoutOptions {
    pub word_break: WordBreak,
    pub hyphens: Hyphens,
    /// Replacement for the hyphen drawn at the end of a broken word. An empty
    /// string suppresses the hyphen entirely.
    pub hyphenate_character: Option<String>,
    /// Cost of breaking a line inside a word. Defaults to 100 for justified
    /// paragraphs and 600 otherwise.
    pub hyphenation_penalty: Option<f32>,
    /// Starting badness tolerance for the optimal line breaker
    pub tolerance: Option<f32>,
    pub hyphenation_callback: Option<HyphenationCallback>,
}

impl LayoutOptions {
    pub fn with_word_break(mut self, word_break: WordBreak) -> Self {
        self.word_break = word_break;
        self
    }

    pub fn with_hyphens(mut self, hyphens: Hyphens) -> Self {
        self.hyphens = hyphens;
        self
    }

    pub fn with_hyphenate_character<S: Into<String>>(mut self, character: S) -> Self {
        self.hyphenate_character = Some(character.into());
        self
    }

    pub fn with_hyphenation_penalty(mut self, penalty: f32) -> Self {
        self.hyphenation_penalty = Some(penalty);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_hyphenation_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        self.hyphenation_callback = Some(Arc::new(callback));
        self
    }

    /// The text appended to a line that ends inside a word, if any
    pub fn hyphen(&self) -> Option<&str> {
        if self.hyphens == Hyphens::None {
            return None;
        }

        match self.hyphenate_character.as_deref() {
            Some("") => None,
            Some(character) => Some(character),
            None => Some(DEFAULT_HYPHEN),
        }
    }

    /// Run the hyphenation callback over a word, or leave it whole when there
    /// is no callback
    pub fn hyphenate(&self, word: &str) -> Vec<String> {
        match &self.hyphenation_callback {
            Some(callback) => callback(word),
            None => vec![word.to_string()],
        }
    }
}

impl fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("word_break", &self.word_break)
            .field("hyphens", &self.hyphens)
            .field("hyphenate_character", &self.hyphenate_character)
            .field("hyphenation_penalty", &self.hyphenation_penalty)
            .field("tolerance", &self.tolerance)
            .field(
                "hyphenation_callback",
                &self.hyphenation_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}
