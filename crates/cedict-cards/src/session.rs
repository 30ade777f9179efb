// FlashcardSession: top-level integration point for building a deck.
//
// Owns a Resolver (shared dictionary index + preferred-words table) and the
// notes produced so far. Each `add_word` resolves one headword and renders
// its note fields; the deck writer consumes `notes()` afterwards.

use std::sync::Arc;

use cedict_core::pinyin::ToneParseError;
use cedict_parse::DictionaryIndex;

use crate::note::NoteFields;
use crate::resolver::{PreferredWordHint, PreferredWords, ResolveError, Resolver};

/// Error type for adding a word to a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The headword could not be resolved to exactly one entry.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The resolved entry carries pinyin that cannot be rendered.
    #[error("failed to render pinyin: {0}")]
    Render(#[from] ToneParseError),
}

/// A deck under construction.
///
/// Words are added one at a time; failures leave the session unchanged so a
/// batch importer can skip or report the word and carry on.
#[derive(Debug, Clone)]
pub struct FlashcardSession {
    resolver: Resolver,
    notes: Vec<NoteFields>,
}

impl FlashcardSession {
    /// Create an empty session over a (usually cached) dictionary index.
    pub fn new(index: Arc<DictionaryIndex>) -> Self {
        Self {
            resolver: Resolver::new(index),
            notes: Vec::new(),
        }
    }

    /// Merge preferred-word hints into this session. Later hints win.
    pub fn add_preferred_words(
        &mut self,
        words: impl IntoIterator<Item = (String, PreferredWordHint)>,
    ) {
        self.resolver.add_preferred_words(words);
    }

    /// The active preferred-words table.
    pub fn preferred_words(&self) -> &PreferredWords {
        self.resolver.preferred_words()
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolve and render a word without adding it to the deck.
    pub fn render_word(
        &self,
        headword: &str,
        alt_word: Option<&str>,
        pinyin: Option<&str>,
    ) -> Result<NoteFields, SessionError> {
        let entry = self.resolver.resolve(headword, alt_word, pinyin)?;
        Ok(NoteFields::from_entry(entry)?)
    }

    /// Resolve, render and append a word. Returns the stored note.
    pub fn add_word(
        &mut self,
        headword: &str,
        alt_word: Option<&str>,
        pinyin: Option<&str>,
    ) -> Result<&NoteFields, SessionError> {
        let note = self.render_word(headword, alt_word, pinyin)?;
        self.notes.push(note);
        Ok(&self.notes[self.notes.len() - 1])
    }

    /// Notes in the order their words were added.
    pub fn notes(&self) -> &[NoteFields] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<NoteFields> {
        self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
