//! Shared types for CC-CEDICT flashcard generation.
//!
//! - [`entry`] -- Dictionary entry and classifier records
//! - [`pinyin`] -- Tone-number to diacritic transliteration and pinyin HTML

pub mod entry;
pub mod pinyin;

pub use entry::{Classifier, DictionaryEntry};
pub use pinyin::{Tone, ToneParseError};
