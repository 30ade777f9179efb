//! CC-CEDICT dictionary parsing and indexing.
//!
//! A CC-CEDICT source is line-oriented UTF-8 text. Every non-comment line has
//! the shape `TRADITIONAL SIMPLIFIED [PINYIN] /DEF1/DEF2/.../`; comment lines
//! start with `#`.
//!
//! # Architecture
//!
//! - [`classifier`] -- `TRAD|SIMP[PINYIN]` measure-word annotations
//! - [`definition`] -- Classification of individual `/`-delimited senses
//! - [`line`] -- Whole-line grammar producing a [`DictionaryEntry`]
//! - [`index`] -- Headword multi-map and the memoized file loader
//!
//! [`DictionaryEntry`]: cedict_core::DictionaryEntry

use std::path::PathBuf;

pub mod classifier;
pub mod definition;
pub mod index;
pub mod line;

pub use classifier::parse_classifier;
pub use index::{DictionaryIndex, load_cached};
pub use line::parse_line;

/// A line or annotation that does not match the CC-CEDICT grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictionaryParseError {
    #[error("malformed dictionary line: {0:?}")]
    MalformedLine(String),
    #[error("malformed classifier annotation: {0:?}")]
    MalformedClassifier(String),
    #[error("malformed Taiwan pronunciation: {0:?}")]
    MalformedTaiwanPinyin(String),
    #[error("dictionary line has no definitions: {0:?}")]
    NoDefinitions(String),
}

/// Failure to load a whole dictionary source. Any bad line aborts the load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read dictionary source: {0}")]
    Read(#[source] std::io::Error),
    #[error("line {line_number}: {source}")]
    Parse {
        line_number: usize,
        #[source]
        source: DictionaryParseError,
    },
}
