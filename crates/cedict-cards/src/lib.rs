//! Chinese flashcard building blocks on top of a CC-CEDICT index.
//!
//! - [`resolver`] -- Pick one entry per headword from hints and preferred words
//! - [`pretty`] -- HTML renderers for pinyin, definitions and classifiers
//! - [`note`] -- The fixed-order note field tuple consumed by deck writers
//! - [`session`] -- A deck under construction: preferred words + rendered notes

pub mod note;
pub mod pretty;
pub mod resolver;
pub mod session;

pub use note::{FIELD_NAMES, NoteFields};
pub use resolver::{PreferredWordHint, PreferredWords, ResolveError, Resolver, resolve};
pub use session::{FlashcardSession, SessionError};
