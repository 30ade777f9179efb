// Entry resolution: choose exactly one dictionary entry for a headword.
//
// A headword often maps to several entries (homographs, surnames, archaic
// readings, orthographic variants). The caller narrows the set with an
// alternate script form and/or an exact pinyin; a per-session table of
// preferred words pins those hints for headwords that come up repeatedly.
// Entries whose first sense only points at another headword are dropped
// when they compete with a canonical sense.

use std::fmt;
use std::sync::{Arc, LazyLock};

use cedict_core::DictionaryEntry;
use cedict_parse::DictionaryIndex;
use hashbrown::HashMap;
use regex::Regex;
use serde::Deserialize;

/// Cross-reference sense: `see 聽|听[ting1]`.
static SEE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^see [^ ]+\[[^\]]+\]").expect("reference pattern is valid"));

/// Per-headword override applied to every later lookup of that headword.
///
/// Decoded from `{ "altWord": "聽", "pinyin": "ting1" }`; both fields are
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferredWordHint {
    #[serde(default)]
    pub alt_word: Option<String>,
    #[serde(default)]
    pub pinyin: Option<String>,
}

impl PreferredWordHint {
    pub fn new(alt_word: Option<&str>, pinyin: Option<&str>) -> Self {
        Self {
            alt_word: alt_word.map(str::to_string),
            pinyin: pinyin.map(str::to_string),
        }
    }
}

/// Headword to override.
pub type PreferredWords = HashMap<String, PreferredWordHint>;

/// Which hints would narrow an ambiguous lookup further.
///
/// A hint is named when the caller did not supply it and the remaining
/// candidates actually differ in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingHints {
    pub alt_word: bool,
    pub pinyin: bool,
}

impl fmt::Display for MissingHints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.alt_word, self.pinyin) {
            (true, true) => f.write_str("supply altWord and/or pinyin"),
            (true, false) => f.write_str("supply altWord"),
            (false, true) => f.write_str("supply pinyin"),
            (false, false) => f.write_str("entries cannot be told apart by altWord or pinyin"),
        }
    }
}

/// Resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Two or more candidates survived filtering and variant suppression.
    #[error(
        "multiple entries for {headword:?} (altWord={alt_word:?}, pinyin={pinyin:?}): {}; {missing}",
        .candidates.join(", ")
    )]
    Ambiguous {
        headword: String,
        alt_word: Option<String>,
        pinyin: Option<String>,
        /// `TRAD SIMP [PINYIN]` of each remaining candidate.
        candidates: Vec<String>,
        missing: MissingHints,
    },

    /// No candidate matched the headword and filters.
    #[error("no entry for {headword:?} (altWord={alt_word:?}, pinyin={pinyin:?})")]
    NoMatch {
        headword: String,
        alt_word: Option<String>,
        pinyin: Option<String>,
    },
}

/// Whether an entry's first sense merely points at another headword
/// (`variant of ...`, `old variant of ...`, `see 聽|听[ting1]`).
pub fn is_variant_reference(entry: &DictionaryEntry) -> bool {
    entry.first_definition().is_some_and(|def| {
        def.starts_with("variant of")
            || def.starts_with("old variant of")
            || SEE_REFERENCE.is_match(def)
    })
}

fn summarize(entry: &DictionaryEntry) -> String {
    format!("{} {} [{}]", entry.traditional, entry.simplified, entry.pinyin)
}

fn missing_hints(
    candidates: &[&DictionaryEntry],
    alt_word: Option<&str>,
    pinyin: Option<&str>,
) -> MissingHints {
    let first = candidates[0];
    let forms_vary = candidates
        .iter()
        .any(|c| !c.has_forms(&first.traditional, &first.simplified));
    let pinyin_varies = candidates.iter().any(|c| c.pinyin != first.pinyin);
    MissingHints {
        alt_word: alt_word.is_none() && forms_vary,
        pinyin: pinyin.is_none() && pinyin_varies,
    }
}

/// Select the single entry for `headword`.
///
/// 1. A preferred-word hint for `headword` replaces `alt_word` and `pinyin`.
/// 2. Candidates are all entries indexed under `headword`.
/// 3. `alt_word` keeps candidates whose `{traditional, simplified}` equals
///    `{headword, alt_word}`; `pinyin` keeps exact pinyin matches.
/// 4. Only when more than one candidate remains, variant references are
///    dropped.
/// 5. Exactly one survivor is returned; otherwise the lookup fails.
pub fn resolve<'a>(
    index: &'a DictionaryIndex,
    headword: &str,
    alt_word: Option<&str>,
    pinyin: Option<&str>,
    preferred: &PreferredWords,
) -> Result<&'a DictionaryEntry, ResolveError> {
    let (alt_word, pinyin) = match preferred.get(headword) {
        Some(hint) => (hint.alt_word.as_deref(), hint.pinyin.as_deref()),
        None => (alt_word, pinyin),
    };

    let mut candidates: Vec<&DictionaryEntry> = index
        .lookup(headword)
        .into_iter()
        .filter(|c| alt_word.is_none_or(|alt| c.has_forms(headword, alt)))
        .filter(|c| pinyin.is_none_or(|p| c.pinyin == p))
        .collect();

    if candidates.len() > 1 {
        candidates.retain(|c| !is_variant_reference(c));
    }

    match candidates.as_slice() {
        [entry] => Ok(*entry),
        [] => Err(ResolveError::NoMatch {
            headword: headword.to_string(),
            alt_word: alt_word.map(str::to_string),
            pinyin: pinyin.map(str::to_string),
        }),
        _ => Err(ResolveError::Ambiguous {
            headword: headword.to_string(),
            alt_word: alt_word.map(str::to_string),
            pinyin: pinyin.map(str::to_string),
            candidates: candidates.iter().map(|c| summarize(c)).collect(),
            missing: missing_hints(&candidates, alt_word, pinyin),
        }),
    }
}

/// A shared index plus the session's preferred-words table.
///
/// `add_preferred_words` takes `&mut self` and `resolve` takes `&self`, so
/// writes to the table are serialized against lookups by the borrow checker.
#[derive(Debug, Clone)]
pub struct Resolver {
    index: Arc<DictionaryIndex>,
    preferred_words: PreferredWords,
}

impl Resolver {
    pub fn new(index: Arc<DictionaryIndex>) -> Self {
        Self {
            index,
            preferred_words: PreferredWords::new(),
        }
    }

    pub fn index(&self) -> &DictionaryIndex {
        &self.index
    }

    /// Overlay hints onto the table. Later hints replace earlier ones for
    /// the same headword.
    pub fn add_preferred_words(
        &mut self,
        words: impl IntoIterator<Item = (String, PreferredWordHint)>,
    ) {
        self.preferred_words.extend(words);
    }

    pub fn preferred_words(&self) -> &PreferredWords {
        &self.preferred_words
    }

    /// See [`resolve`].
    pub fn resolve(
        &self,
        headword: &str,
        alt_word: Option<&str>,
        pinyin: Option<&str>,
    ) -> Result<&DictionaryEntry, ResolveError> {
        resolve(
            &self.index,
            headword,
            alt_word,
            pinyin,
            &self.preferred_words,
        )
    }
}
