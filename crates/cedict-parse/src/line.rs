// Single-line CC-CEDICT grammar.
//
//   TRADITIONAL SIMPLIFIED [PINYIN] /DEF1/DEF2/.../
//
// Comment lines (`#...`) are filtered by the caller before reaching here.

use std::sync::LazyLock;

use cedict_core::DictionaryEntry;
use regex::Regex;

use crate::DictionaryParseError;
use crate::definition::{DefinitionItem, classify};

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?) (.+?) \[(.+?)\] /(.+)/$").expect("line pattern is valid")
});

/// Parse one dictionary line into an entry.
///
/// `CL:` senses become [`DictionaryEntry::classifiers`] (several `CL:` senses
/// are concatenated in order), a `Taiwan pr.` sense becomes
/// [`DictionaryEntry::taiwan_pinyin`] (the last one wins), and every other
/// sense is kept verbatim in file order.
pub fn parse_line(line: &str) -> Result<DictionaryEntry, DictionaryParseError> {
    let trimmed = line.trim();
    let caps = LINE_PATTERN
        .captures(trimmed)
        .ok_or_else(|| DictionaryParseError::MalformedLine(trimmed.to_string()))?;

    let mut definitions = Vec::new();
    let mut classifiers: Option<Vec<_>> = None;
    let mut taiwan_pinyin = None;

    for sense in caps[4].split('/') {
        match classify(sense)? {
            DefinitionItem::Plain(text) => definitions.push(text.to_string()),
            DefinitionItem::Classifiers(list) => {
                classifiers.get_or_insert_with(Vec::new).extend(list);
            }
            DefinitionItem::TaiwanPronunciation(pinyin) => {
                taiwan_pinyin = Some(pinyin.to_string());
            }
        }
    }

    if definitions.is_empty() {
        return Err(DictionaryParseError::NoDefinitions(trimmed.to_string()));
    }

    Ok(DictionaryEntry {
        traditional: caps[1].to_string(),
        simplified: caps[2].to_string(),
        pinyin: caps[3].to_string(),
        taiwan_pinyin,
        definitions,
        classifiers,
    })
}

/// Whether a source line is a comment (or blank) and carries no entry.
/// A leading byte-order mark must already be stripped.
pub fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.trim().is_empty()
}
