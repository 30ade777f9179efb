// Classification of the `/`-delimited senses of a CC-CEDICT line.
//
// Besides ordinary senses, the definition list carries two kinds of
// annotation that belong elsewhere in the entry:
//   CL:個|个[ge4],張|张[zhang1]   -- classifiers
//   Taiwan pr. [ji2]              -- Taiwan pronunciation
// Each sense is classified once; the line parser then partitions the results.

use cedict_core::Classifier;

use crate::DictionaryParseError;
use crate::classifier::parse_classifier_list;

const CLASSIFIER_PREFIX: &str = "CL:";
const TAIWAN_PREFIX: &str = "Taiwan pr. ";

/// One sense of a dictionary line after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionItem<'a> {
    /// An ordinary sense, kept verbatim.
    Plain(&'a str),
    /// A `CL:` annotation listing one or more classifiers.
    Classifiers(Vec<Classifier>),
    /// A `Taiwan pr. [...]` annotation, holding the bracketed pinyin.
    TaiwanPronunciation(&'a str),
}

/// Classify a single sense.
pub fn classify(sense: &str) -> Result<DefinitionItem<'_>, DictionaryParseError> {
    if let Some(list) = sense.strip_prefix(CLASSIFIER_PREFIX) {
        return Ok(DefinitionItem::Classifiers(parse_classifier_list(list)?));
    }
    if let Some(rest) = sense.strip_prefix(TAIWAN_PREFIX) {
        return bracketed(rest)
            .map(DefinitionItem::TaiwanPronunciation)
            .ok_or_else(|| DictionaryParseError::MalformedTaiwanPinyin(sense.to_string()));
    }
    Ok(DefinitionItem::Plain(sense))
}

/// Text between the first `[` and the `]` that follows it.
///
/// Some senses continue after the brackets (`Taiwan pr. [hou2], except ...`);
/// only the first bracketed pronunciation is taken.
fn bracketed(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once('[')?;
    let (inner, _) = rest.split_once(']')?;
    (!inner.trim().is_empty()).then_some(inner.trim())
}
