// Measure-word annotation parser.
//
// A `CL:` sense lists one or more annotations separated by commas:
//   CL:個|个[ge4],張|张[zhang1]
// Each annotation is `TRAD|SIMP[PINYIN]`, or `HANZI[PINYIN]` when both
// scripts share the character.

use cedict_core::Classifier;

use crate::DictionaryParseError;

/// Parse a single classifier annotation such as `個|个[ge4]` or `年[nian2]`.
pub fn parse_classifier(text: &str) -> Result<Classifier, DictionaryParseError> {
    let malformed = || DictionaryParseError::MalformedClassifier(text.to_string());

    let text = text.trim();
    let (hanzi, rest) = text.split_once('[').ok_or_else(malformed)?;
    let pinyin = rest.strip_suffix(']').ok_or_else(malformed)?;
    if pinyin.is_empty() || pinyin.contains(['[', ']']) || hanzi.contains(']') {
        return Err(malformed());
    }

    let (traditional, simplified) = match hanzi.split_once('|') {
        Some((trad, simp)) => (trad, simp),
        None => (hanzi, hanzi),
    };
    if traditional.is_empty() || simplified.is_empty() || simplified.contains('|') {
        return Err(malformed());
    }

    Ok(Classifier::new(traditional, simplified, pinyin))
}

/// Parse the body of a `CL:` sense (without the prefix) into its classifiers.
pub fn parse_classifier_list(text: &str) -> Result<Vec<Classifier>, DictionaryParseError> {
    text.split(',').map(parse_classifier).collect()
}
