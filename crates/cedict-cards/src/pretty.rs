// HTML renderers for card fields.

use std::fmt::Write as _;

use cedict_core::Classifier;
use cedict_core::pinyin::ToneParseError;

pub use cedict_core::pinyin::{diacritic_pinyin, prettify_pinyin};

/// Render senses as an ordered list: `<ol><li>year</li></ol>`.
pub fn prettify_definitions<S: AsRef<str>>(definitions: &[S]) -> String {
    let mut out = String::from("<ol>");
    for def in definitions {
        let _ = write!(out, "<li>{}</li>", def.as_ref());
    }
    out.push_str("</ol>");
    out
}

/// Render classifiers as `個|个(<span class="tone4">gè</span>), ...`.
///
/// The `|SECOND` part is omitted when both scripts agree. `simplified_first`
/// prints the simplified character before the traditional one. Classifier
/// pinyin is lowercased before rendering.
pub fn prettify_classifiers(
    classifiers: &[Classifier],
    simplified_first: bool,
) -> Result<String, ToneParseError> {
    let mut parts = Vec::with_capacity(classifiers.len());
    for clf in classifiers {
        let (first, second) = if simplified_first {
            (&clf.simplified, &clf.traditional)
        } else {
            (&clf.traditional, &clf.simplified)
        };
        let pinyin = prettify_pinyin(&clf.pinyin, true)?;
        if first == second {
            parts.push(format!("{first}({pinyin})"));
        } else {
            parts.push(format!("{first}|{second}({pinyin})"));
        }
    }
    Ok(parts.join(", "))
}
