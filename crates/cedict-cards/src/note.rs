// Card note fields: the fixed-order tuple handed to the deck writer.

use cedict_core::DictionaryEntry;
use cedict_core::pinyin::ToneParseError;
use serde::Serialize;

use crate::pretty::{diacritic_pinyin, prettify_classifiers, prettify_definitions, prettify_pinyin};

/// Field names in note order, as used by the card templates.
pub const FIELD_NAMES: [&str; 7] = [
    "Simplified",
    "Traditional",
    "Pinyin",
    "Definitions",
    "Classifiers",
    "Taiwan Pinyin",
    "Traditional Differs",
];

/// Value of a set flag field. Unset flags are the empty string, which card
/// templates treat as false.
const FLAG_SET: &str = "y";

fn flag(set: bool) -> String {
    if set { FLAG_SET.to_string() } else { String::new() }
}

/// Rendered fields for one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteFields {
    #[serde(rename = "Simplified")]
    pub simplified: String,
    /// Empty when identical to the simplified form.
    #[serde(rename = "Traditional")]
    pub traditional: String,
    #[serde(rename = "Pinyin")]
    pub pinyin: String,
    #[serde(rename = "Definitions")]
    pub definitions: String,
    #[serde(rename = "Classifiers")]
    pub classifiers: String,
    #[serde(rename = "Taiwan Pinyin")]
    pub taiwan_pinyin: String,
    #[serde(rename = "Traditional Differs")]
    pub traditional_differs: String,
}

impl NoteFields {
    /// Render every field of a resolved entry.
    pub fn from_entry(entry: &DictionaryEntry) -> Result<Self, ToneParseError> {
        let differs = entry.has_distinct_forms();
        let taiwan_pinyin = match &entry.taiwan_pinyin {
            Some(p) => diacritic_pinyin(p)?,
            None => String::new(),
        };

        Ok(Self {
            simplified: entry.simplified.clone(),
            traditional: if differs {
                entry.traditional.clone()
            } else {
                String::new()
            },
            pinyin: prettify_pinyin(&entry.pinyin, false)?,
            definitions: prettify_definitions(&entry.definitions),
            classifiers: prettify_classifiers(entry.classifier_list(), true)?,
            taiwan_pinyin,
            traditional_differs: flag(differs),
        })
    }

    /// Fields in [`FIELD_NAMES`] order.
    pub fn into_fields(self) -> [String; 7] {
        [
            self.simplified,
            self.traditional,
            self.pinyin,
            self.definitions,
            self.classifiers,
            self.taiwan_pinyin,
            self.traditional_differs,
        ]
    }
}
