// WASM bindings for CC-CEDICT lookup and pinyin rendering.
//
// Card templates call the free functions to colour pinyin in the browser;
// the `WasmDictionary` class wraps an in-memory index plus a preferred-words
// table. Entries and notes are serialized to JavaScript values using
// serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   prettifyPinyin("ni3 hao3", false); // => '<span class="tone3">nǐ</span> ...'
//   diacriticPinyin("lu:4 cha2");      // => "lǜ chá"
//   diacriticSyllable("ting1");        // => "tīng"
//
//   const dict = new WasmDictionary(cedictText);
//   dict.lookup("听");                  // => [{ traditional: "聽", ... }, ...]
//   dict.addPreferredWords({ "听": { altWord: "聽" } });
//   dict.resolve("听");                 // => { traditional: "聽", ... }
//   dict.noteFields("听");              // => { Simplified: "听", Pinyin: ... }

use std::sync::Arc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use cedict_cards::{FIELD_NAMES, NoteFields, PreferredWords, Resolver};
use cedict_core::pinyin;
use cedict_core::{Classifier, DictionaryEntry};
use cedict_parse::DictionaryIndex;

// ============================================================================
// Serde-serializable DTO types for JS interop
// ============================================================================

#[derive(Debug, Serialize, PartialEq)]
struct JsClassifier {
    traditional: String,
    simplified: String,
    pinyin: String,
}

/// Serializable representation of a dictionary entry.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct JsEntry {
    traditional: String,
    simplified: String,
    pinyin: String,
    taiwan_pinyin: Option<String>,
    definitions: Vec<String>,
    classifiers: Vec<JsClassifier>,
}

// ============================================================================
// Conversion helpers
// ============================================================================

fn classifier_to_js(clf: &Classifier) -> JsClassifier {
    JsClassifier {
        traditional: clf.traditional.clone(),
        simplified: clf.simplified.clone(),
        pinyin: clf.pinyin.clone(),
    }
}

fn entry_to_js(entry: &DictionaryEntry) -> JsEntry {
    JsEntry {
        traditional: entry.traditional.clone(),
        simplified: entry.simplified.clone(),
        pinyin: entry.pinyin.clone(),
        taiwan_pinyin: entry.taiwan_pinyin.clone(),
        definitions: entry.definitions.clone(),
        classifiers: entry.classifier_list().iter().map(classifier_to_js).collect(),
    }
}

fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

// ============================================================================
// Pinyin
// ============================================================================

/// Wrap each syllable of a numbered pinyin phrase in a tone-class span.
#[wasm_bindgen(js_name = "prettifyPinyin")]
pub fn prettify_pinyin(text: &str, lowercase: bool) -> Result<String, JsError> {
    pinyin::prettify_pinyin(text, lowercase).map_err(to_js_error)
}

/// Convert a numbered pinyin phrase to tone marks without markup.
#[wasm_bindgen(js_name = "diacriticPinyin")]
pub fn diacritic_pinyin(text: &str) -> Result<String, JsError> {
    pinyin::diacritic_pinyin(text).map_err(to_js_error)
}

/// Convert a single numbered syllable (`ting1`, `lu:4`) to tone marks.
#[wasm_bindgen(js_name = "diacriticSyllable")]
pub fn diacritic_syllable(syllable: &str) -> Result<String, JsError> {
    pinyin::diacritic_syllable(syllable).map_err(to_js_error)
}

/// Note field names in template order.
#[wasm_bindgen(js_name = "noteFieldNames")]
pub fn note_field_names() -> Vec<String> {
    FIELD_NAMES.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// WasmDictionary
// ============================================================================

/// An in-memory CC-CEDICT index with entry resolution.
#[wasm_bindgen]
pub struct WasmDictionary {
    resolver: Resolver,
}

#[wasm_bindgen]
impl WasmDictionary {
    /// Parse the full text of a CC-CEDICT file.
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str) -> Result<WasmDictionary, JsError> {
        let index = DictionaryIndex::parse_str(text).map_err(to_js_error)?;
        Ok(WasmDictionary {
            resolver: Resolver::new(Arc::new(index)),
        })
    }

    /// Number of entries in the dictionary.
    #[wasm_bindgen(getter, js_name = "entryCount")]
    pub fn entry_count(&self) -> usize {
        self.resolver.index().len()
    }

    /// Every entry indexed under `word`, in file order.
    pub fn lookup(&self, word: &str) -> Result<JsValue, JsError> {
        let entries: Vec<JsEntry> = self
            .resolver
            .index()
            .lookup(word)
            .into_iter()
            .map(entry_to_js)
            .collect();
        to_js_value(&entries)
    }

    /// Merge `{ headword: { altWord?, pinyin? } }` hints into the table.
    #[wasm_bindgen(js_name = "addPreferredWords")]
    pub fn add_preferred_words(&mut self, words: JsValue) -> Result<(), JsError> {
        let words: PreferredWords = serde_wasm_bindgen::from_value(words).map_err(to_js_error)?;
        self.resolver.add_preferred_words(words);
        Ok(())
    }

    /// Resolve `headword` to exactly one entry.
    ///
    /// Throws when the headword is unknown or the hints leave more than one
    /// candidate; the message names the hints that would help.
    pub fn resolve(
        &self,
        headword: &str,
        alt_word: Option<String>,
        pinyin: Option<String>,
    ) -> Result<JsValue, JsError> {
        let entry = self
            .resolver
            .resolve(headword, alt_word.as_deref(), pinyin.as_deref())
            .map_err(to_js_error)?;
        to_js_value(&entry_to_js(entry))
    }

    /// Resolve `headword` and render its note fields.
    #[wasm_bindgen(js_name = "noteFields")]
    pub fn note_fields(
        &self,
        headword: &str,
        alt_word: Option<String>,
        pinyin: Option<String>,
    ) -> Result<JsValue, JsError> {
        let entry = self
            .resolver
            .resolve(headword, alt_word.as_deref(), pinyin.as_deref())
            .map_err(to_js_error)?;
        let note = NoteFields::from_entry(entry).map_err(to_js_error)?;
        to_js_value(&note)
    }
}

#[cfg(test)]
mod tests {
    use cedict_parse::parse_line;

    use super::*;

    #[test]
    fn entry_dto_copies_all_fields() {
        let entry =
            parse_line("書 书 [shu1] /book/CL:本[ben3],冊|册[ce4]/Taiwan pr. [shu1]/").unwrap();
        let js = entry_to_js(&entry);
        assert_eq!(js.traditional, "書");
        assert_eq!(js.simplified, "书");
        assert_eq!(js.pinyin, "shu1");
        assert_eq!(js.taiwan_pinyin.as_deref(), Some("shu1"));
        assert_eq!(js.definitions, vec!["book"]);
        assert_eq!(
            js.classifiers,
            vec![
                JsClassifier {
                    traditional: "本".into(),
                    simplified: "本".into(),
                    pinyin: "ben3".into(),
                },
                JsClassifier {
                    traditional: "冊".into(),
                    simplified: "册".into(),
                    pinyin: "ce4".into(),
                },
            ]
        );
    }

    #[test]
    fn entry_dto_without_classifiers() {
        let entry = parse_line("你好 你好 [ni3 hao3] /hello/hi/").unwrap();
        let js = entry_to_js(&entry);
        assert!(js.classifiers.is_empty());
        assert_eq!(js.taiwan_pinyin, None);
    }

    #[test]
    fn field_names_in_template_order() {
        let names = note_field_names();
        assert_eq!(names.first().map(String::as_str), Some("Simplified"));
        assert_eq!(names.last().map(String::as_str), Some("Traditional Differs"));
    }

    #[test]
    fn dictionary_counts_entries() {
        let Ok(dict) = WasmDictionary::new("年 年 [nian2] /year/\n聽 听 [ting1] /to listen/\n") else {
            panic!("sample dictionary should parse");
        };
        assert_eq!(dict.entry_count(), 2);
    }
}
