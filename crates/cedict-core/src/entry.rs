// Dictionary entry and classifier records.

/// A measure word attached to a dictionary entry (`CL:個|个[ge4]`).
///
/// When the annotation has no `|`, `traditional` and `simplified` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Classifier {
    pub traditional: String,
    pub simplified: String,
    /// Tone-numbered ASCII pinyin, e.g. `ge4`.
    pub pinyin: String,
}

impl Classifier {
    pub fn new(
        traditional: impl Into<String>,
        simplified: impl Into<String>,
        pinyin: impl Into<String>,
    ) -> Self {
        Self {
            traditional: traditional.into(),
            simplified: simplified.into(),
            pinyin: pinyin.into(),
        }
    }

    /// Whether the two scripts use different characters.
    pub fn has_distinct_forms(&self) -> bool {
        self.traditional != self.simplified
    }
}

/// One parsed CC-CEDICT line.
///
/// Entries are built once when a dictionary is loaded and never change
/// afterwards. `traditional` and `simplified` are non-empty and
/// `definitions` holds at least one sense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub traditional: String,
    pub simplified: String,
    /// Space-separated, tone-numbered ASCII syllables (`ni3 hao3`).
    pub pinyin: String,
    /// Pronunciation from a `Taiwan pr. [...]` sense, if the entry has one.
    pub taiwan_pinyin: Option<String>,
    /// Senses in file order, with `CL:` and `Taiwan pr.` items removed.
    pub definitions: Vec<String>,
    /// Classifiers from `CL:` senses, `None` if the entry lists none.
    pub classifiers: Option<Vec<Classifier>>,
}

impl DictionaryEntry {
    /// Whether the traditional and simplified headwords differ.
    pub fn has_distinct_forms(&self) -> bool {
        self.traditional != self.simplified
    }

    /// The headword keys this entry is indexed under: the traditional form,
    /// then the simplified form if it differs.
    pub fn headwords(&self) -> impl Iterator<Item = &str> {
        let simplified = self
            .has_distinct_forms()
            .then_some(self.simplified.as_str());
        std::iter::once(self.traditional.as_str()).chain(simplified)
    }

    /// Whether `{traditional, simplified}` equals `{a, b}` as an unordered set.
    pub fn has_forms(&self, a: &str, b: &str) -> bool {
        (self.traditional == a && self.simplified == b)
            || (self.traditional == b && self.simplified == a)
    }

    /// The first sense, which carries cross-reference markers such as
    /// `variant of ...`.
    pub fn first_definition(&self) -> Option<&str> {
        self.definitions.first().map(String::as_str)
    }

    /// Classifiers as a slice, empty when the entry has none.
    pub fn classifier_list(&self) -> &[Classifier] {
        self.classifiers.as_deref().unwrap_or(&[])
    }
}
