// Headword index over a parsed CC-CEDICT source.
//
// Every entry is reachable under its traditional and its simplified headword
// (once when the two are equal). Entries sharing a headword keep file order.
//
// Loading the full dictionary (~120k lines) is the one expensive operation,
// so `load_cached` memoizes it per path for the lifetime of the process.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use cedict_core::DictionaryEntry;
use hashbrown::HashMap;
use tracing::{debug, info};

use crate::LoadError;
use crate::line::{is_comment, parse_line};

/// Multi-map from headword (either script) to entries, in file order.
#[derive(Debug, Default)]
pub struct DictionaryIndex {
    /// All entries in file order. Index positions are entry ids.
    entries: Vec<DictionaryEntry>,
    /// Headword to entry ids, in insertion order.
    by_headword: HashMap<String, Vec<usize>>,
}

impl DictionaryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry under each of its headwords.
    pub fn insert(&mut self, entry: DictionaryEntry) {
        let id = self.entries.len();
        for headword in entry.headwords() {
            match self.by_headword.get_mut(headword) {
                Some(ids) => ids.push(id),
                None => {
                    self.by_headword.insert(headword.to_string(), vec![id]);
                }
            }
        }
        self.entries.push(entry);
    }

    /// Parse a whole dictionary held in memory.
    pub fn parse_str(text: &str) -> Result<Self, LoadError> {
        let mut index = Self::new();
        for (idx, line) in text.lines().enumerate() {
            index.add_line(idx + 1, line)?;
        }
        Ok(index)
    }

    /// Parse a dictionary from any buffered reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, LoadError> {
        let mut index = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(LoadError::Read)?;
            index.add_line(idx + 1, &line)?;
        }
        Ok(index)
    }

    /// Read and parse a dictionary file. See [`load_cached`] for the
    /// memoized variant.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let io_error = |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let mut index = Self::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(io_error)?;
            index.add_line(idx + 1, &line)?;
        }

        info!(
            "Loaded dictionary {}: {} entries, {} headwords",
            path.display(),
            index.len(),
            index.headword_count()
        );
        Ok(index)
    }

    fn add_line(&mut self, line_number: usize, line: &str) -> Result<(), LoadError> {
        // A byte-order mark may precede the first line.
        let line = line.trim_start_matches('\u{feff}');
        if is_comment(line) {
            return Ok(());
        }
        let entry = parse_line(line).map_err(|source| LoadError::Parse {
            line_number,
            source,
        })?;
        self.insert(entry);
        Ok(())
    }

    /// All entries indexed under `headword`, in file order. Unknown
    /// headwords give an empty list.
    pub fn lookup(&self, headword: &str) -> Vec<&DictionaryEntry> {
        self.by_headword
            .get(headword)
            .map(|ids| ids.iter().map(|&id| &self.entries[id]).collect())
            .unwrap_or_default()
    }

    /// Whether any entry is indexed under `headword`.
    pub fn contains(&self, headword: &str) -> bool {
        self.by_headword.contains_key(headword)
    }

    /// Number of entries (not headwords).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct headword keys.
    pub fn headword_count(&self) -> usize {
        self.by_headword.len()
    }

    /// Iterate over all entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Process-wide memoization
// ---------------------------------------------------------------------------

/// One slot per source path. The outer map lock is only held to find the
/// slot; the slot lock is held across the load so concurrent callers for
/// the same path wait for a single parse.
type Slot = Arc<Mutex<Option<Arc<DictionaryIndex>>>>;

static CACHE: LazyLock<Mutex<HashMap<PathBuf, Slot>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Load a dictionary file once per process and share the result.
///
/// Paths are keyed by their canonical form, so `./cedict.u8` and an absolute
/// path to the same file share one index. Failed loads are not cached.
pub fn load_cached(path: impl AsRef<Path>) -> Result<Arc<DictionaryIndex>, LoadError> {
    let path = path.as_ref();
    let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    let slot = {
        let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(key).or_default())
    };

    let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(index) = guard.as_ref() {
        debug!("Dictionary cache hit: {}", path.display());
        return Ok(Arc::clone(index));
    }

    let index = Arc::new(DictionaryIndex::load(path)?);
    *guard = Some(Arc::clone(&index));
    Ok(index)
}
