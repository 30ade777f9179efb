// cedict-cli: shared utilities for CLI tools.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use cedict_cards::PreferredWords;
use cedict_parse::{DictionaryIndex, load_cached};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Dictionary file names tried, in order, inside a search directory.
const DICT_FILE_NAMES: [&str; 2] = ["cedict_ts.u8", "cedict.txt"];

/// Environment variable naming a dictionary file or directory.
const DICT_PATH_ENV: &str = "CEDICT_PATH";

/// Environment variable selecting the log level.
const LOG_ENV: &str = "CEDICT_LOG";

// ---------------------------------------------------------------------------
// Dictionary discovery
// ---------------------------------------------------------------------------

/// Find the dictionary and load it through the process-wide cache.
///
/// Search order:
/// 1. `dict_path` argument (if provided)
/// 2. `CEDICT_PATH` environment variable
/// 3. `~/.cedict`
/// 4. `/usr/share/cedict`
/// 5. Current working directory
pub fn load_index(dict_path: Option<&str>) -> Result<Arc<DictionaryIndex>, String> {
    let path = find_dictionary(dict_path)?;
    load_cached(&path).map_err(|e| e.to_string())
}

/// Locate the dictionary file without loading it.
pub fn find_dictionary(dict_path: Option<&str>) -> Result<PathBuf, String> {
    let search_paths = build_search_paths(
        dict_path,
        std::env::var(DICT_PATH_ENV).ok().as_deref(),
        home_dir(),
    );

    search_paths
        .iter()
        .find_map(|p| dictionary_in(p))
        .ok_or_else(|| {
            format!(
                "could not find {} in any of the search paths:\n{}",
                DICT_FILE_NAMES.join(" or "),
                search_paths
                    .iter()
                    .map(|p| format!("  - {}", p.display()))
                    .collect::<Vec<_>>()
                    .join("\n")
            )
        })
}

/// A search path may name the dictionary file itself or a directory holding it.
fn dictionary_in(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if path.is_dir() {
        return DICT_FILE_NAMES
            .iter()
            .map(|name| path.join(name))
            .find(|candidate| candidate.is_file());
    }
    None
}

/// Build the list of files and directories to search.
fn build_search_paths(
    dict_path: Option<&str>,
    env_path: Option<&str>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = dict_path {
        paths.push(PathBuf::from(p));
    }
    if let Some(p) = env_path {
        paths.push(PathBuf::from(p));
    }
    if let Some(home) = home {
        paths.push(home.join(".cedict"));
    }
    paths.push(PathBuf::from("/usr/share/cedict"));

    // Fallback for local development
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    paths
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Read a JSON object of per-headword hints:
/// `{ "听": { "altWord": "聽", "pinyin": "ting1" } }`.
pub fn load_preferred_words(path: &Path) -> Result<PreferredWords, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid preferred words {}: {}", path.display(), e))
}

// ---------------------------------------------------------------------------
// Word lists
// ---------------------------------------------------------------------------

/// One requested word: a headword with optional alternate form and pinyin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRequest {
    pub headword: String,
    pub alt_word: Option<String>,
    pub pinyin: Option<String>,
}

/// Parse a word-list line `HEADWORD[\tALT_WORD[\tPINYIN]]`.
///
/// Blank lines and `#` comments yield `None`. Empty columns count as absent,
/// so `听\t\tting1` gives a pinyin hint without an alternate form.
pub fn parse_word_line(line: &str) -> Option<WordRequest> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() || line.starts_with('#') {
        return None;
    }

    let mut columns = line.split('\t').map(str::trim);
    let headword = columns.next()?.to_string();
    if headword.is_empty() {
        return None;
    }
    let mut optional = || {
        columns
            .next()
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    };
    let alt_word = optional();
    let pinyin = optional();

    Some(WordRequest {
        headword,
        alt_word,
        pinyin,
    })
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// Remove a `--name=VALUE`, `--name VALUE` or `-n VALUE` option from args.
///
/// Returns `(value, remaining_args)`. The last occurrence wins.
pub fn take_option(args: &[String], long: &str, short: Option<&str>) -> (Option<String>, Vec<String>) {
    let mut value = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;
    let prefix = format!("{long}=");

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || short == Some(arg.as_str()) {
            if i + 1 < args.len() {
                value = Some(args[i + 1].clone());
                skip_next = true;
            } else {
                fatal(&format!("{arg} requires a value"));
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (value, remaining)
}

/// Parse a `--dict-path=PATH` or `-d PATH` argument from command line args.
pub fn parse_dict_path(args: &[String]) -> (Option<String>, Vec<String>) {
    take_option(args, "--dict-path", Some("-d"))
}

/// Check whether any of `names` is present in the args.
pub fn has_flag(args: &[String], names: &[&str]) -> bool {
    args.iter().any(|a| names.contains(&a.as_str()))
}

/// Args that are not flags.
pub fn positional(args: &[String]) -> Vec<&str> {
    args.iter()
        .map(String::as_str)
        .filter(|a| !a.starts_with('-') || *a == "-")
        .collect()
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    has_flag(args, &["--help", "-h"])
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Install a stderr `tracing` subscriber. The filter comes from `CEDICT_LOG`
/// (`warn`, `debug`, `cedict_parse=trace`, ...); when it is unset the level
/// is `warn`, or `info` with `verbose`.
pub fn init_logging(verbose: bool) {
    let filter = log_filter(std::env::var(LOG_ENV).ok().as_deref(), verbose);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn log_filter(env_value: Option<&str>, verbose: bool) -> EnvFilter {
    let default = if verbose { LevelFilter::INFO } else { LevelFilter::WARN };
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(env_value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dict_path_short_and_long() {
        let (path, rest) = parse_dict_path(&args(&["-d", "/tmp/cedict", "词"]));
        assert_eq!(path.as_deref(), Some("/tmp/cedict"));
        assert_eq!(rest, args(&["词"]));

        let (path, rest) = parse_dict_path(&args(&["--dict-path=/x", "--json"]));
        assert_eq!(path.as_deref(), Some("/x"));
        assert_eq!(rest, args(&["--json"]));
    }

    #[test]
    fn option_absent() {
        let (value, rest) = take_option(&args(&["a", "b"]), "--preferred-words", None);
        assert_eq!(value, None);
        assert_eq!(rest, args(&["a", "b"]));
    }

    #[test]
    fn positional_skips_flags() {
        let a = args(&["--json", "words.txt", "-", "-v"]);
        assert_eq!(positional(&a), vec!["words.txt", "-"]);
        assert!(has_flag(&a, &["-v", "--verbose"]));
        assert!(!wants_help(&a));
    }

    #[test]
    fn word_line_columns() {
        assert_eq!(
            parse_word_line("听\t聽\tting1"),
            Some(WordRequest {
                headword: "听".into(),
                alt_word: Some("聽".into()),
                pinyin: Some("ting1".into()),
            })
        );
        assert_eq!(
            parse_word_line("年\t\tnian2\r\n"),
            Some(WordRequest {
                headword: "年".into(),
                alt_word: None,
                pinyin: Some("nian2".into()),
            })
        );
        let plain = parse_word_line("你好").unwrap();
        assert_eq!(plain.alt_word, None);
        assert_eq!(plain.pinyin, None);
    }

    #[test]
    fn word_line_blank_and_comment() {
        assert_eq!(parse_word_line(""), None);
        assert_eq!(parse_word_line("   "), None);
        assert_eq!(parse_word_line("# lesson 3"), None);
    }

    #[test]
    fn search_paths_order() {
        let paths = build_search_paths(Some("/a"), Some("/b"), Some(PathBuf::from("/home/u")));
        assert_eq!(paths[0], PathBuf::from("/a"));
        assert_eq!(paths[1], PathBuf::from("/b"));
        assert_eq!(paths[2], PathBuf::from("/home/u/.cedict"));
        assert_eq!(paths[3], PathBuf::from("/usr/share/cedict"));
    }

    #[test]
    fn dictionary_in_directory_prefers_cedict_ts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cedict.txt"), "").unwrap();
        assert_eq!(dictionary_in(dir.path()), Some(dir.path().join("cedict.txt")));
        std::fs::write(dir.path().join("cedict_ts.u8"), "").unwrap();
        assert_eq!(dictionary_in(dir.path()), Some(dir.path().join("cedict_ts.u8")));
    }

    #[test]
    fn dictionary_in_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(dictionary_in(dir.path()), None);
        assert_eq!(dictionary_in(&dir.path().join("nope.u8")), None);
    }

    #[test]
    fn preferred_words_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"听": {{"altWord": "聽"}}, "年": {{"pinyin": "nian2"}}}}"#).unwrap();
        let words = load_preferred_words(file.path()).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words["听"].alt_word.as_deref(), Some("聽"));
        assert_eq!(words["听"].pinyin, None);
        assert_eq!(words["年"].pinyin.as_deref(), Some("nian2"));
    }

    #[test]
    fn preferred_words_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        assert!(load_preferred_words(file.path()).is_err());
    }

    #[test]
    fn log_filter_selection() {
        let hint = |env: Option<&str>, verbose: bool| log_filter(env, verbose).max_level_hint();
        assert_eq!(hint(None, false), Some(LevelFilter::WARN));
        assert_eq!(hint(None, true), Some(LevelFilter::INFO));
        assert_eq!(hint(Some(""), false), Some(LevelFilter::WARN));
        assert_eq!(hint(Some("debug"), false), Some(LevelFilter::DEBUG));
        assert_eq!(hint(Some("trace"), true), Some(LevelFilter::TRACE));
    }
}
