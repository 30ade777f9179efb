// cedict-notes: Render flashcard notes for a list of words.
//
// Reads a word list (one headword per line, optionally followed by a
// tab-separated alternate form and pinyin) and prints one note per word.
// Fields follow the card template order:
//   Simplified, Traditional, Pinyin, Definitions, Classifiers,
//   Taiwan Pinyin, Traditional Differs
//
// Usage:
//   cedict-notes [-d DICT_PATH] [OPTIONS] WORDSFILE
//
// Options:
//   -d, --dict-path PATH       Dictionary file or directory with cedict_ts.u8
//   --preferred-words FILE     JSON object of per-headword altWord/pinyin hints
//   --json                     Print JSON lines instead of tab-separated fields
//   --header                   Print the field names as the first TSV line
//   -v, --verbose              Log dictionary loading to stderr
//   -h, --help                 Print help

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use cedict_cards::{FIELD_NAMES, FlashcardSession};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = cedict_cli::parse_dict_path(&args);
    let (preferred_path, args) = cedict_cli::take_option(&args, "--preferred-words", None);

    if cedict_cli::wants_help(&args) {
        println!("cedict-notes: Render flashcard notes for a list of words.");
        println!();
        println!("Usage: cedict-notes [-d DICT_PATH] [OPTIONS] WORDSFILE");
        println!();
        println!("WORDSFILE has one word per line: HEADWORD[<TAB>ALT_WORD[<TAB>PINYIN]].");
        println!("Use - to read the list from stdin.");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH       Dictionary file or directory with cedict_ts.u8");
        println!("  --preferred-words FILE     JSON object of per-headword altWord/pinyin hints");
        println!("  --json                     Print JSON lines instead of tab-separated fields");
        println!("  --header                   Print the field names as the first TSV line");
        println!("  -v, --verbose              Log dictionary loading to stderr");
        println!("  -h, --help                 Print this help");
        return;
    }

    let json = cedict_cli::has_flag(&args, &["--json"]);
    let header = cedict_cli::has_flag(&args, &["--header"]);
    cedict_cli::init_logging(cedict_cli::has_flag(&args, &["-v", "--verbose"]));

    let words_file = match cedict_cli::positional(&args).as_slice() {
        [file] => file.to_string(),
        [] => cedict_cli::fatal("missing WORDSFILE (see --help)"),
        _ => cedict_cli::fatal("expected exactly one WORDSFILE"),
    };

    let index = cedict_cli::load_index(dict_path.as_deref()).unwrap_or_else(|e| cedict_cli::fatal(&e));
    let mut session = FlashcardSession::new(index);

    if let Some(path) = preferred_path {
        let words = cedict_cli::load_preferred_words(Path::new(&path))
            .unwrap_or_else(|e| cedict_cli::fatal(&e));
        session.add_preferred_words(words);
    }

    let reader: Box<dyn BufRead> = if words_file == "-" {
        Box::new(io::stdin().lock())
    } else {
        match std::fs::File::open(&words_file) {
            Ok(f) => Box::new(io::BufReader::new(f)),
            Err(e) => cedict_cli::fatal(&format!("failed to read {words_file}: {e}")),
        }
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if header && !json {
        let _ = writeln!(out, "{}", FIELD_NAMES.join("\t"));
    }

    let mut failed = false;
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading {words_file}: {e}");
                failed = true;
                break;
            }
        };
        let Some(request) = cedict_cli::parse_word_line(&line) else {
            continue;
        };

        match session.add_word(
            &request.headword,
            request.alt_word.as_deref(),
            request.pinyin.as_deref(),
        ) {
            Ok(note) if json => match serde_json::to_string(note) {
                Ok(s) => {
                    let _ = writeln!(out, "{s}");
                }
                Err(e) => {
                    eprintln!("error: {}: {e}", request.headword);
                    failed = true;
                }
            },
            Ok(note) => {
                let _ = writeln!(out, "{}", note.clone().into_fields().join("\t"));
            }
            Err(e) => {
                eprintln!("error: {}: {e}", request.headword);
                failed = true;
            }
        }
    }

    let _ = out.flush();
    if failed {
        process::exit(1);
    }
}
