// cedict-lookup: List dictionary entries for headwords.
//
// Looks up each word given on the command line (or each line of stdin when
// no words are given) under both scripts and prints every entry:
//   聽 听 [tīng] /to listen/to hear/
//       CL: 个|個[gè]
//
// Usage:
//   cedict-lookup [-d DICT_PATH] [OPTIONS] [WORD...]
//
// Options:
//   -d, --dict-path PATH   Dictionary file or directory with cedict_ts.u8
//   -v, --verbose          Log dictionary loading to stderr
//   -h, --help             Print help

use std::io::{self, BufRead, Write};
use std::process;

use cedict_core::DictionaryEntry;
use cedict_core::pinyin::diacritic_pinyin;
use cedict_parse::DictionaryIndex;

/// Diacritic pinyin, or the raw numbered form if it cannot be converted.
fn readable_pinyin(pinyin: &str) -> String {
    diacritic_pinyin(pinyin).unwrap_or_else(|_| pinyin.to_string())
}

fn write_entry(out: &mut impl Write, entry: &DictionaryEntry) -> io::Result<()> {
    writeln!(
        out,
        "{} {} [{}] /{}/",
        entry.traditional,
        entry.simplified,
        readable_pinyin(&entry.pinyin),
        entry.definitions.join("/")
    )?;

    let classifiers = entry.classifier_list();
    if !classifiers.is_empty() {
        let rendered: Vec<String> = classifiers
            .iter()
            .map(|clf| {
                let pinyin = readable_pinyin(&clf.pinyin.to_lowercase());
                if clf.has_distinct_forms() {
                    format!("{}|{}[{pinyin}]", clf.simplified, clf.traditional)
                } else {
                    format!("{}[{pinyin}]", clf.simplified)
                }
            })
            .collect();
        writeln!(out, "    CL: {}", rendered.join(", "))?;
    }

    if let Some(taiwan) = &entry.taiwan_pinyin {
        writeln!(out, "    Taiwan: {}", readable_pinyin(taiwan))?;
    }
    Ok(())
}

/// Print all entries for one word. Returns false if there are none.
fn lookup_word(out: &mut impl Write, index: &DictionaryIndex, word: &str) -> io::Result<bool> {
    let entries = index.lookup(word);
    if entries.is_empty() {
        eprintln!("error: no entry for {word}");
        return Ok(false);
    }
    for entry in entries {
        write_entry(out, entry)?;
    }
    Ok(true)
}

/// Look up one word, exiting if stdout can no longer be written.
fn report_word(out: &mut impl Write, index: &DictionaryIndex, word: &str) -> bool {
    lookup_word(out, index, word)
        .unwrap_or_else(|e| cedict_cli::fatal(&format!("failed to write output: {e}")))
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = cedict_cli::parse_dict_path(&args);

    if cedict_cli::wants_help(&args) {
        println!("cedict-lookup: List dictionary entries for headwords.");
        println!();
        println!("Usage: cedict-lookup [-d DICT_PATH] [OPTIONS] [WORD...]");
        println!();
        println!("Words are read from stdin (one per line) when none are given.");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary file or directory with cedict_ts.u8");
        println!("  -v, --verbose          Log dictionary loading to stderr");
        println!("  -h, --help             Print this help");
        return;
    }

    cedict_cli::init_logging(cedict_cli::has_flag(&args, &["-v", "--verbose"]));
    let index = cedict_cli::load_index(dict_path.as_deref()).unwrap_or_else(|e| cedict_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut failed = false;

    let words = cedict_cli::positional(&args);
    if words.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    failed = true;
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            failed |= !report_word(&mut out, &index, word);
        }
    } else {
        for word in words {
            failed |= !report_word(&mut out, &index, word);
        }
    }

    if let Err(e) = out.flush() {
        cedict_cli::fatal(&format!("failed to write output: {e}"));
    }
    if failed {
        process::exit(1);
    }
}
