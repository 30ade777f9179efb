// cedict-pinyin: Convert numbered pinyin from stdin.
//
// Reads lines of tone-numbered pinyin and prints them with tone marks,
// wrapped in tone-class spans for card templates:
//   ni3 hao3  ->  <span class="tone3">nǐ</span> <span class="tone3">hǎo</span>
//
// Usage:
//   cedict-pinyin [OPTIONS]
//
// Options:
//   --plain      Print diacritic pinyin without HTML
//   --lower      Lowercase the input first
//   -h, --help   Print help

use std::io::{self, BufRead, Write};
use std::process;

use cedict_core::pinyin::{diacritic_pinyin, prettify_pinyin};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if cedict_cli::wants_help(&args) {
        println!("cedict-pinyin: Convert numbered pinyin from stdin.");
        println!();
        println!("Usage: cedict-pinyin [OPTIONS]");
        println!();
        println!("Reads one phrase per line, e.g. \"ni3 hao3\" or \"lu:4 cha2\".");
        println!();
        println!("Options:");
        println!("  --plain      Print diacritic pinyin without HTML");
        println!("  --lower      Lowercase the input first");
        println!("  -h, --help   Print this help");
        return;
    }

    let plain = cedict_cli::has_flag(&args, &["--plain"]);
    let lower = cedict_cli::has_flag(&args, &["--lower"]);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut failed = false;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                failed = true;
                break;
            }
        };
        let text = line.trim();
        if text.is_empty() {
            let _ = writeln!(out);
            continue;
        }

        let converted = if plain {
            if lower {
                diacritic_pinyin(&text.to_lowercase())
            } else {
                diacritic_pinyin(text)
            }
        } else {
            prettify_pinyin(text, lower)
        };

        match converted {
            Ok(s) => {
                let _ = writeln!(out, "{s}");
            }
            Err(e) => {
                eprintln!("error: {text}: {e}");
                failed = true;
            }
        }
    }

    let _ = out.flush();
    if failed {
        process::exit(1);
    }
}
