// Criterion benchmarks for cedict-cards.
//
// Uses the bundled sample dictionary by default. Set CEDICT_PATH to a full
// cedict_ts.u8 to benchmark loading and resolution against the real file.
//
// Run:
//   cargo bench -p cedict-cards
//   CEDICT_PATH=/path/to/cedict_ts.u8 cargo bench -p cedict-cards

use std::path::PathBuf;
use std::sync::Arc;

use cedict_cards::{FlashcardSession, NoteFields};
use cedict_core::pinyin::prettify_pinyin;
use cedict_parse::{DictionaryIndex, parse_line};
use criterion::{Criterion, criterion_group, criterion_main};

// ---------------------------------------------------------------------------
// Dictionary discovery
// ---------------------------------------------------------------------------

fn dictionary_path() -> PathBuf {
    if let Ok(path) = std::env::var("CEDICT_PATH") {
        let path = PathBuf::from(path);
        if path.is_file() {
            return path;
        }
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample_cedict.u8")
}

const LINES: &[&str] = &[
    "你好 你好 [ni3 hao3] /hello/hi/",
    "聽 听 [ting1] /to listen/to hear/to obey/CL:個|个[ge4]/",
    "垃圾 垃圾 [la1 ji1] /trash/refuse/garbage/(coll.) of poor quality/Taiwan pr. [le4 se4]/",
    "書 书 [shu1] /book/letter/CL:本[ben3],冊|册[ce4],部[bu4]/",
    "綠茶 绿茶 [lu:4 cha2] /green tea/",
];

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_parse_line(c: &mut Criterion) {
    c.bench_function("parse_line_5", |b| {
        b.iter(|| {
            for line in LINES {
                std::hint::black_box(parse_line(line).ok());
            }
        });
    });
}

fn bench_prettify_pinyin(c: &mut Criterion) {
    let pinyin = "zhong1 hua2 ren2 min2 gong4 he2 guo2 lu:4 cha2 na3 r5";
    c.bench_function("prettify_pinyin_11_syllables", |b| {
        b.iter(|| std::hint::black_box(prettify_pinyin(pinyin, false).ok()));
    });
}

fn bench_load(c: &mut Criterion) {
    let path = dictionary_path();
    let text = std::fs::read_to_string(&path).expect("failed to read dictionary");

    let mut group = c.benchmark_group("load");
    group.sample_size(10);
    group.bench_function("parse_str", |b| {
        b.iter(|| std::hint::black_box(DictionaryIndex::parse_str(&text).ok()));
    });
    group.finish();
}

fn bench_render_words(c: &mut Criterion) {
    let index = DictionaryIndex::load(dictionary_path()).expect("failed to load dictionary");
    let session = FlashcardSession::new(Arc::new(index));
    let words = [
        ("你好", None),
        ("听", Some("ting1")),
        ("垃圾", None),
        ("书", None),
        ("绿茶", None),
    ];

    c.bench_function("render_5_words", |b| {
        b.iter(|| {
            for (word, pinyin) in &words {
                let note: Option<NoteFields> = session.render_word(word, None, *pinyin).ok();
                std::hint::black_box(note);
            }
        });
    });
}

criterion_group!(
    benches,
    bench_parse_line,
    bench_prettify_pinyin,
    bench_load,
    bench_render_words,
);
criterion_main!(benches);
