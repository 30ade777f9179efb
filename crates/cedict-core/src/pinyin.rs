// Pinyin tone transliteration: tone-numbered ASCII syllables to diacritics.
//
// CC-CEDICT stores pronunciations as space-separated ASCII syllables with a
// trailing tone digit (`ni3 hao3`) and writes ü as `u:` (`lu:4`). Cards show
// the diacritic form (`nǐ hǎo`, `lǜ`). Tone 5 is the neutral tone and carries
// no mark.

use std::borrow::Cow;
use std::fmt::Write as _;

/// Tone number, 1..=5.
pub type Tone = u8;

/// The neutral (unmarked) tone.
pub const NEUTRAL_TONE: Tone = 5;

/// Diacritic forms of the six pinyin vowels: tones 1-4, then the bare vowel.
const DIACRITIC_VOWELS: [[char; 5]; 6] = [
    ['ā', 'á', 'ǎ', 'à', 'a'],
    ['ē', 'é', 'ě', 'è', 'e'],
    ['ī', 'í', 'ǐ', 'ì', 'i'],
    ['ō', 'ó', 'ǒ', 'ò', 'o'],
    ['ū', 'ú', 'ǔ', 'ù', 'u'],
    ['ǖ', 'ǘ', 'ǚ', 'ǜ', 'ü'],
];

/// Standalone erhua syllable. CC-CEDICT writes it both as `r` and `r5`.
const IRREGULAR_R: &str = "r";

/// A syllable whose tone could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToneParseError {
    #[error("empty pinyin syllable")]
    Empty,
    #[error("cannot determine tone of pinyin syllable {0:?}")]
    UnknownTone(String),
}

// ---------------------------------------------------------------------------
// Vowels
// ---------------------------------------------------------------------------

fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Check whether a character is one of the six pinyin vowels (case-insensitive).
pub fn is_pinyin_vowel(c: char) -> bool {
    matches!(simple_lower(c), 'a' | 'e' | 'i' | 'o' | 'u' | 'ü')
}

/// Return the diacritic form of a pinyin vowel for the given tone.
///
/// Tone 5 returns the bare vowel. Uppercase vowels yield uppercase marks
/// (`'A', 3` gives `'Ǎ'`). Returns `None` for characters that are not pinyin
/// vowels and for tones outside 1..=5.
pub fn diacritic_vowel(vowel: char, tone: Tone) -> Option<char> {
    if !(1..=NEUTRAL_TONE).contains(&tone) {
        return None;
    }
    let lower = simple_lower(vowel);
    let row = DIACRITIC_VOWELS.iter().find(|row| row[4] == lower)?;
    let marked = row[usize::from(tone - 1)];
    if vowel.is_uppercase() {
        marked.to_uppercase().next()
    } else {
        Some(marked)
    }
}

/// Tone carried by an accented vowel, if `c` is one.
fn accent_tone(c: char) -> Option<Tone> {
    let lower = simple_lower(c);
    DIACRITIC_VOWELS.iter().find_map(|row| {
        row[..4]
            .iter()
            .position(|&marked| marked == lower)
            .map(|idx| idx as Tone + 1)
    })
}

// ---------------------------------------------------------------------------
// Syllables
// ---------------------------------------------------------------------------

/// Split `hao3` into `("hao", 3)`. Only digits 1..=5 count as tones.
fn split_tone_digit(syllable: &str) -> Option<(&str, Tone)> {
    let last = syllable.chars().next_back()?;
    let tone = last.to_digit(10)?;
    if !(1..=u32::from(NEUTRAL_TONE)).contains(&tone) {
        return None;
    }
    Some((&syllable[..syllable.len() - 1], tone as Tone))
}

/// Letters of a syllable body with the `u:` ligature folded into `ü`.
fn fold_umlaut(body: &str) -> Vec<char> {
    let mut letters: Vec<char> = Vec::with_capacity(body.len());
    for c in body.chars() {
        if c == ':' {
            if let Some(prev) = letters.last_mut() {
                match *prev {
                    'u' => {
                        *prev = 'ü';
                        continue;
                    }
                    'U' => {
                        *prev = 'Ü';
                        continue;
                    }
                    _ => {}
                }
            }
        }
        letters.push(c);
    }
    letters
}

/// Index of the vowel that takes the tone mark.
///
/// `a` or `e` wins; otherwise the `o` of `ou`; otherwise the first vowel
/// followed by a non-vowel or ending the syllable.
fn tone_mark_position(letters: &[char]) -> Option<usize> {
    let lower: Vec<char> = letters.iter().map(|&c| simple_lower(c)).collect();

    if let Some(idx) = lower.iter().position(|&c| c == 'a' || c == 'e') {
        return Some(idx);
    }
    if let Some(idx) = lower.windows(2).position(|pair| pair == ['o', 'u']) {
        return Some(idx);
    }
    (0..lower.len()).find(|&idx| {
        is_pinyin_vowel(lower[idx]) && lower.get(idx + 1).is_none_or(|&next| !is_pinyin_vowel(next))
    })
}

/// Apply `tone` to a syllable body that has already lost its tone digit.
/// Bodies without a vowel (`m`, `ng`, `hm`) come back unmarked.
fn apply_tone(body: &str, tone: Tone) -> String {
    let mut letters = fold_umlaut(body);
    if let Some(idx) = tone_mark_position(&letters) {
        if let Some(marked) = diacritic_vowel(letters[idx], tone) {
            letters[idx] = marked;
        }
    }
    letters.into_iter().collect()
}

/// Convert one tone-numbered syllable to its diacritic form.
///
/// `hao3` gives `hǎo`, `dou1` gives `dōu`, `lu:4` gives `lǜ`, and the
/// irregular `r` is returned as is.
pub fn diacritic_syllable(syllable: &str) -> Result<String, ToneParseError> {
    if syllable.is_empty() {
        return Err(ToneParseError::Empty);
    }
    if syllable == IRREGULAR_R {
        return Ok(IRREGULAR_R.to_string());
    }
    let (body, tone) = split_tone_digit(syllable)
        .ok_or_else(|| ToneParseError::UnknownTone(syllable.to_string()))?;
    Ok(apply_tone(body, tone))
}

/// Diacritic form and tone of a syllable that is either tone-numbered
/// (`ni3`) or already accented (`nǐ`).
///
/// Already-accented input is returned unchanged, so the function is
/// idempotent on its own output.
pub fn diacritic_syllable_and_tone(syllable: &str) -> Result<(String, Tone), ToneParseError> {
    if syllable.is_empty() {
        return Err(ToneParseError::Empty);
    }
    if syllable == IRREGULAR_R || syllable == "r5" {
        return Ok((IRREGULAR_R.to_string(), NEUTRAL_TONE));
    }
    if let Some((body, tone)) = split_tone_digit(syllable) {
        return Ok((apply_tone(body, tone), tone));
    }
    match syllable.chars().find_map(accent_tone) {
        Some(tone) => Ok((syllable.to_string(), tone)),
        None => Err(ToneParseError::UnknownTone(syllable.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Phrases
// ---------------------------------------------------------------------------

/// Tokens without letters (CC-CEDICT uses `,` and `·` inside pinyin) are
/// not syllables and pass through.
fn is_syllable_token(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
}

/// Diacritic form and tone of one phrase token.
///
/// CC-CEDICT spells Latin letters inside pinyin without a tone
/// (`ka3 la1 O K`); ASCII tokens with no tone digit are emitted bare as
/// neutral tone. Other tokens follow [`diacritic_syllable_and_tone`].
fn phrase_syllable(token: &str) -> Result<(String, Tone), ToneParseError> {
    match diacritic_syllable_and_tone(token) {
        Err(ToneParseError::UnknownTone(_)) if token.is_ascii() => {
            Ok((apply_tone(token, NEUTRAL_TONE), NEUTRAL_TONE))
        }
        other => other,
    }
}

/// Render space-separated pinyin as HTML, wrapping each toned syllable in
/// `<span class="toneN">`. Neutral-tone syllables are emitted bare.
///
/// `prettify_pinyin("ni3 hao3", false)` gives
/// `<span class="tone3">nǐ</span> <span class="tone3">hǎo</span>`.
pub fn prettify_pinyin(text: &str, lowercase: bool) -> Result<String, ToneParseError> {
    let text = if lowercase {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    };

    let mut out = String::with_capacity(text.len() * 3);
    for (idx, token) in text.split_whitespace().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        if !is_syllable_token(token) {
            out.push_str(token);
            continue;
        }
        let (syllable, tone) = phrase_syllable(token)?;
        if tone == NEUTRAL_TONE {
            out.push_str(&syllable);
        } else {
            let _ = write!(out, "<span class=\"tone{tone}\">{syllable}</span>");
        }
    }
    Ok(out)
}

/// Render space-separated pinyin as plain diacritic text (`ni3 hao3` gives
/// `nǐ hǎo`).
pub fn diacritic_pinyin(text: &str) -> Result<String, ToneParseError> {
    let mut syllables = Vec::new();
    for token in text.split_whitespace() {
        if is_syllable_token(token) {
            syllables.push(phrase_syllable(token)?.0);
        } else {
            syllables.push(token.to_string());
        }
    }
    Ok(syllables.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diacritic_vowel_marks_each_tone() {
        assert_eq!(diacritic_vowel('a', 1), Some('ā'));
        assert_eq!(diacritic_vowel('a', 3), Some('ǎ'));
        assert_eq!(diacritic_vowel('o', 4), Some('ò'));
        assert_eq!(diacritic_vowel('ü', 2), Some('ǘ'));
    }

    #[test]
    fn diacritic_vowel_neutral_tone_is_bare() {
        assert_eq!(diacritic_vowel('e', 5), Some('e'));
        assert_eq!(diacritic_vowel('ü', 5), Some('ü'));
    }

    #[test]
    fn diacritic_vowel_keeps_case() {
        assert_eq!(diacritic_vowel('O', 1), Some('Ō'));
        assert_eq!(diacritic_vowel('E', 4), Some('È'));
    }

    #[test]
    fn diacritic_vowel_rejects_non_vowels_and_bad_tones() {
        assert_eq!(diacritic_vowel('n', 1), None);
        assert_eq!(diacritic_vowel('a', 0), None);
        assert_eq!(diacritic_vowel('a', 6), None);
    }

    #[test]
    fn a_and_e_take_the_mark() {
        assert_eq!(diacritic_syllable("hao3").unwrap(), "hǎo");
        assert_eq!(diacritic_syllable("xie4").unwrap(), "xiè");
        assert_eq!(diacritic_syllable("guai4").unwrap(), "guài");
        assert_eq!(diacritic_syllable("lu:e4").unwrap(), "lüè");
    }

    #[test]
    fn o_of_ou_takes_the_mark() {
        assert_eq!(diacritic_syllable("dou1").unwrap(), "dōu");
        assert_eq!(diacritic_syllable("xiong2").unwrap(), "xióng");
    }

    #[test]
    fn first_vowel_before_consonant_takes_the_mark() {
        assert_eq!(diacritic_syllable("niu2").unwrap(), "niú");
        assert_eq!(diacritic_syllable("gui4").unwrap(), "guì");
        assert_eq!(diacritic_syllable("ni3").unwrap(), "nǐ");
        assert_eq!(diacritic_syllable("zhuang4").unwrap(), "zhuàng");
    }

    #[test]
    fn u_colon_becomes_u_umlaut() {
        assert_eq!(diacritic_syllable("lu:4").unwrap(), "lǜ");
        assert_eq!(diacritic_syllable("nu:3").unwrap(), "nǚ");
        assert_eq!(diacritic_syllable("Lu:3").unwrap(), "Lǚ");
    }

    #[test]
    fn neutral_tone_drops_digit() {
        assert_eq!(diacritic_syllable("ge5").unwrap(), "ge");
        assert_eq!(diacritic_syllable("ma5").unwrap(), "ma");
    }

    #[test]
    fn irregular_r_passes_through() {
        assert_eq!(diacritic_syllable("r").unwrap(), "r");
        assert_eq!(diacritic_syllable("r5").unwrap(), "r");
    }

    #[test]
    fn capitalized_syllable_keeps_case() {
        assert_eq!(diacritic_syllable("Ou1").unwrap(), "Ōu");
        assert_eq!(diacritic_syllable("Zhang1").unwrap(), "Zhāng");
    }

    #[test]
    fn syllable_without_vowel_is_unmarked() {
        assert_eq!(diacritic_syllable("m2").unwrap(), "m");
        assert_eq!(diacritic_syllable("ng2").unwrap(), "ng");
    }

    #[test]
    fn syllable_without_digit_is_rejected() {
        assert_eq!(
            diacritic_syllable("hao"),
            Err(ToneParseError::UnknownTone("hao".to_string()))
        );
        assert_eq!(diacritic_syllable(""), Err(ToneParseError::Empty));
    }

    #[test]
    fn syllable_and_tone_from_digit() {
        for (syl, tone) in [("ma1", 1), ("ma2", 2), ("ma3", 3), ("ma4", 4), ("ma5", 5)] {
            let (text, t) = diacritic_syllable_and_tone(syl).unwrap();
            assert_eq!(t, tone);
            assert_eq!(text, diacritic_syllable(syl).unwrap());
        }
    }

    #[test]
    fn syllable_and_tone_is_idempotent_on_accented_input() {
        for syl in ["hao3", "dou1", "niu2", "lu:4", "zhuang4", "xue2", "Ou1"] {
            let first = diacritic_syllable_and_tone(syl).unwrap();
            let second = diacritic_syllable_and_tone(&first.0).unwrap();
            assert_eq!(first, second, "not idempotent for {syl}");
        }
    }

    #[test]
    fn syllable_and_tone_irregular_r() {
        assert_eq!(diacritic_syllable_and_tone("r").unwrap(), ("r".to_string(), 5));
        assert_eq!(diacritic_syllable_and_tone("r5").unwrap(), ("r".to_string(), 5));
    }

    #[test]
    fn syllable_and_tone_rejects_unknown() {
        assert!(matches!(
            diacritic_syllable_and_tone("hao"),
            Err(ToneParseError::UnknownTone(_))
        ));
        assert!(matches!(
            diacritic_syllable_and_tone("xyz9"),
            Err(ToneParseError::UnknownTone(_))
        ));
    }

    #[test]
    fn prettify_wraps_toned_syllables() {
        assert_eq!(
            prettify_pinyin("ni3 hao3", false).unwrap(),
            "<span class=\"tone3\">nǐ</span> <span class=\"tone3\">hǎo</span>"
        );
    }

    #[test]
    fn prettify_leaves_neutral_tone_bare() {
        assert_eq!(
            prettify_pinyin("he1 dian3 lu:4 cha2 ba5", false).unwrap(),
            "<span class=\"tone1\">hē</span> <span class=\"tone3\">diǎn</span> \
             <span class=\"tone4\">lǜ</span> <span class=\"tone2\">chá</span> ba"
        );
    }

    #[test]
    fn prettify_lowercases_on_request() {
        assert_eq!(
            prettify_pinyin("Bei3 jing1", true).unwrap(),
            "<span class=\"tone3\">běi</span> <span class=\"tone1\">jīng</span>"
        );
        assert_eq!(
            prettify_pinyin("Bei3", false).unwrap(),
            "<span class=\"tone3\">Běi</span>"
        );
    }

    #[test]
    fn prettify_collapses_whitespace_and_keeps_punctuation() {
        assert_eq!(
            prettify_pinyin("  yi1  ,  er4 ", false).unwrap(),
            "<span class=\"tone1\">yī</span> , <span class=\"tone4\">èr</span>"
        );
    }

    #[test]
    fn prettify_accepts_accented_input() {
        assert_eq!(
            prettify_pinyin("nǐ hǎo", false).unwrap(),
            prettify_pinyin("ni3 hao3", false).unwrap()
        );
    }

    #[test]
    fn prettify_propagates_tone_errors() {
        assert_eq!(
            prettify_pinyin("ni3 nü", false),
            Err(ToneParseError::UnknownTone("nü".to_string()))
        );
    }

    #[test]
    fn prettify_leaves_latin_letters_bare() {
        assert_eq!(
            prettify_pinyin("ka3 la1 O K", false).unwrap(),
            "<span class=\"tone3\">kǎ</span> <span class=\"tone1\">lā</span> O K"
        );
        assert_eq!(
            prettify_pinyin("A A zhi4", false).unwrap(),
            "A A <span class=\"tone4\">zhì</span>"
        );
    }

    #[test]
    fn diacritic_pinyin_leaves_latin_letters_bare() {
        assert_eq!(diacritic_pinyin("ka3 la1 O K").unwrap(), "kǎ lā O K");
        assert_eq!(diacritic_pinyin("T xu:4").unwrap(), "T xǜ");
    }

    #[test]
    fn bare_tokens_do_not_loosen_single_syllables() {
        assert!(diacritic_syllable_and_tone("O").is_err());
        assert!(diacritic_syllable("K").is_err());
    }

    #[test]
    fn diacritic_pinyin_is_plain_text() {
        assert_eq!(diacritic_pinyin("ni3 hao3").unwrap(), "nǐ hǎo");
        assert_eq!(diacritic_pinyin("xi3 huan5").unwrap(), "xǐ huan");
        assert_eq!(diacritic_pinyin("").unwrap(), "");
    }
}
