//! Treebank-style tokenization of paragraph text.
//!
//! This module splits paragraphs two ways:
//! - `tokenize_words`: one flat token sequence per paragraph
//! - `tokenize_sentences`: sentences first, then words within each sentence
//!
//! Contractions are split off the word they attach to (`don't` -> `do n't`),
//! punctuation becomes standalone tokens, and case is preserved. The rule
//! tables are compiled once and shared read-only between threads.

use crate::models::{SentenceTokens, WordTokens};
use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;

lazy_static! {
    /// Fused forms split into two tokens (`cannot` -> `can not`)
    static ref FUSED_TWO: Vec<Regex> = [
        r"(?i)\b(can)(not)\b",
        r"(?i)\b(d)('ye)\b",
        r"(?i)\b(gim)(me)\b",
        r"(?i)\b(gon)(na)\b",
        r"(?i)\b(got)(ta)\b",
        r"(?i)\b(lem)(me)\b",
        r"(?i)\b(mor)('n)\b",
        r"(?i)\b(wan)(na)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    /// Fused forms split into three tokens (`whaddya` -> `wha dd ya`)
    static ref FUSED_THREE: Vec<Regex> = [
        r"(?i)\b(whad)(dd)(ya)\b",
        r"(?i)\b(wha)(t)(cha)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    /// Punctuation that always stands alone. Word-internal `.`, `'`, `-`, `/`,
    /// `+`, `<`, `>`, `,` and `&` are handled by the narrower rules below.
    static ref STANDALONE_PUNCT: Regex = Regex::new(r"([^\w\s.'\-/+<>,\&])").unwrap();

    /// Double hyphen used as a dash (`paused--then`)
    static ref DOUBLE_DASH: Regex = Regex::new(r"(-{2,})").unwrap();

    /// Opening single quote at the start of a word
    static ref LEADING_QUOTE: Regex = Regex::new(r"(^|\s)'(\S)").unwrap();

    /// Closing single quote before whitespace, a comma, a period or end of text
    static ref TRAILING_QUOTE: Regex = Regex::new(r"'([\s.,]|$)").unwrap();

    /// Comma before whitespace or end of text
    static ref TRAILING_COMMA: Regex = Regex::new(r",(\s|$)").unwrap();

    /// Sentence-final periods (and ellipses)
    static ref TERMINAL_PERIOD: Regex = Regex::new(r"(\.+)(\s|$)").unwrap();

    /// Clitics split from the preceding word (`I'm` -> `I 'm`, `can't` -> `ca n't`)
    static ref CLITIC: Regex = Regex::new(r"(?i)(\S)('s|'m|'d|'ll|'re|'ve|n't)\b").unwrap();
}

/// True for paragraphs that carry no text (empty, whitespace, or a bare newline).
#[must_use]
#[inline]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Split one piece of text into word tokens.
#[must_use]
pub fn tokenize_words(text: &str) -> WordTokens {
    if is_blank(text) {
        return Vec::new();
    }

    let mut s = text.replace('\u{2019}', "'");
    for re in FUSED_TWO.iter() {
        s = re.replace_all(&s, "${1} ${2}").into_owned();
    }
    for re in FUSED_THREE.iter() {
        s = re.replace_all(&s, "${1} ${2} ${3}").into_owned();
    }
    let s = STANDALONE_PUNCT.replace_all(&s, " ${1} ");
    let s = DOUBLE_DASH.replace_all(&s, " ${1} ");
    let s = LEADING_QUOTE.replace_all(&s, "${1}' ${2}");
    // Quotes before commas, so `Hello,'` loses both
    let s = TRAILING_QUOTE.replace_all(&s, " '${1}");
    let s = TRAILING_COMMA.replace_all(&s, " ,${1}");
    let s = TERMINAL_PERIOD.replace_all(&s, " ${1}${2}");
    let s = CLITIC.replace_all(&s, "${1} ${2}");

    s.split_whitespace().map(str::to_string).collect()
}

/// Split text into sentences.
///
/// A sentence ends at a run of `.`, `!` or `?` (plus any closing quotes or
/// brackets) that is followed by whitespace or the end of the text. Text
/// after the last terminator forms a final sentence.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_terminator(c) {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if is_terminator(next) || is_closer(next) {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
        if at_boundary {
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

/// Split text into sentences, each tokenized into words.
#[must_use]
pub fn tokenize_sentences(text: &str) -> SentenceTokens {
    split_sentences(text)
        .into_iter()
        .map(tokenize_words)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Word tokens for every non-blank paragraph, in document order.
#[must_use]
pub fn word_tokens<S: AsRef<str> + Sync>(paragraphs: &[S]) -> Vec<WordTokens> {
    paragraphs
        .par_iter()
        .map(|p| AsRef::<str>::as_ref(p))
        .filter(|text| !is_blank(text))
        .map(tokenize_words)
        .collect()
}

/// Sentence tokens for every non-blank paragraph, in document order.
#[must_use]
pub fn sentence_tokens<S: AsRef<str> + Sync>(paragraphs: &[S]) -> Vec<SentenceTokens> {
    paragraphs
        .par_iter()
        .map(|p| AsRef::<str>::as_ref(p))
        .filter(|text| !is_blank(text))
        .map(tokenize_sentences)
        .collect()
}
