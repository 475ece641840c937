//! Tokenizer — folds raw document text to ASCII, splits it into word tokens and
//! drops numbers, stopwords and short fragments.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::stopwords::StopwordSet;
use crate::analysis::transliterate::to_ascii;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9]+(?:[-_][A-Za-z0-9]+)*").expect("token pattern is valid")
});

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Tokens shorter than this are discarded.
const MIN_TOKEN_LEN: usize = 3;

/// Output of [`tokenize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tokenized {
    /// Filtered tokens in order of appearance, duplicates kept.
    pub tokens: Vec<String>,
    /// ASCII-folded text with every whitespace run collapsed to one space.
    pub normalized_text: String,
}

/// Normalizes `raw_text` and returns its filtered token stream.
///
/// A token is a run of ASCII letters/digits, optionally joined by single
/// internal `-` or `_`. Tokens are lowercased; purely numeric tokens, members
/// of `stopwords` and tokens of two characters or fewer are dropped.
pub fn tokenize(raw_text: &str, stopwords: &StopwordSet) -> Tokenized {
    let normalized_text = normalize(raw_text);

    let tokens = TOKEN_RE
        .find_iter(&normalized_text)
        .map(|m| m.as_str().to_ascii_lowercase())
        .filter(|t| !t.bytes().all(|b| b.is_ascii_digit()))
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !stopwords.contains(t))
        .collect();

    Tokenized {
        tokens,
        normalized_text,
    }
}

/// ASCII-folds `text` and collapses whitespace runs (newlines and tabs
/// included) to single spaces. Leading and trailing whitespace is collapsed,
/// not trimmed.
pub fn normalize(text: &str) -> String {
    let folded = to_ascii(text);
    WHITESPACE_RE.replace_all(&folded, " ").into_owned()
}
