//! Stopword sets used by the tokenizer.
//!
//! The lists are bundled rather than loaded from a corpus so tokenization is
//! identical on every machine. Bump `STOPWORDS_VERSION` whenever either list
//! changes; it is reported in analysis output.

use std::collections::HashSet;

pub const STOPWORDS_VERSION: &str = "en-179+cv-36/1";

/// Standard English stopwords (the classic 179-word NLTK list).
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what",
    "which", "who", "whom", "this", "that", "that'll", "these", "those", "am", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn",
    "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
    "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't",
    "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
    "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Résumé boilerplate that dominates every CV and says nothing about the candidate.
const CV_BOILERPLATE: &[&str] = &[
    "cv", "resume", "responsible", "worked", "using", "project", "projects", "tool",
    "performed", "objective", "summary", "include", "data", "management",
    "experience", "senior", "lead", "team", "develop", "developed", "design",
    "designed", "implement", "implemented", "build", "built", "created", "skills",
    "skill", "abilities", "ability", "proficient", "knowledge", "strong",
    "understanding", "etc",
];

/// An immutable, lowercase stopword set.
///
/// Built once at startup and shared by reference; per-request additions go
/// through [`StopwordSet::with_extra`], which returns a new set.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// English stopwords plus the résumé boilerplate list.
    pub fn standard() -> Self {
        let words = ENGLISH
            .iter()
            .chain(CV_BOILERPLATE)
            .map(|w| w.to_string())
            .collect();
        Self { words }
    }

    /// Returns a copy of this set extended with `extra`, lowercased.
    /// Blank entries are ignored.
    pub fn with_extra<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = self.words.clone();
        words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        Self { words }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        if word.bytes().any(|b| b.is_ascii_uppercase()) {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_contains_english_and_boilerplate() {
        let set = StopwordSet::standard();
        assert!(set.contains("the"));
        assert!(set.contains("wouldn't"));
        assert!(set.contains("resume"));
        assert!(set.contains("responsible"));
        assert!(!set.contains("kubernetes"));
    }

    #[test]
    fn test_standard_size_matches_lists() {
        // the two lists share no words
        assert_eq!(StopwordSet::standard().len(), ENGLISH.len() + CV_BOILERPLATE.len());
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let set = StopwordSet::standard();
        assert!(set.contains("The"));
        assert!(set.contains("RESUME"));
    }

    #[test]
    fn test_with_extra_lowercases_and_leaves_base_untouched() {
        let base = StopwordSet::standard();
        let extended = base.with_extra(["Acme", "  ", " Globex "]);
        assert!(extended.contains("acme"));
        assert!(extended.contains("globex"));
        assert!(!base.contains("acme"));
        assert_eq!(extended.len(), base.len() + 2);
    }
}
