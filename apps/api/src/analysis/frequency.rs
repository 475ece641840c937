use std::collections::HashMap;

use serde::Serialize;

/// A token and how many times it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Token → occurrence count, remembering first-appearance order so ties in
/// [`FrequencyTable::most_common`] resolve deterministically.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<WordCount>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut table = Self::default();
        for token in tokens {
            table.add(token.as_ref());
        }
        table
    }

    fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push(WordCount {
                    word: token.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The `n` most frequent tokens, highest count first. Equal counts keep
    /// first-appearance order.
    pub fn most_common(&self, n: usize) -> Vec<WordCount> {
        let mut ranked: Vec<&WordCount> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.into_iter().take(n).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wc(word: &str, count: usize) -> WordCount {
        WordCount {
            word: word.to_string(),
            count,
        }
    }

    #[test]
    fn test_most_common_top_two() {
        let table = FrequencyTable::from_tokens(&["api", "api", "git", "api", "git"]);
        assert_eq!(table.most_common(2), vec![wc("api", 3), wc("git", 2)]);
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let table = FrequencyTable::from_tokens(&["rust", "go", "java", "go", "rust", "java"]);
        assert_eq!(
            table.most_common(3),
            vec![wc("rust", 2), wc("go", 2), wc("java", 2)]
        );
    }

    #[test]
    fn test_n_larger_than_table() {
        let table = FrequencyTable::from_tokens(&["only"]);
        assert_eq!(table.most_common(20), vec![wc("only", 1)]);
        assert!(table.most_common(0).is_empty());
    }

    #[test]
    fn test_distinct_count_and_order() {
        let table = FrequencyTable::from_tokens(&["a1", "b2", "a1"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.most_common(5), vec![wc("a1", 2), wc("b2", 1)]);
    }

    #[test]
    fn test_empty() {
        let table = FrequencyTable::from_tokens::<String>(&[]);
        assert_eq!(table.len(), 0);
        assert!(table.most_common(5).is_empty());
    }
}
