//! Keyword Analyzer — counts whole-word occurrences of configured keyword
//! categories in raw document text.
//!
//! Matching runs on the lowercased raw text, not on the token stream, so
//! stopword filtering never hides a hit ("data", "team" and "r" are all
//! countable). Each keyword is escaped and anchored with `\b` on both ends.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A named, ordered list of keywords. Configuration, not derived data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

impl KeywordCategory {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Match count for one keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Counts for every keyword of one category, in configured order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCounts {
    pub category: String,
    pub counts: Vec<KeywordCount>,
}

#[cfg(test)]
impl CategoryCounts {
    pub fn get(&self, keyword: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|c| c.keyword == keyword)
            .map(|c| c.count)
    }
}

/// One bar of the keyword chart: `"<category>: <keyword>"` and its count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEntry {
    pub label: String,
    pub count: usize,
}

/// The built-in categories used when no keyword file is configured.
pub fn default_categories() -> Vec<KeywordCategory> {
    vec![
        KeywordCategory::new(
            "Programming Languages",
            &["python", "sql", "java", "javascript", "r", "scala", "c++", "c#"],
        ),
        KeywordCategory::new(
            "Data & Analytics",
            &[
                "data",
                "analytics",
                "machine learning",
                "ai",
                "statistics",
                "visualization",
                "tableau",
                "power bi",
            ],
        ),
        KeywordCategory::new(
            "Cloud Platforms",
            &["aws", "azure", "gcp", "google cloud", "cloud"],
        ),
        KeywordCategory::new(
            "Databases",
            &["mysql", "postgresql", "mongodb", "oracle", "sql server", "redis"],
        ),
        KeywordCategory::new(
            "Management Skills",
            &["leadership", "project management", "team", "strategy", "planning"],
        ),
        KeywordCategory::new(
            "Technical Skills",
            &["api", "microservices", "docker", "kubernetes", "git", "ci/cd"],
        ),
    ]
}

/// Loads categories from a JSON file holding an array of `{name, keywords}`.
pub fn load_categories(path: &Path) -> Result<Vec<KeywordCategory>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read keyword file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Keyword file '{}' is not a valid category list", path.display()))
}

/// Counts every keyword of every category against `raw_text`.
///
/// All keywords appear in the result, zero counts included, in the order they
/// were configured. A keyword listed twice in one category is reported once,
/// at its first position. Blank keywords count zero.
pub fn count_keywords(raw_text: &str, categories: &[KeywordCategory]) -> Vec<CategoryCounts> {
    let text = raw_text.to_lowercase();

    categories
        .iter()
        .map(|category| {
            let mut seen = HashSet::new();
            let counts = category
                .keywords
                .iter()
                .filter(|k| seen.insert(k.as_str()))
                .map(|keyword| KeywordCount {
                    keyword: keyword.clone(),
                    count: count_matches(&text, keyword),
                })
                .collect();
            CategoryCounts {
                category: category.name.clone(),
                counts,
            }
        })
        .collect()
}

/// Non-overlapping whole-word matches of `keyword` in already-lowercased text.
fn count_matches(lowered_text: &str, keyword: &str) -> usize {
    let needle = keyword.to_lowercase();
    if needle.trim().is_empty() {
        return 0;
    }
    let pattern = format!(r"\b{}\b", regex::escape(&needle));
    match Regex::new(&pattern) {
        Ok(re) => re.find_iter(lowered_text).count(),
        Err(e) => {
            tracing::warn!("Skipping keyword '{keyword}': {e}");
            0
        }
    }
}

/// Flattens results into chart bars sorted by descending count (stable, so
/// equal counts keep configuration order). Zero counts are left out.
pub fn chart_series(results: &[CategoryCounts]) -> Vec<ChartEntry> {
    let mut entries: Vec<ChartEntry> = results
        .iter()
        .flat_map(|cat| {
            cat.counts.iter().map(move |kc| ChartEntry {
                label: format!("{}: {}", cat.category, kc.keyword),
                count: kc.count,
            })
        })
        .filter(|e| e.count > 0)
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn single(name: &str, keywords: &[&str]) -> Vec<KeywordCategory> {
        vec![KeywordCategory::new(name, keywords)]
    }

    #[test]
    fn test_docker_kubernetes_git() {
        let results = count_keywords(
            "Docker and Kubernetes",
            &single("Technical", &["docker", "kubernetes", "git"]),
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].get("docker"), Some(1));
        assert_eq!(results[0].get("kubernetes"), Some(1));
        assert_eq!(results[0].get("git"), Some(0));
    }

    #[test]
    fn test_plural_does_not_match_singular() {
        let results = count_keywords("containers", &single("Infra", &["container"]));
        assert_eq!(results[0].get("container"), Some(0));
    }

    #[test]
    fn test_short_keyword_not_found_inside_word() {
        let results = count_keywords("She said it was fine. AI rocks.", &single("Data", &["ai"]));
        assert_eq!(results[0].get("ai"), Some(1));
    }

    #[test]
    fn test_multi_word_phrase() {
        let text = "Machine Learning engineer; machine learning at scale; machine-learning";
        let results = count_keywords(text, &single("Data", &["machine learning"]));
        assert_eq!(results[0].get("machine learning"), Some(2));
    }

    #[test]
    fn test_counts_stopwords_too() {
        let results = count_keywords("Team player, data team", &single("Mgmt", &["team", "data"]));
        assert_eq!(results[0].get("team"), Some(2));
        assert_eq!(results[0].get("data"), Some(1));
    }

    #[test]
    fn test_symbol_keywords_escaped() {
        let results = count_keywords(
            "Built CI/CD pipelines. CI/CD everywhere.",
            &single("Tech", &["ci/cd", "c++"]),
        );
        assert_eq!(results[0].get("ci/cd"), Some(2));
        // trailing "+" leaves no word boundary before a space
        assert_eq!(results[0].get("c++"), Some(0));
    }

    #[test]
    fn test_order_preserved_and_zero_included() {
        let categories = vec![
            KeywordCategory::new("B", &["zeta", "alpha"]),
            KeywordCategory::new("A", &["beta"]),
        ];
        let results = count_keywords("", &categories);
        let names: Vec<_> = results.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        let keywords: Vec<_> = results[0].counts.iter().map(|c| c.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["zeta", "alpha"]);
        assert!(results.iter().flat_map(|c| &c.counts).all(|c| c.count == 0));
    }

    #[test]
    fn test_duplicate_keyword_reported_once() {
        let results = count_keywords("git git", &single("Tech", &["git", "api", "git"]));
        assert_eq!(results[0].counts.len(), 2);
        assert_eq!(results[0].get("git"), Some(2));
    }

    #[test]
    fn test_blank_keyword_counts_zero() {
        let results = count_keywords("some text", &single("Odd", &["", "  "]));
        assert!(results[0].counts.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_default_categories_shape() {
        let categories = default_categories();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].name, "Programming Languages");
        assert!(categories[5].keywords.contains(&"kubernetes".to_string()));
    }

    #[test]
    fn test_chart_series_sorted_and_filtered() {
        let categories = vec![
            KeywordCategory::new("Cloud", &["aws", "azure"]),
            KeywordCategory::new("Tech", &["docker", "git"]),
        ];
        let results = count_keywords("aws docker docker git", &categories);
        let chart = chart_series(&results);
        let labels: Vec<_> = chart.iter().map(|e| (e.label.as_str(), e.count)).collect();
        assert_eq!(
            labels,
            vec![("Tech: docker", 2), ("Cloud: aws", 1), ("Tech: git", 1)]
        );
    }

    #[test]
    fn test_load_categories_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Langs", "keywords": ["rust", "go"]}}, {{"name": "Ops", "keywords": []}}]"#
        )
        .unwrap();
        let categories = load_categories(file.path()).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0], KeywordCategory::new("Langs", &["rust", "go"]));
        assert!(categories[1].keywords.is_empty());
    }

    #[test]
    fn test_load_categories_rejects_object_form() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Langs": ["rust"]}}"#).unwrap();
        assert!(load_categories(file.path()).is_err());
    }
}
