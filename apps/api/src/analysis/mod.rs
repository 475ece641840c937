// Lexical analysis of extracted résumé text: tokenization, year mentions,
// keyword categories, and the per-document aggregate built from them.
// The core is synchronous and owns no shared mutable state; `handlers` runs it
// on the blocking pool for the upload endpoint.

pub mod analyzer;
pub mod frequency;
pub mod handlers;
pub mod keywords;
pub mod stopwords;
pub mod tokenizer;
pub mod transliterate;
pub mod years;

use anyhow::Result;
use tracing::info;

use crate::analysis::keywords::{default_categories, load_categories, KeywordCategory};
use crate::analysis::stopwords::{StopwordSet, STOPWORDS_VERSION};
use crate::config::Config;

/// Immutable analysis settings, built once at startup and shared read-only
/// across requests.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub stopwords: StopwordSet,
    pub categories: Vec<KeywordCategory>,
    pub top_words: usize,
}

impl AnalysisConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        let stopwords = StopwordSet::standard().with_extra(&config.extra_stopwords);
        let categories = match &config.keyword_categories_path {
            Some(path) => load_categories(path)?,
            None => default_categories(),
        };

        info!(
            "Analysis config: {} stopwords ({STOPWORDS_VERSION}), {} keyword categories, top {} words",
            stopwords.len(),
            categories.len(),
            config.top_words
        );

        Ok(Self {
            stopwords,
            categories,
            top_words: config.top_words,
        })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stopwords: StopwordSet::standard(),
            categories: default_categories(),
            top_words: 20,
        }
    }
}
