//! Analysis Aggregator — one document's raw text and everything derived from it.
//!
//! Tokens, year mentions and keyword counts are each derived independently
//! from the same raw text; none of them feeds another.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::analysis::frequency::{FrequencyTable, WordCount};
use crate::analysis::keywords::{
    chart_series, count_keywords, CategoryCounts, ChartEntry, KeywordCategory,
};
use crate::analysis::stopwords::StopwordSet;
use crate::analysis::tokenizer::tokenize;
use crate::analysis::years::{extract_years, year_counts};
use crate::extraction::{Document, DocumentFormat, DocumentReader, ExtractionError};

/// Headline numbers for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub file_name: String,
    pub total_words: usize,
    pub unique_words: usize,
    pub raw_text_length: usize,
    pub years_mentioned: usize,
}

/// Everything the presentation layer needs from one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub format: DocumentFormat,
    pub summary: AnalysisSummary,
    pub top_words: Vec<WordCount>,
    pub year_counts: BTreeMap<i32, usize>,
    pub keyword_results: Vec<CategoryCounts>,
    pub keyword_chart: Vec<ChartEntry>,
}

#[derive(Debug)]
pub struct CvAnalysis {
    document: Document,
    tokens: Vec<String>,
    word_counts: FrequencyTable,
    year_mentions: Vec<i32>,
}

impl CvAnalysis {
    /// Reads `path` with `reader` and analyzes the result.
    pub fn from_path(
        path: &Path,
        reader: &DocumentReader,
        stopwords: &StopwordSet,
    ) -> Result<Self, ExtractionError> {
        let document = reader.load(path)?;
        Ok(Self::from_document(document, stopwords))
    }

    pub fn from_document(document: Document, stopwords: &StopwordSet) -> Self {
        let tokenized = tokenize(document.raw_text(), stopwords);
        let word_counts = FrequencyTable::from_tokens(&tokenized.tokens);
        let year_mentions = extract_years(document.raw_text());

        tracing::debug!(
            "Analyzed '{}': {} tokens, {} unique, {} year mentions",
            document.file_name,
            tokenized.tokens.len(),
            word_counts.len(),
            year_mentions.len()
        );

        Self {
            document,
            tokens: tokenized.tokens,
            word_counts,
            year_mentions,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.document.file_name
    }

    pub fn format(&self) -> DocumentFormat {
        self.document.format
    }

    pub fn raw_text(&self) -> &str {
        self.document.raw_text()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn word_counts(&self) -> &FrequencyTable {
        &self.word_counts
    }

    pub fn year_mentions(&self) -> &[i32] {
        &self.year_mentions
    }

    pub fn year_counts(&self) -> BTreeMap<i32, usize> {
        year_counts(self.year_mentions())
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            file_name: self.file_name().to_string(),
            total_words: self.tokens().len(),
            unique_words: self.word_counts().len(),
            raw_text_length: self.raw_text().chars().count(),
            years_mentioned: self.year_mentions().len(),
        }
    }

    pub fn most_common(&self, n: usize) -> Vec<WordCount> {
        self.word_counts().most_common(n)
    }

    /// Keyword counts against the raw text, not the filtered tokens.
    pub fn keyword_results(&self, categories: &[KeywordCategory]) -> Vec<CategoryCounts> {
        count_keywords(self.raw_text(), categories)
    }

    pub fn report(&self, categories: &[KeywordCategory], top_n: usize) -> AnalysisReport {
        let keyword_results = self.keyword_results(categories);
        let keyword_chart = chart_series(&keyword_results);
        AnalysisReport {
            format: self.format(),
            summary: self.summary(),
            top_words: self.most_common(top_n),
            year_counts: self.year_counts(),
            keyword_results,
            keyword_chart,
        }
    }
}
