//! PDF text extraction as an ordered chain of strategies.
//!
//! Default chain: `pdf-extract` first, `lopdf` as fallback. A strategy that
//! errors, panics or yields only whitespace hands over to the next one. The
//! last strategy's outcome is final, blank text included.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

use crate::extraction::{display_name, ExtractionError};

/// One way of pulling text out of a PDF.
pub trait PdfStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Text of every page in page order. `None` marks a page with no
    /// extractable text and is read as an empty page.
    fn extract_pages(&self, path: &Path) -> Result<Vec<Option<String>>>;
}

/// Primary tier: the `pdf-extract` crate, page by page.
pub struct PdfExtractStrategy;

impl PdfStrategy for PdfExtractStrategy {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<Option<String>>> {
        let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| anyhow!("{e}"))?;
        Ok(pages.into_iter().map(Some).collect())
    }
}

/// Fallback tier: `lopdf` content-stream text extraction.
pub struct LopdfStrategy;

impl PdfStrategy for LopdfStrategy {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<Option<String>>> {
        let document = lopdf::Document::load(path).map_err(|e| anyhow!("{e}"))?;
        let pages = document
            .get_pages()
            .keys()
            .map(|&page_number| match document.extract_text(&[page_number]) {
                Ok(text) => Some(text),
                Err(e) => {
                    debug!("lopdf: page {page_number} has no extractable text: {e}");
                    None
                }
            })
            .collect();
        Ok(pages)
    }
}

/// Runs [`PdfStrategy`]s in order until one produces non-blank text.
pub struct PdfExtractor {
    strategies: Vec<Box<dyn PdfStrategy>>,
}

impl PdfExtractor {
    pub fn new(strategies: Vec<Box<dyn PdfStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let file = display_name(path);
        let mut outcome = Err(ExtractionError::ExtractionFailed {
            file: file.clone(),
            stage: "pdf",
            message: "no extraction strategies configured".to_string(),
        });

        for strategy in &self.strategies {
            match run_guarded(strategy.as_ref(), path) {
                Ok(pages) => {
                    let text = join_pages(pages);
                    if !text.trim().is_empty() {
                        debug!("{}: extracted {} chars from '{file}'", strategy.name(), text.len());
                        return Ok(text);
                    }
                    warn!("{} produced no text for '{file}'", strategy.name());
                    outcome = Ok(text);
                }
                Err(e) => {
                    warn!("{} failed on '{file}': {e:#}", strategy.name());
                    outcome = Err(ExtractionError::ExtractionFailed {
                        file: file.clone(),
                        stage: strategy.name(),
                        message: format!("{e:#}"),
                    });
                }
            }
        }

        outcome
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(vec![Box::new(PdfExtractStrategy), Box::new(LopdfStrategy)])
    }
}

/// Some malformed PDFs make extractors panic; that counts as a failed tier.
fn run_guarded(strategy: &dyn PdfStrategy, path: &Path) -> Result<Vec<Option<String>>> {
    catch_unwind(AssertUnwindSafe(|| strategy.extract_pages(path))).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(anyhow!("extractor panicked: {reason}"))
    })
}

fn join_pages(pages: Vec<Option<String>>) -> String {
    pages
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Fixed(Vec<Option<&'static str>>, Arc<AtomicUsize>);

    impl Fixed {
        fn new(pages: Vec<Option<&'static str>>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (Self(pages, calls.clone()), calls)
        }
    }

    impl PdfStrategy for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn extract_pages(&self, _path: &Path) -> Result<Vec<Option<String>>> {
            self.1.fetch_add(1, Ordering::SeqCst);
            Ok(self.0.iter().map(|p| p.map(String::from)).collect())
        }
    }

    struct Failing(&'static str);

    impl PdfStrategy for Failing {
        fn name(&self) -> &'static str {
            self.0
        }
        fn extract_pages(&self, _path: &Path) -> Result<Vec<Option<String>>> {
            Err(anyhow!("{} cannot read this file", self.0))
        }
    }

    struct Panicking;

    impl PdfStrategy for Panicking {
        fn name(&self) -> &'static str {
            "panicking"
        }
        fn extract_pages(&self, _path: &Path) -> Result<Vec<Option<String>>> {
            panic!("unexpected operator")
        }
    }

    fn path() -> &'static Path {
        Path::new("cv.pdf")
    }

    #[test]
    fn test_primary_text_used_without_fallback() {
        let (primary, _) = Fixed::new(vec![Some("Page one"), Some("Page two")]);
        let (fallback, fallback_calls) = Fixed::new(vec![Some("other")]);
        let extractor = PdfExtractor::new(vec![Box::new(primary), Box::new(fallback)]);

        assert_eq!(extractor.extract(path()).unwrap(), "Page one\nPage two");
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_whitespace_only_primary_falls_back() {
        let (primary, _) = Fixed::new(vec![Some("  "), None, Some("\n\t")]);
        let (fallback, fallback_calls) = Fixed::new(vec![Some("Jane Doe"), Some("Rust")]);
        let extractor = PdfExtractor::new(vec![Box::new(primary), Box::new(fallback)]);

        assert_eq!(extractor.extract(path()).unwrap(), "Jane Doe\nRust");
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_primary_error_falls_back_silently() {
        let (fallback, _) = Fixed::new(vec![Some("Recovered")]);
        let extractor = PdfExtractor::new(vec![Box::new(Failing("primary")), Box::new(fallback)]);
        assert_eq!(extractor.extract(path()).unwrap(), "Recovered");
    }

    #[test]
    fn test_primary_panic_falls_back() {
        let (fallback, _) = Fixed::new(vec![Some("Recovered")]);
        let extractor = PdfExtractor::new(vec![Box::new(Panicking), Box::new(fallback)]);
        assert_eq!(extractor.extract(path()).unwrap(), "Recovered");
    }

    #[test]
    fn test_missing_pages_read_as_empty() {
        let (primary, _) = Fixed::new(vec![Some("first"), None, Some("third")]);
        let extractor = PdfExtractor::new(vec![Box::new(primary)]);
        assert_eq!(extractor.extract(path()).unwrap(), "first\n\nthird");
    }

    #[test]
    fn test_blank_fallback_output_is_returned() {
        let (primary, _) = Fixed::new(vec![Some(" ")]);
        let (fallback, _) = Fixed::new(vec![None, None]);
        let extractor = PdfExtractor::new(vec![Box::new(primary), Box::new(fallback)]);
        assert_eq!(extractor.extract(path()).unwrap(), "\n");
    }

    #[test]
    fn test_both_tiers_failing_reports_last_error() {
        let extractor =
            PdfExtractor::new(vec![Box::new(Failing("primary")), Box::new(Failing("secondary"))]);
        match extractor.extract(path()) {
            Err(ExtractionError::ExtractionFailed {
                file,
                stage,
                message,
            }) => {
                assert_eq!(file, "cv.pdf");
                assert_eq!(stage, "secondary");
                assert!(message.contains("secondary cannot read"));
            }
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_chain_fails() {
        let extractor = PdfExtractor::new(vec![]);
        assert!(matches!(
            extractor.extract(path()),
            Err(ExtractionError::ExtractionFailed { stage: "pdf", .. })
        ));
    }

    #[test]
    fn test_default_chain_order() {
        assert_eq!(
            PdfExtractor::default().strategy_names(),
            vec!["pdf-extract", "lopdf"]
        );
    }

    #[test]
    fn test_corrupt_file_fails_both_default_tiers() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.pdf");
        std::fs::write(&file, b"this is not a pdf").unwrap();

        let err = PdfExtractor::default().extract(&file).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::ExtractionFailed { stage: "lopdf", .. }
        ));
        assert!(err.to_string().contains("broken.pdf"));
    }
}
