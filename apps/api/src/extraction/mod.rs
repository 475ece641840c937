//! Document Reader — turns an uploaded file into raw text.
//!
//! Dispatches on the (case-insensitive) file extension. PDFs go through the
//! [`pdf::PdfExtractor`] chain, DOCX through [`docx::extract_docx`], and text
//! plus anything unrecognised is read as lossy UTF-8. The returned text is a
//! faithful transcript: nothing is trimmed or normalized here.

pub mod docx;
pub mod pdf;
pub mod plain;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::pdf::PdfExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
    Unknown,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::Docx,
            Some("txt") => Self::Txt,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not read '{file}': {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Text extraction failed for '{file}' ({stage}): {message}")]
    ExtractionFailed {
        file: String,
        stage: &'static str,
        message: String,
    },
}

impl ExtractionError {
    pub fn file(&self) -> &str {
        match self {
            ExtractionError::Io { file, .. } | ExtractionError::ExtractionFailed { file, .. } => {
                file
            }
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            ExtractionError::Io { .. } => "read",
            ExtractionError::ExtractionFailed { stage, .. } => *stage,
        }
    }
}

/// A document whose text has been extracted. The text never changes afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub format: DocumentFormat,
    raw_text: String,
}

impl Document {
    pub fn new(file_name: impl Into<String>, format: DocumentFormat, raw_text: String) -> Self {
        Self {
            file_name: file_name.into(),
            format,
            raw_text,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

pub struct DocumentReader {
    pdf: PdfExtractor,
}

impl DocumentReader {
    pub fn new(pdf: PdfExtractor) -> Self {
        Self { pdf }
    }

    pub fn pdf_strategy_names(&self) -> Vec<&'static str> {
        self.pdf.strategy_names()
    }

    /// Extracts the text of `path` once and wraps it in a [`Document`].
    pub fn load(&self, path: &Path) -> Result<Document, ExtractionError> {
        let format = DocumentFormat::from_path(path);
        let raw_text = self.read(path)?;
        debug!(
            "Read {} chars from '{}' ({format:?})",
            raw_text.chars().count(),
            display_name(path)
        );
        Ok(Document::new(display_name(path), format, raw_text))
    }

    /// Raw text of `path`.
    ///
    /// Unknown extensions never fail: an unreadable file yields empty text.
    pub fn read(&self, path: &Path) -> Result<String, ExtractionError> {
        match DocumentFormat::from_path(path) {
            DocumentFormat::Pdf => self.pdf.extract(path),
            DocumentFormat::Docx => {
                docx::extract_docx(path).map_err(|e| ExtractionError::ExtractionFailed {
                    file: display_name(path),
                    stage: "docx",
                    message: format!("{e:#}"),
                })
            }
            DocumentFormat::Txt => plain::read_lossy(path).map_err(|source| ExtractionError::Io {
                file: display_name(path),
                source,
            }),
            DocumentFormat::Unknown => match plain::read_lossy(path) {
                Ok(text) => Ok(text),
                Err(e) => {
                    warn!(
                        "Unsupported file '{}' could not be read as text: {e}",
                        display_name(path)
                    );
                    Ok(String::new())
                }
            },
        }
    }
}

impl Default for DocumentReader {
    fn default() -> Self {
        Self::new(PdfExtractor::default())
    }
}

/// Base name of `path` for messages and summaries.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
