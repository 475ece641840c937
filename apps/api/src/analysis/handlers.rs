use std::borrow::Cow;

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::analyzer::{AnalysisReport, CvAnalysis};
use crate::analysis::keywords::KeywordCategory;
use crate::analysis::AnalysisConfig;
use crate::config::split_list;
use crate::errors::AppError;
use crate::extraction::DocumentReader;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

/// A received upload plus its per-request options.
#[derive(Debug)]
struct Upload {
    file_name: String,
    bytes: Bytes,
    extra_stopwords: Vec<String>,
    top_n: Option<usize>,
}

/// POST /api/v1/analyze
///
/// Multipart fields: `file` (required), `stopwords` (comma-separated extras),
/// `top_n` (size of the top-words list).
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    info!(
        "Analyzing '{}' ({} bytes)",
        upload.file_name,
        upload.bytes.len()
    );

    let analysis = state.analysis.clone();
    let reader = state.reader.clone();
    let report = tokio::task::spawn_blocking(move || analyze_upload(upload, &reader, &analysis))
        .await
        .context("analysis task did not complete")??;

    Ok(Json(AnalyzeResponse {
        success: true,
        report,
    }))
}

/// GET /api/v1/keywords
pub async fn handle_keyword_categories(
    State(state): State<AppState>,
) -> Json<Vec<KeywordCategory>> {
    Json(state.analysis.categories.clone())
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut extra_stopwords = Vec::new();
    let mut top_n = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                file = Some((file_name, bytes));
            }
            Some("stopwords") => extra_stopwords = split_list(&field.text().await?),
            Some("top_n") => {
                let raw = field.text().await?;
                let n = raw.trim().parse::<usize>().map_err(|_| {
                    AppError::Validation(format!("top_n must be a non-negative integer, got '{raw}'"))
                })?;
                top_n = Some(n);
            }
            _ => {}
        }
    }

    let (raw_name, bytes) = file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    let file_name = sanitize_file_name(&raw_name)?;

    Ok(Upload {
        file_name,
        bytes,
        extra_stopwords,
        top_n,
    })
}

/// Stores the upload in a private temporary directory under its own name, so
/// the extension drives format dispatch and the summary shows the real file
/// name. The directory is removed when this returns.
fn analyze_upload(
    upload: Upload,
    reader: &DocumentReader,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AppError> {
    let dir = tempfile::tempdir().context("cannot create upload directory")?;
    let path = dir.path().join(&upload.file_name);
    std::fs::write(&path, &upload.bytes).context("cannot store upload")?;

    let stopwords = if upload.extra_stopwords.is_empty() {
        Cow::Borrowed(&config.stopwords)
    } else {
        Cow::Owned(config.stopwords.with_extra(&upload.extra_stopwords))
    };

    let analysis = CvAnalysis::from_path(&path, reader, &stopwords)?;
    Ok(analysis.report(
        &config.categories,
        upload.top_n.unwrap_or(config.top_words),
    ))
}

/// Longest file name common filesystems accept, in bytes.
const MAX_FILE_NAME_BYTES: usize = 255;

/// Last path component of a client-supplied file name. Rejects names with
/// nothing usable left and names the upload directory could not hold.
fn sanitize_file_name(raw: &str) -> Result<String, AppError> {
    let name = raw
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    match name {
        "" | "." | ".." => Err(AppError::Validation("No file selected".to_string())),
        _ if name.len() > MAX_FILE_NAME_BYTES => Err(AppError::Validation(format!(
            "File name is longer than {MAX_FILE_NAME_BYTES} bytes"
        ))),
        _ => Ok(name.to_string()),
    }
}
