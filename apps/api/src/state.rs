use std::sync::Arc;

use crate::analysis::AnalysisConfig;
use crate::config::Config;
use crate::extraction::DocumentReader;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything behind the `Arc`s is read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analysis: Arc<AnalysisConfig>,
    pub reader: Arc<DocumentReader>,
}

impl AppState {
    pub fn new(config: Config, analysis: AnalysisConfig) -> Self {
        Self {
            config,
            analysis: Arc::new(analysis),
            reader: Arc::new(DocumentReader::default()),
        }
    }
}
