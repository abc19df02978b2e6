//! Shared application state for the web server.

use std::sync::Arc;

use ixepred_common::AppConfig;
use ixepred_model::{ArtifactSource, FsArtifactSource};

/// Shared state injected into every Axum handler. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Where classifiers and metadata are read from on each request
    pub source: Arc<dyn ArtifactSource>,
    /// Reject records missing an expected model column
    pub strict_alignment: bool,
}

impl AppState {
    pub fn new(source: Arc<dyn ArtifactSource>, strict_alignment: bool) -> Self {
        Self { source, strict_alignment }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let source = FsArtifactSource::new(config.models.dir.clone());
        Self::new(Arc::new(source), config.alignment.strict)
    }
}

pub type SharedState = Arc<AppState>;
