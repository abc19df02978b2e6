//! Where model artifacts and the metadata document come from.
//!
//! Nothing is cached: every call reads again, so each calculation sees the
//! files as they are on disk at that moment.

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

use ixepred_common::{IxepredError, Result};
use crate::artifact::ModelArtifact;
use crate::endpoint::Endpoint;
use crate::metadata::{MetadataDocument, METADATA_FILE};

pub trait ArtifactSource: Send + Sync {
    /// Load the classifier for `endpoint`. Absent or corrupt artifacts are
    /// reported as `ArtifactNotFound`.
    fn load_model(&self, endpoint: Endpoint) -> Result<ModelArtifact>;

    /// Load the metadata document; `Ok(None)` when it does not exist.
    fn load_metadata(&self) -> Result<Option<MetadataDocument>>;
}

/// Reads artifacts from a directory using the fixed file names.
#[derive(Debug, Clone)]
pub struct FsArtifactSource {
    dir: PathBuf,
}

impl FsArtifactSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn model_path(&self, endpoint: Endpoint) -> PathBuf {
        self.dir.join(endpoint.artifact_file_name())
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(METADATA_FILE)
    }
}

impl ArtifactSource for FsArtifactSource {
    fn load_model(&self, endpoint: Endpoint) -> Result<ModelArtifact> {
        let path = self.model_path(endpoint);
        let content = std::fs::read_to_string(&path).map_err(|e| IxepredError::ArtifactNotFound {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let artifact = ModelArtifact::from_json_str(&content).map_err(|e| IxepredError::ArtifactNotFound {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        info!(
            endpoint = %endpoint,
            features = artifact.feature_names().len(),
            "Loaded model artifact from {}", path.display()
        );
        Ok(artifact)
    }

    fn load_metadata(&self) -> Result<Option<MetadataDocument>> {
        let path = self.metadata_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let doc = MetadataDocument::from_json_str(&content)
            .map_err(|e| IxepredError::Metadata(format!("{}: {e}", path.display())))?;
        debug!("Loaded metadata document from {}", path.display());
        Ok(Some(doc))
    }
}

/// Holds artifact documents in memory; used for fixtures and embedding.
///
/// Documents are stored as JSON text and decoded on every load, so corrupt
/// fixtures fail the same way a corrupt file would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactSource {
    models: HashMap<Endpoint, String>,
    metadata: Option<String>,
}

impl InMemoryArtifactSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, endpoint: Endpoint, json: impl Into<String>) -> Self {
        self.models.insert(endpoint, json.into());
        self
    }

    pub fn with_metadata(mut self, json: impl Into<String>) -> Self {
        self.metadata = Some(json.into());
        self
    }
}

impl ArtifactSource for InMemoryArtifactSource {
    fn load_model(&self, endpoint: Endpoint) -> Result<ModelArtifact> {
        let path = PathBuf::from(endpoint.artifact_file_name());
        let json = self.models.get(&endpoint).ok_or_else(|| IxepredError::ArtifactNotFound {
            path: path.clone(),
            reason: "not registered".to_string(),
        })?;
        ModelArtifact::from_json_str(json).map_err(|e| IxepredError::ArtifactNotFound {
            path,
            reason: e.to_string(),
        })
    }

    fn load_metadata(&self) -> Result<Option<MetadataDocument>> {
        self.metadata
            .as_deref()
            .map(MetadataDocument::from_json_str)
            .transpose()
    }
}
