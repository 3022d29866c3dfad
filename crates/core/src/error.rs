use forkpath_api::{Artifact, ResolverError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForkpathError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to resolve {artifact}: {source}")]
    Resolution {
        artifact: Box<Artifact>,
        #[source]
        source: ResolverError,
    },
    #[error("Invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
    #[error("Invalid repository manifest: {0}")]
    Manifest(String),
}

impl ForkpathError {
    pub fn resolution(artifact: &Artifact, source: ResolverError) -> Self {
        ForkpathError::Resolution {
            artifact: Box::new(artifact.clone()),
            source,
        }
    }

    /// The artifact whose resolution failed, if this is a resolution error.
    pub fn failed_artifact(&self) -> Option<&Artifact> {
        match self {
            ForkpathError::Resolution { artifact, .. } => Some(artifact.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ForkpathError>;
