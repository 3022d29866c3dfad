//! JSON description of an artifact graph.
//!
//! ```json
//! {
//!   "artifacts": [
//!     {
//!       "coordinates": "org.apache.maven.surefire:surefire-junit4:3.0.0",
//!       "dependencies": ["org.apache.maven.surefire:common-junit4:3.0.0"],
//!       "file": "/opt/jars/surefire-junit4-3.0.0.jar"
//!     }
//!   ]
//! }
//! ```

use super::memory::InMemoryArtifactResolver;
use crate::error::{ForkpathError, Result};
use forkpath_api::Artifact;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RepositoryManifest {
    #[serde(default)]
    pub artifacts: Vec<ManifestEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ManifestEntry {
    /// `groupId:artifactId:version[:type[:classifier]]`
    pub coordinates: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub remote_only: bool,
}

impl RepositoryManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Build a resolver serving exactly the artifacts listed here.
    pub fn into_resolver(self) -> Result<InMemoryArtifactResolver> {
        let resolver = InMemoryArtifactResolver::new();
        for entry in self.artifacts {
            let mut artifact = parse(&entry.coordinates)?;
            artifact.scope = entry.scope;
            artifact.file = entry.file;

            let dependencies = entry
                .dependencies
                .iter()
                .map(|d| parse(d))
                .collect::<Result<Vec<_>>>()?;

            if entry.remote_only {
                resolver.register_remote(artifact, dependencies);
            } else {
                resolver.register(artifact, dependencies);
            }
        }
        Ok(resolver)
    }
}

fn parse(coordinates: &str) -> Result<Artifact> {
    Artifact::parse_coordinates(coordinates).map_err(|e| ForkpathError::Manifest(e.to_string()))
}
