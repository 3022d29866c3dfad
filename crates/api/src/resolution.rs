//! Boundary to the external artifact resolver.
//!
//! The resolver itself (network access, local cache layout, conflict
//! resolution) lives outside this workspace. Callers describe what they need
//! with a [`ResolutionRequest`] and receive an ordered [`ArtifactSet`].

use crate::error::ResolverError;
use crate::models::{Artifact, Dependency};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Insertion-ordered artifact set, in resolver traversal order.
pub type ArtifactSet = IndexSet<Artifact>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteRepository {
    pub id: String,
    pub url: String,
}

impl RemoteRepository {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }

    pub fn central() -> Self {
        Self::new("central", "https://repo.maven.apache.org/maven2")
    }
}

/// Where the resolver may look for artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryMode {
    /// Local cache only.
    Offline,
    Remote(Vec<RemoteRepository>),
}

impl RepositoryMode {
    pub fn is_offline(&self) -> bool {
        matches!(self, RepositoryMode::Offline)
    }
}

#[derive(Debug, Clone)]
pub struct ResolutionRequest {
    pub artifact: Artifact,
    pub local_repository: PathBuf,
    pub resolve_transitively: bool,
    pub mode: RepositoryMode,
}

impl ResolutionRequest {
    pub fn new(artifact: Artifact, local_repository: PathBuf) -> Self {
        Self {
            artifact,
            local_repository,
            resolve_transitively: false,
            mode: RepositoryMode::Offline,
        }
    }

    pub fn transitively(mut self, resolve_transitively: bool) -> Self {
        self.resolve_transitively = resolve_transitively;
        self
    }

    /// `None` marks the request offline.
    pub fn with_repositories(mut self, repositories: Option<&[RemoteRepository]>) -> Self {
        self.mode = match repositories {
            Some(repositories) => RepositoryMode::Remote(repositories.to_vec()),
            None => RepositoryMode::Offline,
        };
        self
    }
}

/// External resolution service.
pub trait ArtifactResolver {
    /// Resolve the requested artifact (and its closure when requested
    /// transitively). The requested artifact itself comes first.
    fn resolve(&self, request: &ResolutionRequest) -> Result<ArtifactSet, ResolverError>;

    /// Turn a dependency descriptor into an unresolved artifact handle.
    fn create_dependency_artifact(&self, dependency: &Dependency) -> Artifact {
        Artifact::from(dependency)
    }
}
