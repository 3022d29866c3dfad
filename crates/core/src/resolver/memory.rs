//! In-memory implementation of ArtifactResolver.
//!
//! Serves a fixed artifact graph. Useful wherever a real repository is not
//! available, and as the backing store for repository manifests.

use forkpath_api::{
    Artifact, ArtifactResolver, ArtifactSet, RepositoryMode, ResolutionRequest, ResolverError,
    VersionlessId,
};
use indexmap::IndexMap;
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct Node {
    artifact: Artifact,
    dependencies: Vec<Artifact>,
    /// Not present in the local repository; needs a remote repository.
    remote_only: bool,
}

/// Thread-safe in-memory artifact graph.
#[derive(Debug)]
pub struct InMemoryArtifactResolver {
    nodes: RwLock<IndexMap<Artifact, Node>>,
}

impl InMemoryArtifactResolver {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(IndexMap::new()),
        }
    }

    /// Register an artifact available in the local repository.
    pub fn register(&self, artifact: Artifact, dependencies: Vec<Artifact>) {
        self.insert(artifact, dependencies, false);
    }

    /// Register an artifact that can only be fetched from a remote repository.
    pub fn register_remote(&self, artifact: Artifact, dependencies: Vec<Artifact>) {
        self.insert(artifact, dependencies, true);
    }

    fn insert(&self, artifact: Artifact, dependencies: Vec<Artifact>, remote_only: bool) {
        let mut nodes = self.nodes.write().unwrap();
        nodes.insert(
            artifact.clone(),
            Node {
                artifact,
                dependencies,
                remote_only,
            },
        );
    }

    /// All registered artifacts, in registration order.
    pub fn artifacts(&self) -> Vec<Artifact> {
        let nodes = self.nodes.read().unwrap();
        nodes.values().map(|n| n.artifact.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, artifact: &Artifact, mode: &RepositoryMode) -> Result<Node, ResolverError> {
        let nodes = self.nodes.read().unwrap();
        let node = nodes
            .get(artifact)
            .ok_or_else(|| ResolverError::MissingArtifact(artifact.to_string()))?;

        if node.remote_only {
            match mode {
                RepositoryMode::Offline => {
                    return Err(ResolverError::MissingArtifact(format!(
                        "{artifact} is not in the local repository and the request is offline"
                    )));
                }
                RepositoryMode::Remote(repositories) if repositories.is_empty() => {
                    return Err(ResolverError::RepositoryUnreachable(format!(
                        "no remote repository configured for {artifact}"
                    )));
                }
                RepositoryMode::Remote(_) => {}
            }
        }

        Ok(node.clone())
    }

    fn materialize(node: &Node, requested: &Artifact, local_repository: &Path) -> Artifact {
        let mut artifact = node.artifact.clone();
        if artifact.scope.is_none() {
            artifact.scope = requested.scope.clone();
        }
        if artifact.file.is_none() {
            artifact.file = Some(local_repository.join(artifact.repository_path()));
        }
        let version = artifact.version.clone();
        artifact.with_selected_version(version)
    }
}

impl Default for InMemoryArtifactResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactResolver for InMemoryArtifactResolver {
    /// Breadth-first closure starting at the requested artifact. The first
    /// artifact reached for a versionless id wins.
    fn resolve(&self, request: &ResolutionRequest) -> Result<ArtifactSet, ResolverError> {
        let root = self.lookup(&request.artifact, &request.mode)?;

        let mut resolved = ArtifactSet::new();
        let mut seen: HashSet<VersionlessId> = HashSet::new();
        let mut queue: VecDeque<(Node, Artifact)> = VecDeque::new();

        seen.insert(request.artifact.versionless_id());
        queue.push_back((root, request.artifact.clone()));

        while let Some((node, requested)) = queue.pop_front() {
            resolved.insert(Self::materialize(&node, &requested, &request.local_repository));

            if !request.resolve_transitively {
                break;
            }

            for dependency in &node.dependencies {
                if !seen.insert(dependency.versionless_id()) {
                    continue;
                }
                let child = self.lookup(dependency, &request.mode)?;
                queue.push_back((child, dependency.clone()));
            }
        }

        Ok(resolved)
    }
}
