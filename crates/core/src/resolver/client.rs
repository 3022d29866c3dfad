use crate::config::ResolverConfig;
use crate::error::{ForkpathError, Result};
use forkpath_api::{
    Artifact, ArtifactResolver, ArtifactSet, Dependency, RemoteRepository, ResolutionRequest,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::trace;

/// Call boundary to the external resolver.
///
/// Every entry point sends a transitive request for one artifact. A missing
/// repository list turns the request offline.
pub struct ResolutionClient {
    resolver: Arc<dyn ArtifactResolver>,
    local_repository: PathBuf,
    plugin_repositories: Option<Vec<RemoteRepository>>,
    project_repositories: Option<Vec<RemoteRepository>>,
}

impl ResolutionClient {
    pub fn new(
        resolver: Arc<dyn ArtifactResolver>,
        local_repository: PathBuf,
        plugin_repositories: Option<Vec<RemoteRepository>>,
        project_repositories: Option<Vec<RemoteRepository>>,
    ) -> Self {
        Self {
            resolver,
            local_repository,
            plugin_repositories,
            project_repositories,
        }
    }

    pub fn from_config(resolver: Arc<dyn ArtifactResolver>, config: &ResolverConfig) -> Self {
        Self::new(
            resolver,
            config.local_repository.clone(),
            config.plugin_repositories(),
            config.project_repositories(),
        )
    }

    pub fn resolve_plugin_artifact(&self, artifact: &Artifact) -> Result<ArtifactSet> {
        self.resolve(artifact, self.plugin_repositories.as_deref())
    }

    pub fn resolve_project_artifact(&self, artifact: &Artifact) -> Result<ArtifactSet> {
        self.resolve(artifact, self.project_repositories.as_deref())
    }

    pub fn resolve_plugin_artifact_offline(&self, artifact: &Artifact) -> Result<ArtifactSet> {
        self.resolve(artifact, None)
    }

    pub fn create_dependency_artifact(&self, dependency: &Dependency) -> Artifact {
        self.resolver.create_dependency_artifact(dependency)
    }

    fn resolve(
        &self,
        artifact: &Artifact,
        repositories: Option<&[RemoteRepository]>,
    ) -> Result<ArtifactSet> {
        let request = ResolutionRequest::new(artifact.clone(), self.local_repository.clone())
            .transitively(true)
            .with_repositories(repositories);

        trace!(
            "Resolving {} ({})",
            artifact,
            if request.mode.is_offline() {
                "offline"
            } else {
                "remote"
            }
        );

        self.resolver
            .resolve(&request)
            .map_err(|e| ForkpathError::resolution(artifact, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forkpath_api::{RepositoryMode, ResolverError};
    use std::sync::Mutex;

    /// Records every request and answers with the requested artifact only.
    #[derive(Default)]
    struct RecordingResolver {
        requests: Mutex<Vec<ResolutionRequest>>,
        fail: bool,
    }

    impl ArtifactResolver for RecordingResolver {
        fn resolve(&self, request: &ResolutionRequest) -> std::result::Result<ArtifactSet, ResolverError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(ResolverError::MissingArtifact(request.artifact.to_string()));
            }
            Ok(ArtifactSet::from_iter([request.artifact.clone()]))
        }
    }

    fn client(resolver: Arc<RecordingResolver>) -> ResolutionClient {
        ResolutionClient::new(
            resolver,
            PathBuf::from("/repo"),
            Some(vec![RemoteRepository::new("plugins", "https://plugins.example")]),
            Some(vec![RemoteRepository::new("project", "https://project.example")]),
        )
    }

    #[test]
    fn test_entry_points_select_repository_mode() {
        let resolver = Arc::new(RecordingResolver::default());
        let client = client(resolver.clone());
        let artifact = Artifact::new("org.example", "lib", "1.0");

        client.resolve_plugin_artifact(&artifact).unwrap();
        client.resolve_project_artifact(&artifact).unwrap();
        client.resolve_plugin_artifact_offline(&artifact).unwrap();

        let requests = resolver.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.resolve_transitively));
        assert!(requests.iter().all(|r| r.local_repository == PathBuf::from("/repo")));
        assert_eq!(
            requests[0].mode,
            RepositoryMode::Remote(vec![RemoteRepository::new("plugins", "https://plugins.example")])
        );
        assert_eq!(
            requests[1].mode,
            RepositoryMode::Remote(vec![RemoteRepository::new("project", "https://project.example")])
        );
        assert_eq!(requests[2].mode, RepositoryMode::Offline);
    }

    #[test]
    fn test_missing_repositories_mean_offline() {
        let resolver = Arc::new(RecordingResolver::default());
        let client = ResolutionClient::new(resolver.clone(), PathBuf::from("/repo"), None, None);

        client
            .resolve_plugin_artifact(&Artifact::new("org.example", "lib", "1.0"))
            .unwrap();

        assert!(resolver.requests.lock().unwrap()[0].mode.is_offline());
    }

    #[test]
    fn test_failure_carries_requested_artifact() {
        let resolver = Arc::new(RecordingResolver {
            fail: true,
            ..Default::default()
        });
        let client = client(resolver.clone());
        let artifact = Artifact::new("org.example", "missing", "1.0");

        let err = client.resolve_plugin_artifact(&artifact).unwrap_err();
        assert_eq!(err.failed_artifact(), Some(&artifact));
        // Not retried
        assert_eq!(resolver.requests.lock().unwrap().len(), 1);
    }
}
