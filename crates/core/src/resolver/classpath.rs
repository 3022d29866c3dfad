//! Provider classpath assembly.
//!
//! A provider is resolved from the plugin repositories like any other
//! artifact, then ordered so that provider and common modules lead the
//! classpath. When provider artifacts are added on top of an already running
//! plugin, shared API modules are pinned to the instance the plugin itself
//! loaded (the anchors) no matter which transitive path reintroduced them.

use super::client::ResolutionClient;
use super::order::ProviderOrder;
use crate::error::Result;
use forkpath_api::{Artifact, ArtifactSet, Dependency, SCOPE_TEST, VersionlessId};
use indexmap::IndexMap;
use tracing::{Level, debug, enabled};

pub const PROVIDER_GROUP_ID: &str = "org.apache.maven.surefire";

/// Canonical artifacts keyed by versionless id.
#[derive(Debug, Clone, Default)]
pub struct AnchorArtifacts {
    anchors: IndexMap<VersionlessId, Artifact>,
}

impl AnchorArtifacts {
    pub fn new(anchors: impl IntoIterator<Item = Artifact>) -> Self {
        Self {
            anchors: anchors
                .into_iter()
                .map(|anchor| (anchor.versionless_id(), anchor))
                .collect(),
        }
    }

    /// The common, api and logger-api modules the plugin was loaded with.
    pub fn surefire(common: Artifact, api: Artifact, logger_api: Artifact) -> Self {
        Self::new([common, api, logger_api])
    }

    pub fn get(&self, id: &VersionlessId) -> Option<&Artifact> {
        self.anchors.get(id)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    fn canonical<'a>(&'a self, artifact: &'a Artifact) -> &'a Artifact {
        self.anchors
            .get(&artifact.versionless_id())
            .unwrap_or(artifact)
    }
}

pub struct ProviderClasspathAssembler {
    client: ResolutionClient,
    order: ProviderOrder,
    plugin_name: String,
}

impl ProviderClasspathAssembler {
    pub fn new(client: ResolutionClient, plugin_name: impl Into<String>) -> Self {
        Self {
            client,
            order: ProviderOrder::default(),
            plugin_name: plugin_name.into(),
        }
    }

    pub fn with_order(mut self, order: ProviderOrder) -> Self {
        self.order = order;
        self
    }

    pub fn client(&self) -> &ResolutionClient {
        &self.client
    }

    /// Resolve `org.apache.maven.surefire:<provider_artifact_id>:<provider_version>`
    /// with its transitive closure, in provider order.
    pub fn get_provider_classpath(
        &self,
        provider_artifact_id: &str,
        provider_version: &str,
    ) -> Result<ArtifactSet> {
        let provider = to_provider_dependency(provider_artifact_id, provider_version);
        let provider_artifact = self.client.create_dependency_artifact(&provider);

        let resolved = self.client.resolve_plugin_artifact(&provider_artifact)?;

        if enabled!(Level::DEBUG) {
            for artifact in &resolved {
                let path = artifact
                    .file()
                    .map(|f| {
                        std::path::absolute(f)
                            .unwrap_or_else(|_| f.to_path_buf())
                            .display()
                            .to_string()
                    })
                    .unwrap_or_else(|| "<unresolved>".to_string());
                debug!(
                    "Adding to {} test classpath: {} Scope: {}",
                    self.plugin_name,
                    path,
                    artifact.scope.as_deref().unwrap_or("")
                );
            }
        }

        Ok(self.order.order(resolved))
    }

    /// Same as [`Self::get_provider_classpath`], keyed by versionless id.
    /// A later artifact with the same id replaces the earlier value.
    pub fn get_provider_classpath_as_map(
        &self,
        provider_artifact_id: &str,
        provider_version: &str,
    ) -> Result<IndexMap<VersionlessId, Artifact>> {
        let classpath = self.get_provider_classpath(provider_artifact_id, provider_version)?;
        Ok(artifact_map_by_versionless_id(classpath))
    }

    /// Collect the plugin artifacts that the running plugin does not already
    /// carry, together with the anchors their dependencies need.
    ///
    /// Any artifact sharing a versionless id with an anchor is replaced by the
    /// anchor, so the result holds at most one copy of each anchor module.
    pub fn add_provider_to_classpath(
        &self,
        plugin_artifact_map: &IndexMap<VersionlessId, Artifact>,
        mojo_plugin_artifact: &Artifact,
        anchors: &AnchorArtifacts,
    ) -> Result<ArtifactSet> {
        let plugin_closure = self.client.resolve_plugin_artifact(mojo_plugin_artifact)?;

        let mut provider_artifacts = ArtifactSet::new();
        for artifact in plugin_artifact_map.values() {
            if plugin_closure.contains(artifact) {
                continue;
            }

            provider_artifacts.insert(anchors.canonical(artifact).clone());

            for dependency in self.client.resolve_plugin_artifact(artifact)? {
                if let Some(anchor) = anchors.get(&dependency.versionless_id()) {
                    debug!("Pinning {} to anchor {}", dependency, anchor);
                    provider_artifacts.insert(anchor.clone());
                }
            }
        }

        Ok(self.order.order(provider_artifacts))
    }
}

/// Key artifacts by `groupId:artifactId`; later entries win.
pub fn artifact_map_by_versionless_id(
    artifacts: impl IntoIterator<Item = Artifact>,
) -> IndexMap<VersionlessId, Artifact> {
    let mut map = IndexMap::new();
    for artifact in artifacts {
        map.insert(artifact.versionless_id(), artifact);
    }
    map
}

fn to_provider_dependency(provider_artifact_id: &str, provider_version: &str) -> Dependency {
    Dependency {
        group_id: PROVIDER_GROUP_ID.to_string(),
        artifact_id: provider_artifact_id.to_string(),
        version: provider_version.to_string(),
        artifact_type: "jar".to_string(),
        classifier: None,
        scope: Some(SCOPE_TEST.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_dependency_descriptor() {
        let dependency = to_provider_dependency("surefire-junit4", "3.0.0");
        assert_eq!(dependency.group_id, PROVIDER_GROUP_ID);
        assert_eq!(dependency.artifact_id, "surefire-junit4");
        assert_eq!(dependency.version, "3.0.0");
        assert_eq!(dependency.artifact_type, "jar");
        assert_eq!(dependency.scope.as_deref(), Some(SCOPE_TEST));
    }

    #[test]
    fn test_map_by_versionless_id_later_wins() {
        let first = Artifact::new("org.example", "lib", "1.0");
        let other = Artifact::new("org.example", "other", "1.0");
        let second = Artifact::new("org.example", "lib", "2.0");

        let map = artifact_map_by_versionless_id([first, other, second]);

        assert_eq!(map.len(), 2);
        let (first_key, first_value) = map.get_index(0).unwrap();
        assert_eq!(first_key, &VersionlessId::new("org.example", "lib"));
        assert_eq!(first_value.version, "2.0");
    }

    #[test]
    fn test_anchor_canonical_replaces_same_module() {
        let anchor = Artifact::new(PROVIDER_GROUP_ID, "surefire-api", "3.0.0");
        let anchors = AnchorArtifacts::new([anchor.clone()]);

        let stray = Artifact::new(PROVIDER_GROUP_ID, "surefire-api", "2.22.2");
        assert_eq!(anchors.canonical(&stray), &anchor);

        let unrelated = Artifact::new("junit", "junit", "4.13.2");
        assert_eq!(anchors.canonical(&unrelated), &unrelated);
    }
}
