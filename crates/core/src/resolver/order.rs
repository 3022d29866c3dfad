//! Deterministic ordering of provider classpath entries.

use forkpath_api::{Artifact, ArtifactSet};

/// Provider and common module artifact ids, highest priority first.
pub const PROVIDER_CLASSPATH_ORDER: &[&str] = &[
    "surefire-junit3",
    "surefire-junit4",
    "surefire-junit47",
    "surefire-testng",
    "surefire-junit-platform",
    "surefire-api",
    "surefire-logger-api",
    "common-java5",
    "common-junit3",
    "common-junit4",
    "common-junit48",
    "common-testng-utils",
];

/// An immutable priority list of artifact ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderOrder {
    ids: &'static [&'static str],
}

impl ProviderOrder {
    pub const fn new(ids: &'static [&'static str]) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &'static [&'static str] {
        self.ids
    }

    pub fn position(&self, artifact_id: &str) -> Option<usize> {
        self.ids.iter().position(|id| *id == artifact_id)
    }

    /// Reorder `artifacts`: every artifact named in the priority list first,
    /// grouped in list order, then the rest. Relative order inside each group
    /// is preserved, so applying this twice yields the same set.
    pub fn order(&self, artifacts: ArtifactSet) -> ArtifactSet {
        let mut buckets: Vec<Vec<Artifact>> = vec![Vec::new(); self.ids.len()];
        let mut unmatched = Vec::new();

        for artifact in artifacts {
            match self.position(&artifact.artifact_id) {
                Some(index) => buckets[index].push(artifact),
                None => unmatched.push(artifact),
            }
        }

        buckets.into_iter().flatten().chain(unmatched).collect()
    }
}

impl Default for ProviderOrder {
    fn default() -> Self {
        Self::new(PROVIDER_CLASSPATH_ORDER)
    }
}

/// Order with the default provider priority list.
pub fn order_provider_artifacts(artifacts: ArtifactSet) -> ArtifactSet {
    ProviderOrder::default().order(artifacts)
}
