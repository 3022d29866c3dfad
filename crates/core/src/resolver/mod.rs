//! Artifact resolution and provider classpath assembly.

pub mod classpath;
pub mod client;
pub mod manifest;
pub mod memory;
pub mod order;

pub use classpath::{
    AnchorArtifacts, PROVIDER_GROUP_ID, ProviderClasspathAssembler, artifact_map_by_versionless_id,
};
pub use client::ResolutionClient;
pub use manifest::RepositoryManifest;
pub use memory::InMemoryArtifactResolver;
pub use order::{PROVIDER_CLASSPATH_ORDER, ProviderOrder, order_provider_artifacts};
