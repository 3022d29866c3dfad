pub mod error;
pub mod filter;
pub mod models;
pub mod resolution;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ResolverError};
pub use filter::{AcceptAll, TestFilter};
pub use models::*;
pub use resolution::{
    ArtifactResolver, ArtifactSet, RemoteRepository, RepositoryMode, ResolutionRequest,
};
