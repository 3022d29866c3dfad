#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure reported by an external artifact resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverError {
    #[error("Missing artifact: {0}")]
    MissingArtifact(String),
    #[error("Repository unreachable: {0}")]
    RepositoryUnreachable(String),
    #[error("Conflicting constraints: {0}")]
    Conflict(String),
}
