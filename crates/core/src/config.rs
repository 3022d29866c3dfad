//! Resolver settings, read from a JSON file.
//!
//! ```json
//! {
//!   "local_repository": "/home/me/.m2/repository",
//!   "plugin_repositories": [{ "id": "central", "url": "https://repo.maven.apache.org/maven2" }],
//!   "project_repositories": [],
//!   "offline": false,
//!   "plugin_name": "surefire"
//! }
//! ```

use crate::error::{ForkpathError, Result};
use forkpath_api::RemoteRepository;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverConfig {
    pub local_repository: PathBuf,
    pub plugin_repositories: Vec<RemoteRepository>,
    pub project_repositories: Vec<RemoteRepository>,
    /// Resolve from the local repository only.
    pub offline: bool,
    /// Name used when reporting classpath entries.
    pub plugin_name: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            local_repository: Self::default_local_repository(),
            plugin_repositories: vec![RemoteRepository::central()],
            project_repositories: vec![RemoteRepository::central()],
            offline: false,
            plugin_name: "surefire".to_string(),
        }
    }
}

impl ResolverConfig {
    pub fn default_local_repository() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".m2/repository")
    }

    /// `~/.forkpath/config.json`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".forkpath/config.json")
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No resolver config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| ForkpathError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.local_repository.as_os_str().is_empty() {
            return Err(ForkpathError::Config {
                path: path.to_path_buf(),
                message: "local_repository must not be empty".to_string(),
            });
        }
        if let Some(repo) = self
            .plugin_repositories
            .iter()
            .chain(&self.project_repositories)
            .find(|r| r.url.trim().is_empty())
        {
            return Err(ForkpathError::Config {
                path: path.to_path_buf(),
                message: format!("repository '{}' has no url", repo.id),
            });
        }
        Ok(())
    }

    /// Repositories for plugin resolution; `None` when offline.
    pub fn plugin_repositories(&self) -> Option<Vec<RemoteRepository>> {
        (!self.offline).then(|| self.plugin_repositories.clone())
    }

    /// Repositories for project resolution; `None` when offline.
    pub fn project_repositories(&self) -> Option<Vec<RemoteRepository>> {
        (!self.offline).then(|| self.project_repositories.clone())
    }
}
