use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::error::{ApiError, ApiResult};

pub const SCOPE_COMPILE: &str = "compile";
pub const SCOPE_RUNTIME: &str = "runtime";
pub const SCOPE_TEST: &str = "test";

pub const SNAPSHOT_VERSION: &str = "SNAPSHOT";

/// Module identity of an artifact regardless of version, type or classifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionlessId {
    pub group_id: String,
    pub artifact_id: String,
}

impl VersionlessId {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for VersionlessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Dependency descriptor as it would appear in a project model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(rename = "type", default = "default_type")]
    pub artifact_type: String,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_type() -> String {
    "jar".to_string()
}

/// A build output identified by its coordinates.
///
/// Two artifacts are the same set member when group, artifact, version,
/// classifier and type agree. Scope, resolved file and selected version do not
/// take part in equality.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Artifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(rename = "type", default)]
    pub artifact_type: Option<String>,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    selected_version: Option<String>,
}

impl Artifact {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            artifact_type: Some(default_type()),
            classifier: None,
            scope: None,
            file: None,
            selected_version: None,
        }
    }

    /// Parse `groupId:artifactId:version[:type[:classifier]]`.
    ///
    /// Empty type or classifier fields are treated as absent; the type then
    /// defaults to `jar`.
    pub fn parse_coordinates(coordinates: &str) -> ApiResult<Self> {
        let parts: Vec<&str> = coordinates.split(':').map(str::trim).collect();
        if parts.len() < 3 || parts.len() > 5 || parts[..3].iter().any(|p| p.is_empty()) {
            return Err(ApiError::InvalidArgument(format!(
                "expected 'groupId:artifactId:version[:type[:classifier]]', got '{coordinates}'"
            )));
        }

        let mut artifact = Self::new(parts[0], parts[1], parts[2]);
        if let Some(artifact_type) = parts.get(3).filter(|t| !t.is_empty()) {
            artifact.artifact_type = Some(artifact_type.to_string());
        }
        artifact.classifier = parts
            .get(4)
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string());
        Ok(artifact)
    }

    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = Some(artifact_type.into());
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Mark the artifact as resolved to `version`.
    pub fn with_selected_version(mut self, version: impl Into<String>) -> Self {
        self.selected_version = Some(version.into());
        self
    }

    pub fn versionless_id(&self) -> VersionlessId {
        VersionlessId::new(&self.group_id, &self.artifact_id)
    }

    /// Version picked by resolution, if the artifact has been resolved.
    pub fn selected_version(&self) -> Option<&str> {
        self.selected_version.as_deref()
    }

    /// Version with timestamped snapshot suffixes folded back to `SNAPSHOT`.
    ///
    /// `1.0-20240101.101010-3` becomes `1.0-SNAPSHOT`.
    pub fn base_version(&self) -> String {
        base_version_of(&self.version)
    }

    pub fn is_snapshot(&self) -> bool {
        self.base_version().ends_with(SNAPSHOT_VERSION)
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Path of this artifact relative to a repository root.
    pub fn repository_path(&self) -> PathBuf {
        let extension = self.artifact_type.as_deref().unwrap_or("jar");
        let file_name = match &self.classifier {
            Some(classifier) => {
                format!("{}-{}-{}.{}", self.artifact_id, self.version, classifier, extension)
            }
            None => format!("{}-{}.{}", self.artifact_id, self.version, extension),
        };

        let mut path: PathBuf = self.group_id.split('.').collect();
        path.push(&self.artifact_id);
        path.push(self.base_version());
        path.push(file_name);
        path
    }
}

impl From<&Dependency> for Artifact {
    fn from(dependency: &Dependency) -> Self {
        Self {
            group_id: dependency.group_id.clone(),
            artifact_id: dependency.artifact_id.clone(),
            version: dependency.version.clone(),
            artifact_type: Some(dependency.artifact_type.clone()),
            classifier: dependency.classifier.clone(),
            scope: dependency.scope.clone(),
            file: None,
            selected_version: None,
        }
    }
}

impl PartialEq for Artifact {
    fn eq(&self, other: &Self) -> bool {
        self.group_id == other.group_id
            && self.artifact_id == other.artifact_id
            && self.version == other.version
            && self.classifier == other.classifier
            && self.artifact_type == other.artifact_type
    }
}

impl Eq for Artifact {}

impl Hash for Artifact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group_id.hash(state);
        self.artifact_id.hash(state);
        self.version.hash(state);
        self.classifier.hash(state);
        self.artifact_type.hash(state);
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(artifact_type) = &self.artifact_type {
            write!(f, ":{artifact_type}")?;
        }
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.version)?;
        if let Some(scope) = &self.scope {
            write!(f, ":{scope}")?;
        }
        Ok(())
    }
}

fn base_version_of(version: &str) -> String {
    // <base>-yyyyMMdd.HHmmss-<build>
    let mut parts = version.rsplitn(3, '-');
    let (Some(build), Some(timestamp), Some(base)) = (parts.next(), parts.next(), parts.next())
    else {
        return version.to_string();
    };

    let is_timestamp = timestamp.len() == 15
        && timestamp.as_bytes()[8] == b'.'
        && timestamp
            .chars()
            .enumerate()
            .all(|(i, c)| i == 8 || c.is_ascii_digit());
    let is_build = !build.is_empty() && build.chars().all(|c| c.is_ascii_digit());

    if is_timestamp && is_build {
        format!("{base}-{SNAPSHOT_VERSION}")
    } else {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_scope_and_file() {
        let a = Artifact::new("org.example", "lib", "1.0").with_scope(SCOPE_TEST);
        let b = Artifact::new("org.example", "lib", "1.0").with_file("/tmp/lib-1.0.jar");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_equality_includes_classifier_and_type() {
        let plain = Artifact::new("org.example", "lib", "1.0");
        let tests = Artifact::new("org.example", "lib", "1.0").with_classifier("tests");
        let pom = Artifact::new("org.example", "lib", "1.0").with_type("pom");
        assert_ne!(plain, tests);
        assert_ne!(plain, pom);
        assert_eq!(plain.versionless_id(), tests.versionless_id());
    }

    #[test]
    fn test_parse_coordinates() {
        let artifact = Artifact::parse_coordinates("org.example:lib:1.0:test-jar:tests").unwrap();
        assert_eq!(artifact.group_id, "org.example");
        assert_eq!(artifact.artifact_id, "lib");
        assert_eq!(artifact.version, "1.0");
        assert_eq!(artifact.artifact_type.as_deref(), Some("test-jar"));
        assert_eq!(artifact.classifier.as_deref(), Some("tests"));

        let artifact = Artifact::parse_coordinates("org.example:lib:1.0").unwrap();
        assert_eq!(artifact.artifact_type.as_deref(), Some("jar"));
        assert_eq!(artifact.classifier, None);

        assert!(Artifact::parse_coordinates("org.example:lib").is_err());
        assert!(Artifact::parse_coordinates("org.example::1.0").is_err());
    }

    #[test]
    fn test_base_version_folds_timestamped_snapshot() {
        let artifact = Artifact::new("org.example", "lib", "1.0-20240101.101010-3");
        assert_eq!(artifact.base_version(), "1.0-SNAPSHOT");
        assert!(artifact.is_snapshot());

        let release = Artifact::new("org.example", "lib", "1.0-beta-2");
        assert_eq!(release.base_version(), "1.0-beta-2");
        assert!(!release.is_snapshot());
    }

    #[test]
    fn test_repository_path() {
        let artifact = Artifact::new("org.apache.maven.surefire", "surefire-api", "3.0.0")
            .with_classifier("jdk8");
        let expected: PathBuf = [
            "org",
            "apache",
            "maven",
            "surefire",
            "surefire-api",
            "3.0.0",
            "surefire-api-3.0.0-jdk8.jar",
        ]
        .iter()
        .collect();
        assert_eq!(artifact.repository_path(), expected);
    }
}
