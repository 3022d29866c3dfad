//! Version comparison and range matching for resolved artifacts.

mod comparable;
mod range;

pub use comparable::ComparableVersion;
pub use range::{Restriction, VersionRange, VersionSpecError};

use forkpath_api::Artifact;

/// Whether `artifact` falls inside `version_spec`.
///
/// The selected version is tested when the artifact has been resolved,
/// otherwise its base version. An absent artifact is never within a spec.
///
/// # Panics
///
/// `version_spec` is always a literal owned by the caller, so a spec that
/// fails to parse is a defect in the calling code and aborts.
pub fn is_within_version_spec(artifact: Option<&Artifact>, version_spec: &str) -> bool {
    let Some(artifact) = artifact else {
        return false;
    };

    let range = VersionRange::from_spec(version_spec).unwrap_or_else(|e| {
        panic!("Bug in plugin. Please report with stacktrace: version spec '{version_spec}': {e}")
    });

    let version = match artifact.selected_version() {
        Some(selected) => ComparableVersion::parse(selected),
        None => ComparableVersion::parse(&artifact.base_version()),
    };
    range.contains(&version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_artifact_is_not_within_spec() {
        assert!(!is_within_version_spec(None, "[2.0,)"));
    }

    #[test]
    fn test_selected_version_takes_precedence() {
        let artifact = Artifact::new("org.example", "lib", "[1.0,3.0)").with_selected_version("2.5");
        assert!(is_within_version_spec(Some(&artifact), "[2.0,)"));
        assert!(!is_within_version_spec(Some(&artifact), "[2.6,)"));
    }

    #[test]
    fn test_falls_back_to_base_version() {
        let artifact = Artifact::new("org.example", "lib", "2.12-20240101.101010-1");
        assert_eq!(artifact.selected_version(), None);
        // 2.12-SNAPSHOT sorts before 2.12
        assert!(is_within_version_spec(Some(&artifact), "[2.11,2.12)"));
        assert!(!is_within_version_spec(Some(&artifact), "[2.12,)"));
    }

    #[test]
    #[should_panic(expected = "Bug in plugin")]
    fn test_malformed_spec_aborts() {
        let artifact = Artifact::new("org.example", "lib", "1.0");
        is_within_version_spec(Some(&artifact), "[1.0");
    }
}
