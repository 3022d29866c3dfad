//! Selection of dependency artifacts by coordinate pattern.
//!
//! A pattern is `groupId:artifactId[:version[:type[:classifier]]]`. Group,
//! artifact and classifier are regular expressions that must match the whole
//! field; version and type are compared literally. Blank optional fields do not
//! constrain anything.

use crate::error::PatternError;
use forkpath_api::Artifact;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct CoordinatePattern {
    source: String,
    group_id: Regex,
    artifact_id: Regex,
    version: Option<String>,
    artifact_type: Option<String>,
    classifier: Option<Regex>,
}

impl CoordinatePattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if !pattern.contains(':') {
            return Err(PatternError::Malformed {
                pattern: pattern.to_string(),
            });
        }

        // Keeps empty and trailing fields, e.g. "g:a::jar" -> ["g", "a", "", "jar"]
        let fields: Vec<&str> = pattern.split(':').collect();
        let optional = |index: usize| {
            fields
                .get(index)
                .filter(|f| !f.trim().is_empty())
                .map(|f| f.to_string())
        };

        let classifier = optional(4)
            .map(|c| full_match(pattern, &c))
            .transpose()?;

        Ok(Self {
            source: pattern.to_string(),
            group_id: full_match(pattern, fields[0])?,
            artifact_id: full_match(pattern, fields[1])?,
            version: optional(2),
            artifact_type: optional(3),
            classifier,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, artifact: &Artifact) -> bool {
        if !self.group_id.is_match(&artifact.group_id)
            || !self.artifact_id.is_match(&artifact.artifact_id)
        {
            return false;
        }
        if let Some(version) = &self.version {
            if artifact.version != *version {
                return false;
            }
        }
        if let Some(artifact_type) = &self.artifact_type {
            if artifact.artifact_type.as_deref() != Some(artifact_type.as_str()) {
                return false;
            }
        }
        if let Some(classifier) = &self.classifier {
            match artifact.classifier.as_deref() {
                Some(value) if classifier.is_match(value) => {}
                _ => return false,
            }
        }
        true
    }
}

fn full_match(pattern: &str, field: &str) -> Result<Regex, PatternError> {
    Regex::new(&format!("^(?:{field})$")).map_err(|source| PatternError::InvalidRegex {
        pattern: pattern.to_string(),
        field: field.to_string(),
        source,
    })
}

/// Artifacts matching any of `patterns`, once per matching pattern.
///
/// Absent input yields an empty list. Every pattern is validated before
/// anything is matched.
pub fn filter(
    artifacts: Option<&[Artifact]>,
    patterns: Option<&[String]>,
) -> Result<Vec<Artifact>, PatternError> {
    let (Some(artifacts), Some(patterns)) = (artifacts, patterns) else {
        return Ok(Vec::new());
    };

    let patterns = patterns
        .iter()
        .map(|p| CoordinatePattern::parse(p))
        .collect::<Result<Vec<_>, _>>()?;

    let mut matches = Vec::new();
    for artifact in artifacts {
        for pattern in &patterns {
            if pattern.matches(artifact) {
                matches.push(artifact.clone());
            }
        }
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(group: &str, id: &str, version: &str) -> Artifact {
        Artifact::new(group, id, version)
    }

    fn patterns(p: &[&str]) -> Vec<String> {
        p.iter().map(|s| s.to_string()).collect()
    }

    fn select(artifacts: &[Artifact], p: &[&str]) -> Result<Vec<Artifact>, PatternError> {
        filter(Some(artifacts), Some(patterns(p).as_slice()))
    }

    #[test]
    fn test_group_and_artifact_match_exactly() {
        let artifacts = vec![
            artifact("org.foo", "bar", "1.0"),
            artifact("org.foo", "barbell", "1.0"),
            artifact("org.foo.sub", "bar", "1.0"),
            artifact("org.foo", "bar", "2.0").with_classifier("tests"),
        ];

        let matched = select(&artifacts, &["org.foo:bar"]).unwrap();

        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|a| a.group_id == "org.foo" && a.artifact_id == "bar"));
    }

    #[test]
    fn test_version_is_literal() {
        let artifacts = vec![
            artifact("org.foo", "a", "1.0"),
            artifact("org.foo", "b", "1.0.1"),
            artifact("org.foo", "c", "2.0"),
        ];

        let matched = select(&artifacts, &[r"org\.foo:.*:1\.0"]).unwrap();
        assert!(matched.is_empty(), "version field is compared literally");

        let matched = select(&artifacts, &["org\\.foo:.*:1.0"]).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].artifact_id, "a");
    }

    #[test]
    fn test_type_and_classifier() {
        let plain = artifact("g", "a", "1");
        let test_jar = artifact("g", "a", "1").with_type("test-jar").with_classifier("tests");
        let mut untyped = artifact("g", "a", "1");
        untyped.artifact_type = None;
        let artifacts = vec![plain, test_jar, untyped];

        let by_type = select(&artifacts, &["g:a::test-jar"]).unwrap();
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].classifier.as_deref(), Some("tests"));

        let by_classifier = select(&artifacts, &["g:a:::te.*"]).unwrap();
        assert_eq!(by_classifier.len(), 1);

        let blank_fields = select(&artifacts, &["g:a: : : "]).unwrap();
        assert_eq!(blank_fields.len(), 3);
    }

    #[test]
    fn test_artifact_listed_once_per_matching_pattern() {
        let artifacts = vec![artifact("g", "a", "1")];
        let matched = select(&artifacts, &["g:a", "g:.*"]).unwrap();
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn test_absent_inputs_yield_nothing() {
        let artifacts = vec![artifact("g", "a", "1")];
        let p = patterns(&["g:a"]);
        assert!(filter(None, Some(p.as_slice())).unwrap().is_empty());
        assert!(filter(Some(artifacts.as_slice()), None).unwrap().is_empty());
    }

    #[test]
    fn test_pattern_without_colon_is_rejected() {
        let artifacts = vec![artifact("g", "a", "1")];
        let err = select(&artifacts, &["justonefield"]).unwrap_err();

        assert!(matches!(err, PatternError::Malformed { .. }));
        assert_eq!(err.pattern(), "justonefield");
        let message = err.to_string();
        assert!(message.contains("justonefield"));
        assert!(message.contains("groupId:artifactId"));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let err = CoordinatePattern::parse("org.(foo:bar").unwrap_err();
        assert!(matches!(err, PatternError::InvalidRegex { .. }));
    }
}
