//! Version range expressions: `1.0`, `[1.0,2.0)`, `(,1.0],[1.2,)`, `[1.5]`.

use super::ComparableVersion;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionSpecError {
    #[error("Empty version specification")]
    Empty,
    #[error("Unbounded range: {0}")]
    Unbounded(String),
    #[error("Single version must be surrounded by []: {0}")]
    ExclusiveSingleVersion(String),
    #[error("Range cannot have identical boundaries: {0}")]
    IdenticalBounds(String),
    #[error("Range defies version ordering: {0}")]
    ReversedBounds(String),
    #[error("Ranges overlap: {0}")]
    Overlapping(String),
    #[error("Only fully-qualified sets allowed in multiple set scenario: {0}")]
    Unqualified(String),
    #[error("Invalid version range: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    lower: Option<ComparableVersion>,
    lower_inclusive: bool,
    upper: Option<ComparableVersion>,
    upper_inclusive: bool,
}

impl Restriction {
    fn everything() -> Self {
        Self {
            lower: None,
            lower_inclusive: false,
            upper: None,
            upper_inclusive: false,
        }
    }

    pub fn contains(&self, version: &ComparableVersion) -> bool {
        if let Some(lower) = &self.lower {
            match lower.cmp(version) {
                std::cmp::Ordering::Greater => return false,
                std::cmp::Ordering::Equal if !self.lower_inclusive => return false,
                _ => {}
            }
        }
        if let Some(upper) = &self.upper {
            match upper.cmp(version) {
                std::cmp::Ordering::Less => return false,
                std::cmp::Ordering::Equal if !self.upper_inclusive => return false,
                _ => {}
            }
        }
        true
    }

    fn parse(spec: &str) -> Result<Self, VersionSpecError> {
        let lower_inclusive = spec.starts_with('[');
        let upper_inclusive = spec.ends_with(']');
        let inner = spec[1..spec.len() - 1].trim();

        match inner.split_once(',') {
            None => {
                if !lower_inclusive || !upper_inclusive {
                    return Err(VersionSpecError::ExclusiveSingleVersion(spec.to_string()));
                }
                if inner.is_empty() {
                    return Err(VersionSpecError::Malformed(spec.to_string()));
                }
                let version = ComparableVersion::parse(inner);
                Ok(Self {
                    lower: Some(version.clone()),
                    lower_inclusive: true,
                    upper: Some(version),
                    upper_inclusive: true,
                })
            }
            Some((lower, upper)) => {
                let (lower, upper) = (lower.trim(), upper.trim());
                if upper.contains(',') {
                    return Err(VersionSpecError::Malformed(spec.to_string()));
                }
                if lower == upper && !lower.is_empty() {
                    return Err(VersionSpecError::IdenticalBounds(spec.to_string()));
                }
                let lower = (!lower.is_empty()).then(|| ComparableVersion::parse(lower));
                let upper = (!upper.is_empty()).then(|| ComparableVersion::parse(upper));
                if let (Some(l), Some(u)) = (&lower, &upper) {
                    if u < l {
                        return Err(VersionSpecError::ReversedBounds(spec.to_string()));
                    }
                }
                Ok(Self {
                    lower,
                    lower_inclusive,
                    upper,
                    upper_inclusive,
                })
            }
        }
    }
}

/// A parsed version specification.
///
/// A bare version is a soft requirement: it recommends that version but
/// accepts any other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    spec: String,
    recommended: Option<ComparableVersion>,
    restrictions: Vec<Restriction>,
}

impl VersionRange {
    pub fn from_spec(spec: &str) -> Result<Self, VersionSpecError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(VersionSpecError::Empty);
        }

        let mut restrictions: Vec<Restriction> = Vec::new();
        let mut rest = trimmed;
        let mut upper_bound: Option<ComparableVersion> = None;
        let mut lower_bound: Option<ComparableVersion> = None;

        while rest.starts_with('[') || rest.starts_with('(') {
            let close = rest
                .find([']', ')'])
                .ok_or_else(|| VersionSpecError::Malformed(spec.to_string()))?;
            if let Some(next_open) = rest[1..].find(['[', '(']) {
                if next_open + 1 < close {
                    return Err(VersionSpecError::Malformed(spec.to_string()));
                }
            }

            let restriction = Restriction::parse(&rest[..=close])?;
            if lower_bound.is_none() {
                lower_bound = restriction.lower.clone();
            }
            if let Some(previous_upper) = &upper_bound {
                match &restriction.lower {
                    Some(lower) if lower >= previous_upper => {}
                    _ => return Err(VersionSpecError::Overlapping(spec.to_string())),
                }
            }
            upper_bound = restriction.upper.clone();
            restrictions.push(restriction);

            rest = rest[close + 1..].trim_start();
            if let Some(stripped) = rest.strip_prefix(',') {
                rest = stripped.trim_start();
            }
        }

        if !rest.is_empty() {
            if !restrictions.is_empty() {
                return Err(VersionSpecError::Unqualified(spec.to_string()));
            }
            if rest.contains([']', ')', ',']) {
                return Err(VersionSpecError::Malformed(spec.to_string()));
            }
            return Ok(Self {
                spec: trimmed.to_string(),
                recommended: Some(ComparableVersion::parse(rest)),
                restrictions: vec![Restriction::everything()],
            });
        }

        if restrictions.len() == 1 && lower_bound.is_none() && upper_bound.is_none() {
            return Err(VersionSpecError::Unbounded(spec.to_string()));
        }

        Ok(Self {
            spec: trimmed.to_string(),
            recommended: None,
            restrictions,
        })
    }

    pub fn recommended_version(&self) -> Option<&ComparableVersion> {
        self.recommended.as_ref()
    }

    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    pub fn contains(&self, version: &ComparableVersion) -> bool {
        self.restrictions.iter().any(|r| r.contains(version))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

impl std::str::FromStr for VersionRange {
    type Err = VersionSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_spec(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(spec: &str, version: &str) -> bool {
        VersionRange::from_spec(spec)
            .unwrap()
            .contains(&ComparableVersion::parse(version))
    }

    #[test]
    fn test_closed_and_open_bounds() {
        assert!(contains("[1.2,1.3]", "1.2"));
        assert!(contains("[1.2,1.3]", "1.3"));
        assert!(!contains("[1.2,1.3]", "1.4"));
        assert!(!contains("(1.2,1.3)", "1.2"));
        assert!(!contains("(1.2,1.3)", "1.3"));
        assert!(contains("[1.2,1.3)", "1.2.9"));
    }

    #[test]
    fn test_half_unbounded() {
        assert!(contains("(,1.0]", "0.9"));
        assert!(contains("(,1.0]", "1.0"));
        assert!(!contains("(,1.0]", "1.0.1"));
        assert!(contains("[1.5,)", "1.5"));
        assert!(contains("[1.5,)", "99"));
        assert!(!contains("[1.0,)", "1.0-SNAPSHOT"));
    }

    #[test]
    fn test_single_version() {
        assert!(contains("[1.0]", "1.0"));
        assert!(contains("[1.0]", "1.0.0"));
        assert!(!contains("[1.0]", "1.0.1"));
    }

    #[test]
    fn test_union_of_ranges() {
        assert!(contains("(,1.0],[1.2,)", "0.5"));
        assert!(!contains("(,1.0],[1.2,)", "1.1"));
        assert!(contains("(,1.0],[1.2,)", "1.2"));
    }

    #[test]
    fn test_soft_requirement_accepts_anything() {
        let range = VersionRange::from_spec("2.12").unwrap();
        assert_eq!(range.recommended_version().unwrap().as_str(), "2.12");
        assert!(range.contains(&ComparableVersion::parse("1.0")));
        assert!(range.contains(&ComparableVersion::parse("3.0")));
    }

    #[test]
    fn test_invalid_specs() {
        assert_eq!(VersionRange::from_spec(""), Err(VersionSpecError::Empty));
        assert!(matches!(
            VersionRange::from_spec("(1.0)"),
            Err(VersionSpecError::ExclusiveSingleVersion(_))
        ));
        assert!(matches!(
            VersionRange::from_spec("[2.0,1.0]"),
            Err(VersionSpecError::ReversedBounds(_))
        ));
        assert!(matches!(
            VersionRange::from_spec("[1.0,1.0]"),
            Err(VersionSpecError::IdenticalBounds(_))
        ));
        assert!(matches!(
            VersionRange::from_spec("[1.0,2.0],[1.5,3.0]"),
            Err(VersionSpecError::Overlapping(_))
        ));
        assert!(matches!(
            VersionRange::from_spec("[1.0,2.0],1.5"),
            Err(VersionSpecError::Unqualified(_))
        ));
        assert!(matches!(
            VersionRange::from_spec("[1.0,2.0"),
            Err(VersionSpecError::Malformed(_))
        ));
        assert!(matches!(
            VersionRange::from_spec("(,)"),
            Err(VersionSpecError::Unbounded(_))
        ));
        assert!(matches!(
            VersionRange::from_spec("[1.0,2.0,3.0]"),
            Err(VersionSpecError::Malformed(_))
        ));
    }
}
