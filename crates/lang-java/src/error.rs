use std::path::PathBuf;
use thiserror::Error;

/// Syntax reference for coordinate patterns.
pub const COORDINATE_PATTERN_SYNTAX: &str = "groupId:artifactId[:version[:type[:classifier]]]";

/// An archive could not be opened or read. The whole scan is abandoned.
#[derive(Error, Debug)]
#[error("Could not scan dependency {}: {source}", .path.display())]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: zip::result::ZipError,
}

/// A caller supplied a coordinate or test pattern that cannot be used.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("dependenciesToScan argument should be in format '{}': {pattern}", COORDINATE_PATTERN_SYNTAX)]
    Malformed { pattern: String },
    #[error("Invalid regular expression '{field}' in dependency pattern {pattern}: {source}")]
    InvalidRegex {
        pattern: String,
        field: String,
        #[source]
        source: regex::Error,
    },
    #[error("Invalid test selection pattern {pattern}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl PatternError {
    pub fn pattern(&self) -> &str {
        match self {
            PatternError::Malformed { pattern }
            | PatternError::InvalidRegex { pattern, .. }
            | PatternError::InvalidGlob { pattern, .. } => pattern,
        }
    }
}
