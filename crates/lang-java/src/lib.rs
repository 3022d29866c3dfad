//! Java-specific pieces: scanning dependency jars for test classes, selecting
//! dependency artifacts by coordinates, and include/exclude class filters.

pub mod coordinates;
pub mod error;
pub mod naming;
pub mod scanner;
pub mod test_list;

pub use coordinates::{CoordinatePattern, filter};
pub use error::{COORDINATE_PATTERN_SYNTAX, PatternError, ScanError};
pub use naming::JavaNamingConvention;
pub use scanner::{DependencyScanner, JAR_EXTENSION, ScanResult, scan};
pub use test_list::{DEFAULT_EXCLUDES, DEFAULT_INCLUDES, TestListResolver};

use forkpath_api::Artifact;
use std::path::PathBuf;

/// Resolved files of the artifacts selected by `patterns`, in match order.
///
/// Artifacts without a file are dropped; the scanner would skip them anyway.
pub fn dependencies_to_scan(
    artifacts: Option<&[Artifact]>,
    patterns: Option<&[String]>,
) -> Result<Vec<PathBuf>, PatternError> {
    Ok(filter(artifacts, patterns)?
        .into_iter()
        .filter_map(|a| a.file)
        .collect())
}
