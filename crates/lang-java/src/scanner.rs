//! Test class discovery inside dependency jars.
//!
//! Each candidate jar is opened in turn, its class entries are offered to a
//! [`TestFilter`], and accepted entries are collected as fully qualified class
//! names. The first archive that cannot be read aborts the scan.

use crate::error::ScanError;
use crate::naming::JavaNamingConvention;
use forkpath_api::TestFilter;
use indexmap::IndexSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use zip::ZipArchive;

/// Extension of the archives that are scanned.
pub const JAR_EXTENSION: &str = ".jar";

/// Ordered, duplicate-free class names found by a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    classes: IndexSet<String>,
}

impl ScanResult {
    pub fn new(classes: impl IntoIterator<Item = String>) -> Self {
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_name(&self, index: usize) -> Option<&str> {
        self.classes.get_index(index).map(String::as_str)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains(class_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Merge `other` into this result; names already present keep their
    /// position.
    pub fn append(&mut self, other: ScanResult) {
        self.classes.extend(other.classes);
    }

    pub fn into_vec(self) -> Vec<String> {
        self.classes.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}

/// Scans a fixed list of dependency files with one filter.
pub struct DependencyScanner<F> {
    dependencies_to_scan: Vec<PathBuf>,
    filter: F,
}

impl<F: TestFilter> DependencyScanner<F> {
    pub fn new(dependencies_to_scan: Vec<PathBuf>, filter: F) -> Self {
        Self {
            dependencies_to_scan,
            filter,
        }
    }

    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        scan(&self.dependencies_to_scan, &self.filter)
    }
}

/// Scan `candidates` for class entries accepted by `filter`.
///
/// Candidates that are not existing `*.jar` files are skipped.
pub fn scan<P, F>(candidates: &[P], filter: &F) -> Result<ScanResult, ScanError>
where
    P: AsRef<Path>,
    F: TestFilter + ?Sized,
{
    let mut classes = IndexSet::new();

    for candidate in candidates {
        let path = candidate.as_ref();
        if !is_scannable(path) {
            trace!("Skipping {}: not a jar file", path.display());
            continue;
        }

        let before = classes.len();
        scan_artifact(path, filter, &mut classes).map_err(|source| ScanError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Scanned {}: {} new classes",
            path.display(),
            classes.len() - before
        );
    }

    Ok(ScanResult { classes })
}

fn is_scannable(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(JAR_EXTENSION))
}

fn scan_artifact<F>(
    artifact: &Path,
    filter: &F,
    classes: &mut IndexSet<String>,
) -> zip::result::ZipResult<()>
where
    F: TestFilter + ?Sized,
{
    // The archive (and its file handle) is dropped on every exit path.
    let mut archive = ZipArchive::new(File::open(artifact)?)?;
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let path = entry.name();
        if JavaNamingConvention::is_class_file(path) && filter.should_run(path, None) {
            classes.insert(JavaNamingConvention::class_name_from_resource(path));
        }
    }
    Ok(())
}
