use forkpath_java::{JAR_EXTENSION, TestListResolver, scan};
use std::path::PathBuf;
use tracing::{info, warn};
use walkdir::WalkDir;

pub fn run(
    paths: Vec<PathBuf>,
    includes: Vec<String>,
    excludes: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let custom;
    let filter = if includes.is_empty() && excludes.is_empty() {
        TestListResolver::defaults()
    } else {
        custom = TestListResolver::new(&includes, &excludes)?;
        &custom
    };

    let jars = collect_jars(&paths);
    info!("Scanning {} jars", jars.len());

    let result = scan(&jars, filter)?;
    for class_name in &result {
        println!("{class_name}");
    }
    info!("Found {} test classes", result.size());
    Ok(())
}

/// Expand directories into the jars below them, sorted for a stable scan
/// order. Plain files are kept as given.
fn collect_jars(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut jars = Vec::new();
    for path in paths {
        if !path.is_dir() {
            jars.push(path.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", path.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(JAR_EXTENSION))
            })
            .collect();
        found.sort();
        jars.extend(found);
    }
    jars
}
