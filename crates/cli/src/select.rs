use forkpath_core::resolver::RepositoryManifest;
use std::path::PathBuf;
use tracing::info;

pub fn run(manifest: PathBuf, patterns: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = RepositoryManifest::load(&manifest)?.into_resolver()?;
    let artifacts = resolver.artifacts();

    let selected = forkpath_java::filter(Some(artifacts.as_slice()), Some(patterns.as_slice()))?;
    info!(
        "{} of {} artifacts match {} patterns",
        selected.len(),
        artifacts.len(),
        patterns.len()
    );

    for artifact in &selected {
        match artifact.file() {
            Some(file) => println!("{artifact}\t{}", file.display()),
            None => println!("{artifact}"),
        }
    }
    Ok(())
}
