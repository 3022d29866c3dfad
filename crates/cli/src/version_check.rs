use forkpath_api::Artifact;
use forkpath_core::is_within_version_spec;
use forkpath_core::version::VersionRange;

pub fn run(
    coordinates: String,
    spec: String,
    selected_version: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    // A malformed range is a programming error inside the matcher; reject user input first.
    VersionRange::from_spec(&spec)?;

    let mut artifact = Artifact::parse_coordinates(&coordinates)?;
    if let Some(version) = selected_version {
        artifact = artifact.with_selected_version(version);
    }

    let within = is_within_version_spec(Some(&artifact), &spec);
    println!("{within}");
    Ok(())
}
