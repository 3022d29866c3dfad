use forkpath_api::{Artifact, ArtifactSet};
use forkpath_core::ResolverConfig;
use forkpath_core::resolver::{
    AnchorArtifacts, ProviderClasspathAssembler, RepositoryManifest, ResolutionClient,
    artifact_map_by_versionless_id,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct ClasspathArgs {
    pub manifest: PathBuf,
    pub provider: String,
    pub provider_version: String,
    pub config: Option<PathBuf>,
    pub map: bool,
    pub plugin: Option<String>,
    pub anchors: Vec<String>,
}

pub fn run(args: ClasspathArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = args.config.unwrap_or_else(ResolverConfig::default_path);
    let config = ResolverConfig::load(&config_path)?;

    let resolver = RepositoryManifest::load(&args.manifest)?.into_resolver()?;
    info!(
        "Loaded {} artifacts from {}",
        resolver.len(),
        args.manifest.display()
    );

    let client = ResolutionClient::from_config(Arc::new(resolver), &config);
    let assembler = ProviderClasspathAssembler::new(client, config.plugin_name.clone());

    let classpath = match &args.plugin {
        None => assembler.get_provider_classpath(&args.provider, &args.provider_version)?,
        Some(plugin) => {
            let mojo = Artifact::parse_coordinates(plugin)?;
            let anchors = args
                .anchors
                .iter()
                .map(|a| Artifact::parse_coordinates(a))
                .collect::<Result<Vec<_>, _>>()?;

            let provider_map =
                assembler.get_provider_classpath_as_map(&args.provider, &args.provider_version)?;
            assembler.add_provider_to_classpath(
                &provider_map,
                &mojo,
                &AnchorArtifacts::new(anchors),
            )?
        }
    };

    if args.map {
        print_map(classpath);
    } else {
        print_list(&classpath);
    }
    Ok(())
}

fn print_list(classpath: &ArtifactSet) {
    for artifact in classpath {
        match artifact.file() {
            Some(file) => println!("{artifact}\t{}", file.display()),
            None => println!("{artifact}"),
        }
    }
}

fn print_map(classpath: ArtifactSet) {
    for (id, artifact) in artifact_map_by_versionless_id(classpath) {
        println!("{id} -> {}", artifact.version);
    }
}
