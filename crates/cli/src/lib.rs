mod classpath;
mod scan;
mod select;
mod version_check;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "forkpath",
    version,
    about = "Assembles test provider classpaths and discovers tests in dependency jars",
    long_about = "Forkpath resolves a test framework provider together with its transitive \
                  artifacts, orders them into a deterministic classpath, and scans dependency \
                  jars for test classes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and print the ordered classpath of a provider
    #[command(
        long_about = "Resolves org.apache.maven.surefire:<PROVIDER>:<VERSION> against the artifacts \
                            described by a repository manifest and prints the ordered classpath. \
                            With --plugin, the provider is added on top of the plugin's own \
                            classpath and the given anchors are pinned."
    )]
    Classpath {
        /// JSON repository manifest describing the available artifacts
        #[arg(long, value_name = "MANIFEST")]
        manifest: PathBuf,
        /// Provider artifact id, e.g. surefire-junit4
        #[arg(long)]
        provider: String,
        /// Provider version
        #[arg(long = "provider-version", value_name = "VERSION")]
        provider_version: String,
        /// Resolver configuration file. Defaults to ~/.forkpath/config.json
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,
        /// Print the classpath keyed by groupId:artifactId
        #[arg(long)]
        map: bool,
        /// Coordinates of the running plugin (g:a:v)
        #[arg(long, value_name = "COORDINATES")]
        plugin: Option<String>,
        /// Artifacts that must keep the plugin's own version (g:a:v), repeatable
        #[arg(long = "anchor", value_name = "COORDINATES")]
        anchors: Vec<String>,
    },
    /// Scan jars for test classes
    #[command(
        long_about = "Scans the given jar files, and every jar below the given directories, for \
                            class entries selected by the include and exclude patterns. Without \
                            patterns the default test naming conventions apply."
    )]
    Scan {
        /// Jar files or directories containing jars
        #[arg(value_name = "PATHS", required = true)]
        paths: Vec<PathBuf>,
        /// Include pattern, repeatable
        #[arg(long = "include", value_name = "PATTERN")]
        includes: Vec<String>,
        /// Exclude pattern, repeatable
        #[arg(long = "exclude", value_name = "PATTERN")]
        excludes: Vec<String>,
    },
    /// Select manifest artifacts by coordinate pattern
    Select {
        /// JSON repository manifest describing the available artifacts
        #[arg(long, value_name = "MANIFEST")]
        manifest: PathBuf,
        /// groupId:artifactId[:version[:type[:classifier]]], repeatable
        #[arg(long = "pattern", value_name = "PATTERN", required = true)]
        patterns: Vec<String>,
    },
    /// Check whether an artifact version lies within a version range
    VersionCheck {
        /// Artifact coordinates (g:a:v[:type[:classifier]])
        #[arg(value_name = "COORDINATES")]
        artifact: String,
        /// Version range, e.g. "[2.0,3.0)"
        #[arg(long, value_name = "RANGE")]
        spec: String,
        /// Version chosen by resolution, if different from the requested one
        #[arg(long = "selected-version", value_name = "VERSION")]
        selected_version: Option<String>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _guard = forkpath_core::logging::init_logging("cli", true);

    match cli.command {
        Commands::Classpath {
            manifest,
            provider,
            provider_version,
            config,
            map,
            plugin,
            anchors,
        } => classpath::run(classpath::ClasspathArgs {
            manifest,
            provider,
            provider_version,
            config,
            map,
            plugin,
            anchors,
        }),
        Commands::Scan {
            paths,
            includes,
            excludes,
        } => scan::run(paths, includes, excludes),
        Commands::Select { manifest, patterns } => select::run(manifest, patterns),
        Commands::VersionCheck {
            artifact,
            spec,
            selected_version,
        } => version_check::run(artifact, spec, selected_version),
    }
}
