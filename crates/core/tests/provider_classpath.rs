use forkpath_api::{Artifact, RemoteRepository, VersionlessId};
use forkpath_core::ForkpathError;
use forkpath_core::resolver::{
    AnchorArtifacts, InMemoryArtifactResolver, PROVIDER_GROUP_ID, ProviderClasspathAssembler,
    ResolutionClient, artifact_map_by_versionless_id, order_provider_artifacts,
};
use std::path::PathBuf;
use std::sync::Arc;

fn surefire(id: &str, version: &str) -> Artifact {
    Artifact::new(PROVIDER_GROUP_ID, id, version)
}

fn ids(artifacts: impl IntoIterator<Item = Artifact>) -> Vec<String> {
    artifacts.into_iter().map(|a| a.artifact_id).collect()
}

/// A junit4 provider graph with the shared modules at 3.0.0.
fn junit4_repository() -> InMemoryArtifactResolver {
    let resolver = InMemoryArtifactResolver::new();
    resolver.register(
        surefire("surefire-junit4", "3.0.0"),
        vec![
            surefire("common-junit4", "3.0.0"),
            surefire("surefire-api", "3.0.0"),
        ],
    );
    resolver.register(
        surefire("common-junit4", "3.0.0"),
        vec![
            Artifact::new("junit", "junit", "4.13.2"),
            surefire("common-java5", "3.0.0"),
            surefire("common-junit3", "3.0.0"),
        ],
    );
    resolver.register(
        surefire("surefire-api", "3.0.0"),
        vec![surefire("surefire-logger-api", "3.0.0")],
    );
    resolver.register(surefire("surefire-logger-api", "3.0.0"), vec![]);
    resolver.register(surefire("common-java5", "3.0.0"), vec![]);
    resolver.register(surefire("common-junit3", "3.0.0"), vec![]);
    resolver.register(
        Artifact::new("junit", "junit", "4.13.2"),
        vec![Artifact::new("org.hamcrest", "hamcrest-core", "1.3")],
    );
    resolver.register(Artifact::new("org.hamcrest", "hamcrest-core", "1.3"), vec![]);
    resolver
}

fn assembler(resolver: InMemoryArtifactResolver) -> ProviderClasspathAssembler {
    let client = ResolutionClient::new(
        Arc::new(resolver),
        PathBuf::from("/repo"),
        Some(vec![RemoteRepository::central()]),
        None,
    );
    ProviderClasspathAssembler::new(client, "surefire")
}

#[test]
fn test_provider_classpath_is_ordered_by_priority() {
    let assembler = assembler(junit4_repository());

    let classpath = assembler
        .get_provider_classpath("surefire-junit4", "3.0.0")
        .unwrap();

    assert_eq!(
        ids(classpath.clone()),
        vec![
            "surefire-junit4",
            "surefire-api",
            "surefire-logger-api",
            "common-java5",
            "common-junit3",
            "common-junit4",
            "junit",
            "hamcrest-core",
        ]
    );

    let provider = &classpath[0];
    assert_eq!(provider.scope.as_deref(), Some("test"));
    assert_eq!(provider.artifact_type.as_deref(), Some("jar"));
    assert!(provider.file().is_some());

    // Reordering an ordered classpath changes nothing
    assert_eq!(ids(order_provider_artifacts(classpath.clone())), ids(classpath));
}

#[test]
fn test_provider_classpath_as_map() {
    let assembler = assembler(junit4_repository());

    let map = assembler
        .get_provider_classpath_as_map("surefire-junit4", "3.0.0")
        .unwrap();

    assert_eq!(map.len(), 8);
    assert_eq!(
        map.keys().next(),
        Some(&VersionlessId::new(PROVIDER_GROUP_ID, "surefire-junit4"))
    );
    assert_eq!(
        map[&VersionlessId::new("junit", "junit")].version,
        "4.13.2"
    );
}

#[test]
fn test_unknown_provider_fails_with_requested_artifact() {
    let assembler = assembler(junit4_repository());

    let err = assembler
        .get_provider_classpath("surefire-testng", "3.0.0")
        .unwrap_err();

    assert!(matches!(err, ForkpathError::Resolution { .. }));
    let failed = err.failed_artifact().unwrap();
    assert_eq!(failed.artifact_id, "surefire-testng");
    assert_eq!(failed.group_id, PROVIDER_GROUP_ID);
}

#[test]
fn test_add_provider_pins_anchor_artifacts() {
    let resolver = junit4_repository();

    // The running plugin ships the 3.1.0 shared modules.
    let mojo = Artifact::new("org.apache.maven.plugins", "maven-surefire-plugin", "3.1.0");
    resolver.register(
        mojo.clone(),
        vec![
            surefire("common-java5", "3.1.0"),
            surefire("surefire-api", "3.1.0"),
        ],
    );
    resolver.register(surefire("common-java5", "3.1.0"), vec![]);
    resolver.register(
        surefire("surefire-api", "3.1.0"),
        vec![surefire("surefire-logger-api", "3.1.0")],
    );
    resolver.register(surefire("surefire-logger-api", "3.1.0"), vec![]);

    let anchors = AnchorArtifacts::surefire(
        surefire("common-java5", "3.1.0"),
        surefire("surefire-api", "3.1.0"),
        surefire("surefire-logger-api", "3.1.0"),
    );

    let assembler = assembler(resolver);
    let provider_map = assembler
        .get_provider_classpath_as_map("surefire-junit4", "3.0.0")
        .unwrap();

    let result = assembler
        .add_provider_to_classpath(&provider_map, &mojo, &anchors)
        .unwrap();

    for anchor_id in ["common-java5", "surefire-api", "surefire-logger-api"] {
        let copies: Vec<_> = result
            .iter()
            .filter(|a| a.versionless_id() == VersionlessId::new(PROVIDER_GROUP_ID, anchor_id))
            .collect();
        assert_eq!(copies.len(), 1, "{anchor_id} must appear exactly once");
        assert_eq!(copies[0].version, "3.1.0");
    }

    assert_eq!(
        ids(result),
        vec![
            "surefire-junit4",
            "surefire-api",
            "surefire-logger-api",
            "common-java5",
            "common-junit3",
            "common-junit4",
            "junit",
            "hamcrest-core",
        ]
    );
}

#[test]
fn test_add_provider_skips_artifacts_in_plugin_closure() {
    let resolver = junit4_repository();
    let mojo = Artifact::new("org.apache.maven.plugins", "maven-surefire-plugin", "3.0.0");
    resolver.register(mojo.clone(), vec![Artifact::new("junit", "junit", "4.13.2")]);

    let assembler = assembler(resolver);
    let plugin_map = artifact_map_by_versionless_id([
        Artifact::new("junit", "junit", "4.13.2"),
        surefire("common-java5", "3.0.0"),
    ]);

    let result = assembler
        .add_provider_to_classpath(&plugin_map, &mojo, &AnchorArtifacts::default())
        .unwrap();

    assert_eq!(ids(result), vec!["common-java5"]);
}

#[test]
fn test_add_provider_propagates_resolution_failure() {
    let resolver = junit4_repository();
    let mojo = Artifact::new("org.apache.maven.plugins", "maven-surefire-plugin", "3.0.0");
    resolver.register(mojo.clone(), vec![]);

    let assembler = assembler(resolver);
    let plugin_map = artifact_map_by_versionless_id([Artifact::new("org.example", "ghost", "1.0")]);

    let err = assembler
        .add_provider_to_classpath(&plugin_map, &mojo, &AnchorArtifacts::default())
        .unwrap_err();
    assert_eq!(err.failed_artifact().unwrap().artifact_id, "ghost");
}
