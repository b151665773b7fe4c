//! End-to-end plugin resolution and activation through a session

use pants_extensions::{Distribution, IndexPluginResolver, PluginIndex, SearchPath};
use pants_init::{BootstrapSession, Error};
use pants_test_utils::{CountingResolver, FailingResolver, TestBuildRoot};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const PROTOBUF_JAVA: &str = "pants.backend.codegen.protobuf.java";

fn index() -> PluginIndex {
    PluginIndex::new()
        .with(Distribution::new("pants-protobuf-java", "0.9.0", PROTOBUF_JAVA).unwrap())
        .with(Distribution::new("pants-protobuf-java", "1.3.0", PROTOBUF_JAVA).unwrap())
        .with(Distribution::new("pants-cobol", "1.0.0", "pants.backend.cobol").unwrap())
}

fn session(resolver: IndexPluginResolver) -> BootstrapSession {
    BootstrapSession::builder()
        .resolver(Arc::new(resolver))
        .loader(Arc::new(SearchPath::new()))
        .build()
}

#[test]
fn test_plugin_entry_point_contributes_scopes_and_targets() {
    let root = TestBuildRoot::new();
    root.write_config(concat!(
        "[GLOBAL]\n",
        "plugins = [\"pants-protobuf-java>=1.0\"]\n",
        "\n",
        "[protoc]\n",
        "version = \"3.12.0\"\n",
    ));
    let session = session(IndexPluginResolver::new(index()));

    let (config, options) = session
        .create_with_build_config(&root.bootstrapper(&["list", "::"]), true)
        .unwrap();

    let target = config.target_type("java_protobuf_library").unwrap();
    assert_eq!(target.provider, "pants.backend.codegen.protobuf.java");
    assert_eq!(config.scope_provider("protoc"), Some("pants.backend.codegen.protobuf.java"));
    assert_eq!(
        options.unwrap().for_scope("protoc").unwrap().get_str("version"),
        Some("3.12.0")
    );
}

#[test]
fn test_unsatisfiable_plugin_fails_resolution() {
    let root = TestBuildRoot::new();
    let session = session(IndexPluginResolver::new(index()));
    let bootstrapper = root.bootstrapper(&["--plugins=pants-protobuf-java>=2.0"]);

    let err = session.create_with_build_config(&bootstrapper, false).unwrap_err();

    assert!(matches!(err, Error::Extensions(pants_extensions::Error::Resolution { .. })));
    assert!(!err.is_configuration_error());
    assert!(!session.cache().is_cached());
}

#[test]
fn test_plugin_with_unregistered_entry_point_is_a_configuration_error() {
    let root = TestBuildRoot::new();
    let session = session(IndexPluginResolver::new(index()));
    let bootstrapper = root.bootstrapper(&["--plugins=pants-cobol"]);

    let err = session.create_with_build_config(&bootstrapper, false).unwrap_err();

    assert_eq!(err.to_string(), "unknown backend package 'pants.backend.cobol'");
    assert!(err.is_configuration_error());
}

#[test]
fn test_resolver_failure_is_reported_unchanged() {
    let root = TestBuildRoot::new();
    let session = BootstrapSession::builder()
        .resolver(Arc::new(FailingResolver))
        .build();

    let err = session
        .create_with_build_config(&root.bootstrapper(&[]), false)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "could not resolve plugin '*': plugin index unavailable"
    );
}

#[test]
fn test_resolution_happens_once_per_cached_configuration() {
    let root = TestBuildRoot::new();
    let resolver = Arc::new(CountingResolver::new(IndexPluginResolver::new(index())));
    let session = BootstrapSession::builder()
        .resolver(resolver.clone())
        .loader(Arc::new(SearchPath::new()))
        .build();
    let bootstrapper = root.bootstrapper(&["--plugins=pants-protobuf-java"]);

    for _ in 0..3 {
        session.create_with_build_config(&bootstrapper, true).unwrap();
    }
    session.cache().reset();
    session.create_with_build_config(&bootstrapper, true).unwrap();

    assert_eq!(resolver.calls(), 2);
}
