//! Tests for activating backends and plugins

use pants_extensions::backend::{CORE_BACKEND, PROTOBUF_JAVA_BACKEND, PYTHON_BACKEND};
use pants_extensions::{
    Activator, Backend, BackendRegistry, BuildConfigurationBuilder, Distribution, Error,
    ExtensionLoader, WorkingSet,
};
use pants_options::{OptionSpec, ScopeInfo, Subsystem};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn register_go(builder: &mut BuildConfigurationBuilder) -> pants_extensions::Result<()> {
    builder.register_optionable(Arc::new(Subsystem::new(
        ScopeInfo::new("go-distribution", "The Go toolchain.")
            .with_option(OptionSpec::string("version", "1.13.4")),
    )))?;
    builder.register_target_type("go_binary", "A Go main package.")
}

fn register_shadow_python(builder: &mut BuildConfigurationBuilder) -> pants_extensions::Result<()> {
    builder.register_target_type("python_library", "Another Python library.")
}

fn registry_with_plugins() -> BackendRegistry {
    let mut registry = BackendRegistry::with_builtins();
    registry.register(Backend::new("pants.contrib.go", "Go support.", register_go));
    registry.register(Backend::new(
        "shadow.python",
        "Conflicting aliases.",
        register_shadow_python,
    ));
    registry
}

#[test]
fn test_core_is_always_activated_first() {
    let config = ExtensionLoader::builtin()
        .load(&[], &WorkingSet::new(), &[])
        .unwrap();

    assert_eq!(config.providers(), [CORE_BACKEND]);
    assert!(config.target_type("files").is_some());
    assert_eq!(config.known_scope_infos()[0].scope, "");
}

#[test]
fn test_backend_packages_activate_in_order() {
    let config = ExtensionLoader::builtin()
        .load(
            &[],
            &WorkingSet::new(),
            &strings(&[PROTOBUF_JAVA_BACKEND, PYTHON_BACKEND, PYTHON_BACKEND, CORE_BACKEND]),
        )
        .unwrap();

    assert_eq!(config.providers(), [CORE_BACKEND, PROTOBUF_JAVA_BACKEND, PYTHON_BACKEND]);
    assert_eq!(
        config.target_type("java_protobuf_library").unwrap().provider,
        PROTOBUF_JAVA_BACKEND
    );
}

#[test]
fn test_unknown_backend_is_an_error() {
    let err = ExtensionLoader::builtin()
        .load(&[], &WorkingSet::new(), &strings(&["pants.backend.cobol"]))
        .unwrap_err();

    assert!(matches!(err, Error::UnknownBackend(ref name) if name == "pants.backend.cobol"));
}

#[test]
fn test_plugins_activate_their_entry_points() {
    let mut working_set = WorkingSet::new();
    working_set.add(Distribution::new("pants-contrib-go", "1.2.0", "pants.contrib.go").unwrap());

    let config = ExtensionLoader::new(registry_with_plugins())
        .load(&strings(&["pants-contrib-go>=1.0"]), &working_set, &[])
        .unwrap();

    assert_eq!(config.providers(), [CORE_BACKEND, "pants.contrib.go"]);
    assert_eq!(config.scope_provider("go-distribution"), Some("pants.contrib.go"));
}

#[test]
fn test_plugin_missing_from_working_set() {
    let err = ExtensionLoader::new(registry_with_plugins())
        .load(&strings(&["pants-contrib-go"]), &WorkingSet::new(), &[])
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "plugin 'pants-contrib-go' is not in the resolved working set"
    );
}

#[test]
fn test_conflicting_backends_name_both_providers() {
    let err = ExtensionLoader::new(registry_with_plugins())
        .load(&[], &WorkingSet::new(), &strings(&[PYTHON_BACKEND, "shadow.python"]))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "target type 'python_library' is registered by both pants.backend.python and shadow.python"
    );
}
