//! End-to-end bootstrap: bootstrapper -> cached build configuration -> options
//!
//! These tests wire the default collaborators together and only swap in
//! counting doubles where call counts matter.

use pants_extensions::SearchPath;
use pants_init::{BootstrapSession, Error, OptionsInitializer};
use pants_test_utils::{CountingActivator, TestBuildRoot};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn session_with(activator: &Arc<CountingActivator>) -> BootstrapSession {
    BootstrapSession::builder()
        .activator(activator.clone())
        .loader(Arc::new(SearchPath::new()))
        .build()
}

#[test]
fn test_python_repo_end_to_end() {
    let root = TestBuildRoot::new();
    root.write_config(&format!(
        r#"
[GLOBAL]
backend_packages = ["pants.backend.python"]
pythonpath = ["{}"]
rule_threads_core = 3

[pytest]
args = ["--color=yes"]
"#,
        root.path("pants-plugins")
    ));
    let session = BootstrapSession::builtin(Arc::new(SearchPath::new()));
    let bootstrapper =
        root.bootstrapper(&["--level=debug", "test", "--force", "src/python::", "--", "-x"]);

    let (config, options) = session.create_with_build_config(&bootstrapper, true).unwrap();
    let options = options.unwrap();

    assert!(config.is_activated("pants.backend.python"));
    assert_eq!(options.goals(), ["test"]);
    assert_eq!(options.specs(), ["src/python::"]);
    assert_eq!(options.passthru(), ["-x"]);
    assert_eq!(options.for_global_scope().get_str("level"), Some("debug"));
    assert_eq!(options.for_scope("test").unwrap().get_bool("force"), Some(true));
    assert_eq!(options.for_scope("pytest").unwrap().get_list("args").unwrap(), ["--color=yes"]);

    let bootstrap_options = bootstrapper.get_bootstrap_options();
    assert_eq!(
        OptionsInitializer::compute_executor_arguments(bootstrap_options).unwrap(),
        (3, 12)
    );
    let globs = session.pantsd_invalidation_globs(&bootstrapper);
    assert_eq!(
        &globs[..4],
        ["pants-plugins", "pants-plugins/**", "pants.toml", "pants.toml/**"]
    );
    assert_eq!(session.loader().search_paths(), vec![root.path("pants-plugins")]);
}

#[test]
fn test_recovery_then_corrected_args_share_one_activation() {
    let root = TestBuildRoot::new();
    let activator = Arc::new(CountingActivator::new());
    let session = session_with(&activator);

    let typo = root.bootstrapper(&["lint", "--fsat"]);
    let (_, options) = session.create_with_build_config(&typo, false).unwrap();
    assert!(options.is_none());

    let fixed = typo.with_args(vec!["pants".into(), "lint".into(), "::".into()]);
    let (_, options) = session.create_with_build_config(&fixed, false).unwrap();

    assert_eq!(options.unwrap().goals(), ["lint"]);
    assert_eq!(activator.calls(), 1);
}

#[test]
fn test_sessions_do_not_share_a_cache() {
    let root = TestBuildRoot::new();
    let first_activator = Arc::new(CountingActivator::new());
    let second_activator = Arc::new(CountingActivator::new());
    let first = session_with(&first_activator);
    let second = session_with(&second_activator);
    let bootstrapper = root.bootstrapper(&[]);

    first.create_with_build_config(&bootstrapper, true).unwrap();
    second.create_with_build_config(&bootstrapper, true).unwrap();
    first.cache().reset();
    first.create_with_build_config(&bootstrapper, true).unwrap();

    assert_eq!(first_activator.calls(), 2);
    assert_eq!(second_activator.calls(), 1);
    assert!(second.cache().is_cached());
}

#[test]
fn test_cached_configuration_ignores_later_backend_changes() {
    let root = TestBuildRoot::new();
    let activator = Arc::new(CountingActivator::new());
    let session = session_with(&activator);

    let (core_only, _) = session.create_with_build_config(&root.bootstrapper(&[]), true).unwrap();
    let with_python = root.bootstrapper(&["--backend-packages=+['pants.backend.python']"]);
    let (cached, _) = session.create_with_build_config(&with_python, true).unwrap();

    assert!(Arc::ptr_eq(&core_only, &cached));
    assert!(!cached.is_activated("pants.backend.python"));

    session.cache().reset();
    let (fresh, _) = session.create_with_build_config(&with_python, true).unwrap();
    assert!(fresh.is_activated("pants.backend.python"));
    assert_eq!(activator.last_backend_packages(), vec!["pants.backend.python"]);
}

#[test]
fn test_goal_options_are_unknown_without_their_backend() {
    let root = TestBuildRoot::new();
    let session = BootstrapSession::builtin(Arc::new(SearchPath::new()));
    let bootstrapper = root.bootstrapper(&["repl", "--shell=ipython"]);

    let err = session.create_with_build_config(&bootstrapper, true).unwrap_err();

    match err {
        Error::UnknownFlags(unknown) => assert_eq!(unknown.flags, vec!["--shell"]),
        other => panic!("expected unknown flags, got {other:?}"),
    }
}
