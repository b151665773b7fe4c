//! Tests for options assembly and unknown-flag recovery

mod common;

use common::Harness;
use pants_init::{Error, OptionsInitializer, OptionsOutcome};
use pants_options::{Rank, pants_version};
use pants_test_utils::TestBuildRoot;
use pretty_assertions::assert_eq;

#[test]
fn test_create_parses_every_registered_scope() {
    let root = TestBuildRoot::new();
    root.write_config(concat!(
        "[GLOBAL]\n",
        "backend_packages = [\"pants.backend.python\"]\n",
        "\n",
        "[pytest]\n",
        "args = [\"-vv\"]\n",
    ));
    let harness = Harness::new();
    let bootstrapper = root.bootstrapper(&["test", "--debug", "src/python::", "--", "-k", "smoke"]);

    let (config, options) = harness.session.create_with_build_config(&bootstrapper, true).unwrap();
    let options = options.unwrap();

    assert!(config.target_type("python_tests").is_some());
    assert_eq!(options.goals(), ["test"]);
    assert_eq!(options.specs(), ["src/python::"]);
    assert_eq!(options.passthru(), ["-k", "smoke"]);
    assert_eq!(options.for_scope("test").unwrap().get_bool("debug"), Some(true));
    assert_eq!(options.for_scope("pytest").unwrap().get_list("args").unwrap(), ["-vv"]);
    assert_eq!(options.for_scope("pytest").unwrap().rank("args"), Some(Rank::Config));
    assert!(harness.printer.calls().is_empty());
}

#[test]
fn test_version_mismatch_names_both_versions() {
    let root = TestBuildRoot::new();
    let harness = Harness::new();
    let bootstrapper = root.bootstrapper(&["--pants-version=0.0.1"]);

    let err = harness.session.create_with_build_config(&bootstrapper, false).unwrap_err();

    assert_eq!(
        err.to_string(),
        format!(
            "Version mismatch: Requested version was 0.0.1, our version is {}.",
            pants_version()
        )
    );
    assert!(err.is_configuration_error());
    assert!(harness.printer.calls().is_empty());
}

#[test]
fn test_version_mismatch_is_checked_before_flags() {
    let root = TestBuildRoot::new();
    let harness = Harness::new();
    let bootstrapper = root.bootstrapper(&["--pants-version=0.0.1", "--no-such-flag"]);

    let err = harness.session.create_with_build_config(&bootstrapper, false).unwrap_err();

    assert!(matches!(err, Error::VersionMismatch { .. }));
    assert!(harness.printer.calls().is_empty());
}

#[test]
fn test_unknown_flags_without_raise_yield_no_options() {
    let root = TestBuildRoot::new();
    let harness = Harness::new();
    let bootstrapper = root.bootstrapper(&["test", "--debugg"]);

    let (config, options) = harness.session.create_with_build_config(&bootstrapper, false).unwrap();

    assert!(options.is_none());
    assert!(config.target_type("files").is_some());
    let calls = harness.printer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.arg_scope, "test");
    assert_eq!(calls[0].0.flags, vec!["--debugg"]);
    assert_eq!(harness.activator.calls(), 1);
}

#[test]
fn test_unknown_flags_with_raise_reraise_after_diagnostic() {
    let root = TestBuildRoot::new();
    let harness = Harness::new();
    let bootstrapper = root.bootstrapper(&["test", "--debugg"]);

    let err = harness.session.create_with_build_config(&bootstrapper, true).unwrap_err();

    match err {
        Error::UnknownFlags(unknown) => {
            assert_eq!(unknown.arg_scope, "test");
            assert_eq!(unknown.flags, vec!["--debugg"]);
        }
        other => panic!("expected unknown flags, got {other:?}"),
    }
    assert_eq!(harness.printer.calls().len(), 1);
}

#[test]
fn test_recovery_outcome_carries_the_diagnostic() {
    let root = TestBuildRoot::new();
    let harness = Harness::new();
    let bootstrapper = root.bootstrapper(&["--levle=debug"]);
    let cache = harness.session.cache();
    let config = cache.get(&bootstrapper).unwrap();

    let outcome = harness
        .session
        .initializer()
        .create_with_recovery(cache, &bootstrapper, &config)
        .unwrap();

    match outcome {
        OptionsOutcome::RecoverableUnknownFlags { help, error } => {
            assert_eq!(error.flags, vec!["--levle"]);
            assert_eq!(help.suggestions[0].matches, vec!["--level"]);
            assert_eq!(help.help_command, "./pants help");
        }
        OptionsOutcome::Success(_) => panic!("expected unknown flags"),
    }
}

#[test]
fn test_validation_errors_propagate_without_diagnostic() {
    let root = TestBuildRoot::new();
    let harness = Harness::new();
    let bootstrapper = root.bootstrapper(&["--level=loud"]);

    let err = harness.session.create_with_build_config(&bootstrapper, false).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid option --level: \"loud\" is not one of trace, debug, info, warn, error"
    );
    assert!(err.is_configuration_error());
    assert!(harness.printer.calls().is_empty());
}

#[test]
fn test_zero_rule_threads_max_passes_validation() {
    let root = TestBuildRoot::new();
    let harness = Harness::new();
    let bootstrapper = root.bootstrapper(&["--rule-threads-core=3", "--rule-threads-max=0"]);

    let (_, options) = harness.session.create_with_build_config(&bootstrapper, true).unwrap();

    assert!(options.is_some());
    assert_eq!(
        OptionsInitializer::compute_executor_arguments(bootstrapper.get_bootstrap_options())
            .unwrap(),
        (3, 12)
    );
}

#[test]
fn test_malformed_scoped_value_is_not_recoverable() {
    let root = TestBuildRoot::new();
    let harness = Harness::new();
    let bootstrapper = root.bootstrapper(&["test", "--debug=sometimes"]);

    let err = harness.session.create_with_build_config(&bootstrapper, false).unwrap_err();

    assert!(matches!(err, Error::Options(pants_options::Error::InvalidValue { .. })));
    assert!(harness.printer.calls().is_empty());
}

#[test]
fn test_unknown_backend_is_fatal() {
    let root = TestBuildRoot::new();
    root.write_config("[GLOBAL]\nbackend_packages = [\"pants.backend.cobol\"]\n");
    let harness = Harness::new();

    let err = harness
        .session
        .create_with_build_config(&root.bootstrapper(&[]), false)
        .unwrap_err();

    assert_eq!(err.to_string(), "unknown backend package 'pants.backend.cobol'");
    assert!(err.is_configuration_error());
}
