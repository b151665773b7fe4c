//! Tests for "did you mean" diagnostics

use pants_extensions::{Activator, ExtensionLoader, WorkingSet};
use pants_init::FlagErrorHelp;
use pants_options::{ArgParser, Config, Options, UnknownFlagsError};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn options(args: &[&str]) -> Options {
    let config = ExtensionLoader::builtin()
        .load(&[], &WorkingSet::new(), &[])
        .unwrap();
    let argv: Vec<String> = std::iter::once("pants")
        .chain(args.iter().copied())
        .map(String::from)
        .collect();
    ArgParser::new()
        .parse_args(&config.known_scope_infos(), &argv, &BTreeMap::new(), &Config::empty())
        .unwrap()
}

#[test]
fn test_goal_scope_suggestions_and_misplaced_global() {
    let error = UnknownFlagsError::new("test", vec!["--debugg".into(), "--level".into()]);
    let help = FlagErrorHelp::compute(&options(&[]), &error);

    assert_eq!(help.suggestions[0].matches, vec!["--debug", "--no-debug"]);
    assert!(!help.suggestions[0].misplaced_global);
    assert!(help.suggestions[1].misplaced_global);

    insta::assert_snapshot!(help.render(false).trim_end(), @r###"
    Unknown flag --debugg on test scope
    Did you mean --debug, --no-debug?
    Unknown flag --level on test scope
    Did you mean to use the global --level? Global options must come before any goals or goal-specific options.
    Use `./pants help test` to get help.
    "###);
}

#[test]
fn test_global_scope_suggestions() {
    let error = UnknownFlagsError::new("", vec!["--levle".into(), "--zzzzzz".into()]);
    let help = FlagErrorHelp::compute(&options(&[]), &error);

    insta::assert_snapshot!(help.render(false).trim_end(), @r###"
    Unknown flag --levle on global scope
    Did you mean --level?
    Unknown flag --zzzzzz on global scope
    Use `./pants help` to get help.
    "###);
}

#[test]
fn test_help_command_uses_bin_name() {
    let error = UnknownFlagsError::new("lint", vec!["--fast".into()]);
    let help = FlagErrorHelp::compute(&options(&["--pants-bin-name=pants2"]), &error);

    assert_eq!(help.help_command, "pants2 help lint");
}

#[test]
fn test_colored_render_keeps_the_text() {
    let error = UnknownFlagsError::new("", vec!["--levle".into()]);
    let help = FlagErrorHelp::compute(&options(&[]), &error);

    let colored = help.render(true);
    assert!(colored.contains("--levle"));
    assert!(colored.contains("./pants help"));
}
