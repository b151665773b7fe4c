//! CLI argument parsing using clap derive

use clap::Parser;
use std::path::PathBuf;

/// Pants bootstrap - Derive the build configuration and options for a build root
///
/// Everything after `--` is parsed the way `pants` would parse it.
///
/// Examples:
///   pantsboot -- test src/python::       # Options for a test run
///   pantsboot --json -- --level=debug     # Machine-readable report
///   pantsboot --strict -- lint --fats     # Fail on unknown flags
#[derive(Parser, Debug)]
#[command(name = "pantsboot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Build root (defaults to the current directory)
    #[arg(long, env = "PANTSBOOT_BUILDROOT")]
    pub buildroot: Option<PathBuf>,

    /// Fail when the args contain unknown flags instead of recovering
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Arguments as they would be passed to pants
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn trailing_args_keep_their_flags() {
        let cli =
            Cli::try_parse_from(["pantsboot", "--strict", "--", "test", "--debug", "src::"])
                .unwrap();
        assert!(cli.strict);
        assert!(!cli.json);
        assert_eq!(cli.args, vec!["test", "--debug", "src::"]);
    }

    #[test]
    fn no_trailing_args() {
        let cli = Cli::try_parse_from(["pantsboot", "--buildroot", "/repo", "-v"]).unwrap();
        assert_eq!(cli.buildroot, Some(PathBuf::from("/repo")));
        assert!(cli.verbose);
        assert!(cli.args.is_empty());
    }
}
