//! The global scope's option declarations

use crate::pants_version;
use crate::scope::{GLOBAL_SCOPE, OptionKind, OptionSpec, Optionable, ScopeInfo};

pub const PANTS_VERSION: &str = "pants-version";
pub const PYTHONPATH: &str = "pythonpath";
pub const PLUGINS: &str = "plugins";
pub const BACKEND_PACKAGES: &str = "backend-packages";
pub const PANTS_IGNORE: &str = "pants-ignore";
pub const PANTS_WORKDIR: &str = "pants-workdir";
pub const PANTS_DISTDIR: &str = "pants-distdir";
pub const PANTS_SUBPROCESSDIR: &str = "pants-subprocessdir";
pub const RULE_THREADS_CORE: &str = "rule-threads-core";
pub const RULE_THREADS_MAX: &str = "rule-threads-max";
pub const PANTSD_INVALIDATION_GLOBS: &str = "pantsd-invalidation-globs";
pub const PANTS_CONFIG_FILES: &str = "pants-config-files";
pub const LEVEL: &str = "level";
pub const PANTS_BIN_NAME: &str = "pants-bin-name";
pub const COLORS: &str = "colors";
pub const PRINT_STACKTRACE: &str = "print-stacktrace";

/// Log levels accepted by `--level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Options that apply to every Pants invocation.
///
/// The bootstrap subset is parsed before any plugin is loaded; the full set
/// is registered by the core backend alongside everything plugins add.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalOptions;

impl GlobalOptions {
    /// Options needed before the full schema is known.
    pub fn bootstrap_scope_info() -> ScopeInfo {
        ScopeInfo::new(GLOBAL_SCOPE, "Options that apply to all Pants invocations.")
            .with_option(
                OptionSpec::string(PANTS_VERSION, pants_version())
                    .with_help("Use this Pants version. Must match the running version."),
            )
            .with_option(
                OptionSpec::list(PYTHONPATH, Vec::<String>::new())
                    .with_help("Add these directories to the module search path to search for plugins."),
            )
            .with_option(
                OptionSpec::list(PLUGINS, Vec::<String>::new())
                    .with_help("Allow backends to be loaded from these plugin requirements."),
            )
            .with_option(
                OptionSpec::list(BACKEND_PACKAGES, Vec::<String>::new())
                    .with_help("Register functionality from these backends."),
            )
            .with_option(
                OptionSpec::list(PANTS_IGNORE, [".*/", "/dist/"])
                    .with_help("Paths to ignore for all filesystem operations, in gitignore syntax."),
            )
            .with_option(
                OptionSpec::string(PANTS_WORKDIR, ".pants.d")
                    .with_help("Write intermediate logs and output files to this dir."),
            )
            .with_option(
                OptionSpec::string(PANTS_DISTDIR, "dist")
                    .with_help("Assume that all outputs are written to this dir."),
            )
            .with_option(
                OptionSpec::string(PANTS_SUBPROCESSDIR, ".pids")
                    .with_help("The directory to use for tracking subprocess metadata."),
            )
            .with_option(
                OptionSpec::int(RULE_THREADS_CORE, default_rule_threads_core())
                    .with_help("The number of threads to keep active to execute rules."),
            )
            .with_option(
                OptionSpec::new(RULE_THREADS_MAX, OptionKind::Int)
                    .with_help("The maximum number of threads to use to execute rules. Defaults to 4x the core threads."),
            )
            .with_option(
                OptionSpec::list(PANTSD_INVALIDATION_GLOBS, Vec::<String>::new())
                    .with_help("Filesystem events matching any of these globs will trigger a daemon restart."),
            )
            .with_option(
                OptionSpec::list(PANTS_CONFIG_FILES, ["pants.toml"])
                    .with_help("Paths to Pants config files, relative to the build root."),
            )
            .with_option(OptionSpec::string(LEVEL, "info").with_help("Set the logging level."))
            .with_option(
                OptionSpec::string(PANTS_BIN_NAME, "./pants")
                    .with_help("The name of the script or binary used to invoke Pants."),
            )
    }

    /// The complete global scope.
    pub fn scope_info() -> ScopeInfo {
        Self::bootstrap_scope_info()
            .with_option(
                OptionSpec::bool(COLORS, true)
                    .with_help("Set whether log messages are displayed in color."),
            )
            .with_option(
                OptionSpec::bool(PRINT_STACKTRACE, false)
                    .with_help("Print the full exception stack trace for any errors."),
            )
    }
}

impl Optionable for GlobalOptions {
    fn options_scope(&self) -> &str {
        GLOBAL_SCOPE
    }

    fn known_scope_infos(&self) -> Vec<ScopeInfo> {
        vec![Self::scope_info()]
    }
}

fn default_rule_threads_core() -> i64 {
    let cpus = std::thread::available_parallelism().map_or(2, |n| n.get());
    i64::try_from((cpus / 2).max(2)).unwrap_or(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_options_are_a_subset_of_global_options() {
        let bootstrap = GlobalOptions::bootstrap_scope_info();
        let full = GlobalOptions::scope_info();
        for spec in &bootstrap.options {
            assert!(full.option(&spec.name).is_some(), "missing {}", spec.name);
        }
        assert!(full.option(COLORS).is_some());
        assert!(bootstrap.option(COLORS).is_none());
    }

    #[test]
    fn default_rule_threads_core_is_at_least_two() {
        assert!(default_rule_threads_core() >= 2);
    }

    #[test]
    fn rule_threads_max_has_no_default() {
        let info = GlobalOptions::bootstrap_scope_info();
        assert_eq!(info.option(RULE_THREADS_MAX).unwrap().default, None);
    }
}
