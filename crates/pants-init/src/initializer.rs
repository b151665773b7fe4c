//! Options assembly and the values derived from bootstrap options

use crate::cache::BuildConfigurationCache;
use crate::error::{Error, Result};
use crate::help::{FlagErrorHelp, HelpPrinter};
use pants_extensions::{BuildConfiguration, ModuleLoader};
use pants_fs::NormalizedPath;
use pants_options::{
    BootstrapOptions, GlobalOptionsValidator, OptionParser, Options, OptionsBootstrapper,
    UnknownFlagsError, pants_version,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Minimum supported `--rule-threads-core`.
const MIN_RULE_THREADS_CORE: usize = 2;
/// Unset `--rule-threads-max` is this many times the core count.
const DEFAULT_MAX_THREADS_FACTOR: usize = 4;

/// Globs that always invalidate the daemon, after path-derived ones.
const DEFAULT_INVALIDATION_GLOBS: [&str; 4] = [
    "!*.pyc",
    "!__pycache__/",
    "requirements.txt",
    "3rdparty/**/requirements.txt",
];

/// Placeholder args used to parse options without the offending flags.
const RECOVERY_ARGS: [&str; 1] = ["dummy_first_arg"];

/// Result of assembling options when unknown flags are recoverable.
#[derive(Debug, Clone)]
pub enum OptionsOutcome {
    Success(Options),
    /// The args contained unknown flags. `help` is the diagnostic already
    /// handed to the help printer.
    RecoverableUnknownFlags {
        help: FlagErrorHelp,
        error: UnknownFlagsError,
    },
}

/// Assembles validated [`Options`] from a bootstrapper and a build
/// configuration.
pub struct OptionsInitializer {
    parser: Arc<dyn OptionParser>,
    validator: Arc<dyn GlobalOptionsValidator>,
    help_printer: Arc<dyn HelpPrinter>,
}

impl OptionsInitializer {
    pub fn new(
        parser: Arc<dyn OptionParser>,
        validator: Arc<dyn GlobalOptionsValidator>,
        help_printer: Arc<dyn HelpPrinter>,
    ) -> Self {
        Self {
            parser,
            validator,
            help_printer,
        }
    }

    /// Core and maximum rule thread counts for the executor.
    ///
    /// An unset (or zero) maximum defaults to four times the core count;
    /// a core count too large for that fails.
    pub fn compute_executor_arguments(options: &BootstrapOptions) -> Result<(usize, usize)> {
        let core = options.rule_threads_core;
        if core < MIN_RULE_THREADS_CORE {
            return Err(Error::InvalidThreadCount { core });
        }
        let max = match options.rule_threads_max.filter(|max| *max > 0) {
            Some(max) => max,
            None => core
                .checked_mul(DEFAULT_MAX_THREADS_FACTOR)
                .ok_or(Error::ThreadCountOverflow { core })?,
        };
        Ok((core, max))
    }

    /// `--pants-ignore` as given, followed by the workdir, distdir and
    /// subprocessdir when they are strictly inside the build root, as
    /// root-anchored patterns.
    ///
    /// Nothing is deduplicated: patterns use gitignore syntax, where order
    /// decides which match wins.
    pub fn compute_pants_ignore(
        buildroot: &NormalizedPath,
        options: &BootstrapOptions,
    ) -> Vec<String> {
        let mut globs = options.pants_ignore.clone();

        for dir in [
            &options.pants_workdir,
            &options.pants_distdir,
            &options.pants_subprocessdir,
        ] {
            match dir.strip_root(buildroot) {
                Some(rel) if !rel.is_empty() => {
                    globs.push(format!("/{}", rel.trim_end_matches('/')));
                }
                _ => tracing::debug!(%dir, %buildroot, "Not under the build root, not ignored"),
            }
        }

        globs
    }

    /// Globs whose changes must restart the daemon.
    ///
    /// Module search paths, `--pythonpath` and config files under the build
    /// root contribute `rel` and `rel/**`; anything at or outside the root is
    /// dropped. The fixed defaults and `--pantsd-invalidation-globs` follow.
    pub fn compute_pantsd_invalidation_globs(
        buildroot: &NormalizedPath,
        options: &BootstrapOptions,
        loader: &dyn ModuleLoader,
    ) -> Vec<String> {
        let mut globs = GlobSet::default();

        let search_paths = loader.search_paths();
        let candidates = search_paths
            .iter()
            .map(String::as_str)
            .chain(options.pythonpath.iter().map(String::as_str))
            .chain(options.pants_config_files.iter().map(NormalizedPath::as_str));

        for candidate in candidates {
            let rel = NormalizedPath::new(candidate).relative_to(buildroot);
            if rel.as_str() == "." || rel.components().next() == Some("..") {
                tracing::debug!(
                    path = candidate,
                    "Changes outside of the build root will not be invalidated"
                );
                continue;
            }
            globs.insert(rel.as_str().to_string());
            globs.insert(format!("{rel}/**"));
        }

        globs.extend(DEFAULT_INVALIDATION_GLOBS.iter().map(|g| g.to_string()));
        globs.extend(options.pantsd_invalidation_globs.iter().cloned());
        globs.into_vec()
    }

    /// Parse and validate options for every scope `build_configuration`
    /// registers.
    ///
    /// Fails with [`Error::VersionMismatch`] before parsing anything when the
    /// requested version differs from the running one.
    pub fn create(
        &self,
        bootstrapper: &OptionsBootstrapper,
        build_configuration: &BuildConfiguration,
    ) -> Result<Options> {
        let requested = &bootstrapper.get_bootstrap_options().pants_version;
        let running = pants_version();
        if requested != running {
            return Err(Error::VersionMismatch {
                requested: requested.clone(),
                running: running.to_string(),
            });
        }

        let known_scope_infos = build_configuration.known_scope_infos();
        let options = self.parser.parse(&known_scope_infos, bootstrapper)?;
        self.validator.validate(options.for_global_scope())?;
        Ok(options)
    }

    /// [`create`](Self::create), turning unknown flags into a diagnostic.
    ///
    /// On unknown flags, options are parsed again without any args so the
    /// help printer has the full scope catalog to suggest from. Any other
    /// error is returned as is.
    pub fn create_with_recovery(
        &self,
        cache: &BuildConfigurationCache,
        bootstrapper: &OptionsBootstrapper,
        build_configuration: &BuildConfiguration,
    ) -> Result<OptionsOutcome> {
        let error = match self.create(bootstrapper, build_configuration) {
            Ok(options) => return Ok(OptionsOutcome::Success(options)),
            Err(Error::UnknownFlags(error)) => error,
            Err(other) => return Err(other),
        };

        tracing::debug!(%error, "Recovering from unknown flags");
        let build_configuration = cache.get(bootstrapper)?;
        let no_args = bootstrapper.with_args(RECOVERY_ARGS.iter().map(|a| a.to_string()).collect());
        let options = self.create(&no_args, &build_configuration)?;
        let help = self.help_printer.handle_unknown_flags(&options, &error);

        Ok(OptionsOutcome::RecoverableUnknownFlags { help, error })
    }

    /// The cached build configuration plus options for it.
    ///
    /// With unknown flags the diagnostic is always printed; then the error
    /// is returned if `raise_on_unknown`, otherwise no options are.
    pub fn create_with_build_config(
        &self,
        cache: &BuildConfigurationCache,
        bootstrapper: &OptionsBootstrapper,
        raise_on_unknown: bool,
    ) -> Result<(Arc<BuildConfiguration>, Option<Options>)> {
        let build_configuration = cache.get(bootstrapper)?;
        match self.create_with_recovery(cache, bootstrapper, &build_configuration)? {
            OptionsOutcome::Success(options) => Ok((build_configuration, Some(options))),
            OptionsOutcome::RecoverableUnknownFlags { error, .. } if raise_on_unknown => {
                Err(Error::UnknownFlags(error))
            }
            OptionsOutcome::RecoverableUnknownFlags { .. } => Ok((build_configuration, None)),
        }
    }
}

impl std::fmt::Debug for OptionsInitializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsInitializer").finish_non_exhaustive()
    }
}

/// Insertion-ordered, deduplicated globs.
#[derive(Debug, Default)]
struct GlobSet {
    seen: HashSet<String>,
    globs: Vec<String>,
}

impl GlobSet {
    fn insert(&mut self, glob: String) {
        if self.seen.insert(glob.clone()) {
            self.globs.push(glob);
        }
    }

    fn extend(&mut self, globs: impl IntoIterator<Item = String>) {
        for glob in globs {
            self.insert(glob);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.globs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_set_keeps_first_occurrence_order() {
        let mut globs = GlobSet::default();
        globs.extend(["b", "a", "b", "c", "a"].map(String::from));
        assert_eq!(globs.into_vec(), vec!["b", "a", "c"]);
    }
}
