//! Bootstrap options and the bootstrapper that produces them

use crate::config::Config;
use crate::error::{Error, Result};
use crate::global::{self, GlobalOptions};
use crate::parser::ArgParser;
use crate::value::OptionValueContainer;
use pants_fs::NormalizedPath;
use serde::Serialize;
use std::collections::BTreeMap;

/// Typed view of the bootstrap subset of global options.
///
/// Directory and config file options are absolute (joined onto the
/// buildroot when given relative). `pythonpath` entries are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapOptions {
    pub pants_version: String,
    pub pythonpath: Vec<String>,
    pub plugins: Vec<String>,
    pub backend_packages: Vec<String>,
    pub pants_ignore: Vec<String>,
    pub pants_workdir: NormalizedPath,
    pub pants_distdir: NormalizedPath,
    pub pants_subprocessdir: NormalizedPath,
    pub rule_threads_core: usize,
    pub rule_threads_max: Option<usize>,
    pub pantsd_invalidation_globs: Vec<String>,
    pub pants_config_files: Vec<NormalizedPath>,
    pub level: String,
    pub pants_bin_name: String,
}

impl BootstrapOptions {
    /// Build from a parsed global-scope container.
    pub fn from_container(
        values: &OptionValueContainer,
        buildroot: &NormalizedPath,
    ) -> Result<Self> {
        let list = |name: &str| values.get_list(name).map(<[String]>::to_vec).unwrap_or_default();
        let string = |name: &str| values.get_str(name).unwrap_or_default().to_string();
        let dir = |name: &str| absolute(buildroot, values.get_str(name).unwrap_or_default());

        let rule_threads_core = match values.get_int(global::RULE_THREADS_CORE) {
            Some(n) => thread_count(global::RULE_THREADS_CORE, n)?,
            None => 0,
        };
        let rule_threads_max = values
            .get_int(global::RULE_THREADS_MAX)
            .map(|n| thread_count(global::RULE_THREADS_MAX, n))
            .transpose()?;

        Ok(Self {
            pants_version: string(global::PANTS_VERSION),
            pythonpath: list(global::PYTHONPATH),
            plugins: list(global::PLUGINS),
            backend_packages: list(global::BACKEND_PACKAGES),
            pants_ignore: list(global::PANTS_IGNORE),
            pants_workdir: dir(global::PANTS_WORKDIR),
            pants_distdir: dir(global::PANTS_DISTDIR),
            pants_subprocessdir: dir(global::PANTS_SUBPROCESSDIR),
            rule_threads_core,
            rule_threads_max,
            pantsd_invalidation_globs: list(global::PANTSD_INVALIDATION_GLOBS),
            pants_config_files: list(global::PANTS_CONFIG_FILES)
                .iter()
                .map(|file| absolute(buildroot, file))
                .collect(),
            level: string(global::LEVEL),
            pants_bin_name: string(global::PANTS_BIN_NAME),
        })
    }
}

fn absolute(buildroot: &NormalizedPath, path: &str) -> NormalizedPath {
    let path = NormalizedPath::new(path);
    if path.is_absolute() {
        path
    } else {
        buildroot.join(path.as_str())
    }
}

fn thread_count(option: &str, n: i64) -> Result<usize> {
    usize::try_from(n).map_err(|_| {
        Error::invalid_value("", option, n.to_string(), "must not be negative")
    })
}

/// Everything known about an invocation before plugins are loaded.
///
/// Holds the raw args, the `PANTS_*` environment, the merged config files and
/// the [`BootstrapOptions`] parsed from them.
#[derive(Debug, Clone)]
pub struct OptionsBootstrapper {
    buildroot: NormalizedPath,
    env: BTreeMap<String, String>,
    args: Vec<String>,
    config: Config,
    bootstrap_options: BootstrapOptions,
}

impl OptionsBootstrapper {
    /// Parse bootstrap options for an invocation.
    ///
    /// Config files are located in two passes: flags and env alone decide
    /// `--pants-config-files`, then those files are loaded and the bootstrap
    /// options are parsed again with config values in place.
    pub fn create<I, K, V>(buildroot: NormalizedPath, env: I, args: Vec<String>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env: BTreeMap<String, String> = env
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with("PANTS_"))
            .collect();

        let parser = ArgParser::new();
        let info = GlobalOptions::bootstrap_scope_info();

        let pre = parser.parse_bootstrap(&info, &args, &env, &Config::empty())?;
        let config_files = BootstrapOptions::from_container(&pre, &buildroot)?.pants_config_files;
        let config = Config::load(&config_files)?;

        let values = parser.parse_bootstrap(&info, &args, &env, &config)?;
        let bootstrap_options = BootstrapOptions::from_container(&values, &buildroot)?;

        tracing::debug!(
            buildroot = %buildroot,
            config_files = config.sources().len(),
            "Parsed bootstrap options"
        );

        Ok(Self {
            buildroot,
            env,
            args,
            config,
            bootstrap_options,
        })
    }

    /// The same environment and config with different args.
    ///
    /// Bootstrap options are kept as already parsed.
    pub fn with_args(&self, args: Vec<String>) -> Self {
        Self {
            args,
            ..self.clone()
        }
    }

    pub fn buildroot(&self) -> &NormalizedPath {
        &self.buildroot
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// `PANTS_*` environment variables.
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get_bootstrap_options(&self) -> &BootstrapOptions {
        &self.bootstrap_options
    }
}
