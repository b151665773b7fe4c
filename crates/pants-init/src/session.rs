//! A caller-owned bootstrap context

use crate::cache::BuildConfigurationCache;
use crate::error::Result;
use crate::help::{FlagErrorHelpPrinter, HelpPrinter};
use crate::initializer::OptionsInitializer;
use pants_extensions::{
    Activator, BuildConfiguration, ExtensionLoader, IndexPluginResolver, ModuleLoader,
    PluginResolver, SearchPath,
};
use pants_options::{
    ArgParser, GlobalOptions, GlobalOptionsValidator, OptionParser, Options, OptionsBootstrapper,
};
use std::sync::Arc;

/// One build configuration cache and the initializer that uses it.
///
/// Everything that would otherwise be process-wide state lives here, so
/// independent sessions (and tests) never share a cached configuration.
#[derive(Debug)]
pub struct BootstrapSession {
    cache: BuildConfigurationCache,
    initializer: OptionsInitializer,
}

impl BootstrapSession {
    /// Default collaborators around the given module search path.
    pub fn builtin(loader: Arc<dyn ModuleLoader>) -> Self {
        Self::builder().loader(loader).build()
    }

    pub fn builder() -> BootstrapSessionBuilder {
        BootstrapSessionBuilder::default()
    }

    pub fn cache(&self) -> &BuildConfigurationCache {
        &self.cache
    }

    pub fn initializer(&self) -> &OptionsInitializer {
        &self.initializer
    }

    pub fn loader(&self) -> &dyn ModuleLoader {
        self.cache.loader()
    }

    /// See [`OptionsInitializer::create_with_build_config`].
    pub fn create_with_build_config(
        &self,
        bootstrapper: &OptionsBootstrapper,
        raise_on_unknown: bool,
    ) -> Result<(Arc<BuildConfiguration>, Option<Options>)> {
        self.initializer
            .create_with_build_config(&self.cache, bootstrapper, raise_on_unknown)
    }

    /// Invalidation globs against this session's module search path.
    pub fn pantsd_invalidation_globs(&self, bootstrapper: &OptionsBootstrapper) -> Vec<String> {
        OptionsInitializer::compute_pantsd_invalidation_globs(
            bootstrapper.buildroot(),
            bootstrapper.get_bootstrap_options(),
            self.loader(),
        )
    }
}

/// Builder for [`BootstrapSession`]; unset collaborators get defaults.
#[derive(Default)]
pub struct BootstrapSessionBuilder {
    resolver: Option<Arc<dyn PluginResolver>>,
    activator: Option<Arc<dyn Activator>>,
    loader: Option<Arc<dyn ModuleLoader>>,
    parser: Option<Arc<dyn OptionParser>>,
    validator: Option<Arc<dyn GlobalOptionsValidator>>,
    help_printer: Option<Arc<dyn HelpPrinter>>,
}

impl BootstrapSessionBuilder {
    pub fn resolver(mut self, resolver: Arc<dyn PluginResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn activator(mut self, activator: Arc<dyn Activator>) -> Self {
        self.activator = Some(activator);
        self
    }

    pub fn loader(mut self, loader: Arc<dyn ModuleLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn parser(mut self, parser: Arc<dyn OptionParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn validator(mut self, validator: Arc<dyn GlobalOptionsValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn help_printer(mut self, help_printer: Arc<dyn HelpPrinter>) -> Self {
        self.help_printer = Some(help_printer);
        self
    }

    pub fn build(self) -> BootstrapSession {
        let cache = BuildConfigurationCache::new(
            self.resolver
                .unwrap_or_else(|| Arc::new(IndexPluginResolver::default())),
            self.activator
                .unwrap_or_else(|| Arc::new(ExtensionLoader::builtin())),
            self.loader.unwrap_or_else(|| Arc::new(SearchPath::new())),
        );
        let initializer = OptionsInitializer::new(
            self.parser.unwrap_or_else(|| Arc::new(ArgParser::new())),
            self.validator.unwrap_or_else(|| Arc::new(GlobalOptions)),
            self.help_printer
                .unwrap_or_else(|| Arc::new(FlagErrorHelpPrinter)),
        );
        BootstrapSession { cache, initializer }
    }
}
