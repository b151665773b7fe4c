//! Memoized plugin and backend activation

use crate::error::Result;
use pants_extensions::{Activator, BuildConfiguration, ModuleLoader, PluginResolver};
use pants_options::OptionsBootstrapper;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Holds the one [`BuildConfiguration`] of a session.
///
/// The first successful [`get`](Self::get) resolves plugins, extends the
/// module search path and activates backends; later calls return the same
/// `Arc` regardless of the bootstrapper they pass, until [`reset`](Self::reset).
///
/// Construction is single-flight: the lock is held while activating, so
/// concurrent first callers wait and then share the result. A failed
/// construction leaves the cache empty.
pub struct BuildConfigurationCache {
    resolver: Arc<dyn PluginResolver>,
    activator: Arc<dyn Activator>,
    loader: Arc<dyn ModuleLoader>,
    cached: Mutex<Option<Arc<BuildConfiguration>>>,
}

impl BuildConfigurationCache {
    pub fn new(
        resolver: Arc<dyn PluginResolver>,
        activator: Arc<dyn Activator>,
        loader: Arc<dyn ModuleLoader>,
    ) -> Self {
        Self {
            resolver,
            activator,
            loader,
            cached: Mutex::new(None),
        }
    }

    /// The cached build configuration, constructing it on first use.
    pub fn get(&self, bootstrapper: &OptionsBootstrapper) -> Result<Arc<BuildConfiguration>> {
        let mut cached = self.lock();
        if let Some(config) = cached.as_ref() {
            return Ok(Arc::clone(config));
        }

        let config = Arc::new(self.setup(bootstrapper)?);
        *cached = Some(Arc::clone(&config));
        Ok(config)
    }

    /// Drop the cached value so the next `get` activates again.
    ///
    /// Waits for an in-flight construction to finish first.
    pub fn reset(&self) {
        if self.lock().take().is_some() {
            tracing::debug!("Build configuration cache reset");
        }
    }

    pub fn is_cached(&self) -> bool {
        self.lock().is_some()
    }

    /// The module search path this cache extends.
    pub fn loader(&self) -> &dyn ModuleLoader {
        self.loader.as_ref()
    }

    fn setup(&self, bootstrapper: &OptionsBootstrapper) -> Result<BuildConfiguration> {
        let options = bootstrapper.get_bootstrap_options();
        let working_set = self.resolver.resolve(bootstrapper)?;

        for path in &options.pythonpath {
            if self.loader.add_search_path(path) {
                tracing::debug!(%path, "Added to module search path");
            } else {
                tracing::debug!(%path, "Already on module search path, skipping");
            }
        }

        let config = self
            .activator
            .load(&options.plugins, &working_set, &options.backend_packages)?;
        tracing::info!(
            plugins = options.plugins.len(),
            backend_packages = options.backend_packages.len(),
            "Loaded build configuration"
        );
        Ok(config)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<BuildConfiguration>>> {
        self.cached.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for BuildConfigurationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildConfigurationCache")
            .field("cached", &self.is_cached())
            .finish_non_exhaustive()
    }
}
