//! Collaborator doubles for the build configuration cache.

use pants_extensions::{
    Activator, BuildConfiguration, Error, ExtensionLoader, IndexPluginResolver, PluginResolver,
    Result, WorkingSet,
};
use pants_options::OptionsBootstrapper;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Wraps an [`ExtensionLoader`] and counts activations.
pub struct CountingActivator {
    inner: ExtensionLoader,
    calls: AtomicUsize,
    fail_first: usize,
    delay: Option<Duration>,
    last_backend_packages: Mutex<Vec<String>>,
}

impl Default for CountingActivator {
    fn default() -> Self {
        Self::new()
    }
}

impl CountingActivator {
    /// Counts activations of the built-in backends.
    pub fn new() -> Self {
        Self::wrapping(ExtensionLoader::builtin())
    }

    pub fn wrapping(inner: ExtensionLoader) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            fail_first: 0,
            delay: None,
            last_backend_packages: Mutex::new(Vec::new()),
        }
    }

    /// Sleep inside every activation, to widen race windows.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the first `n` activations with an unknown backend error.
    pub fn failing_first(mut self, n: usize) -> Self {
        self.fail_first = n;
        self
    }

    /// Number of activations attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Backend packages passed to the most recent activation.
    pub fn last_backend_packages(&self) -> Vec<String> {
        self.last_backend_packages.lock().unwrap().clone()
    }
}

impl Activator for CountingActivator {
    fn load(
        &self,
        plugins: &[String],
        working_set: &WorkingSet,
        backend_packages: &[String],
    ) -> Result<BuildConfiguration> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_backend_packages.lock().unwrap() = backend_packages.to_vec();
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if call < self.fail_first {
            return Err(Error::UnknownBackend(format!("flaky-backend-{call}")));
        }
        self.inner.load(plugins, working_set, backend_packages)
    }
}

/// Wraps an [`IndexPluginResolver`] and counts resolutions.
#[derive(Default)]
pub struct CountingResolver {
    inner: IndexPluginResolver,
    calls: AtomicUsize,
}

impl CountingResolver {
    pub fn new(inner: IndexPluginResolver) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PluginResolver for CountingResolver {
    fn resolve(&self, bootstrapper: &OptionsBootstrapper) -> Result<WorkingSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(bootstrapper)
    }
}

/// A resolver whose index is unreachable.
#[derive(Debug, Default)]
pub struct FailingResolver;

impl PluginResolver for FailingResolver {
    fn resolve(&self, _bootstrapper: &OptionsBootstrapper) -> Result<WorkingSet> {
        Err(Error::Resolution {
            requirement: "*".to_string(),
            reason: "plugin index unavailable".to_string(),
        })
    }
}
