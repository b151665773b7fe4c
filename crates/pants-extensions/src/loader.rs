//! The module search path plugins are loaded from

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Owner of the module search path.
///
/// Bootstrapping appends `pythonpath` entries here and reads the current
/// entries back when computing invalidation globs.
pub trait ModuleLoader: Send + Sync {
    /// Current entries, in order.
    fn search_paths(&self) -> Vec<String>;

    /// Append `path` unless already present. Returns whether it was added.
    fn add_search_path(&self, path: &str) -> bool;
}

/// In-memory [`ModuleLoader`].
#[derive(Debug, Default)]
pub struct SearchPath {
    paths: Mutex<Vec<String>>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: Mutex::new(paths.into_iter().map(Into::into).collect()),
        }
    }

    /// Seed from an OS path list such as `PYTHONPATH`. Unset means empty.
    pub fn from_env_var(name: &str) -> Self {
        let paths = std::env::var_os(name)
            .map(|value| {
                std::env::split_paths(&value)
                    .map(|p| p.to_string_lossy().into_owned())
                    .filter(|p| !p.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        Self::with_paths(paths)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.paths.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ModuleLoader for SearchPath {
    fn search_paths(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn add_search_path(&self, path: &str) -> bool {
        let mut paths = self.lock();
        if paths.iter().any(|p| p == path) {
            return false;
        }
        paths.push(path.to_string());
        true
    }
}
