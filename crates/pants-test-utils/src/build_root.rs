//! [`TestBuildRoot`] for bootstrap test scenarios.

use pants_fs::NormalizedPath;
use pants_options::OptionsBootstrapper;
use std::fs;
use tempfile::TempDir;

/// A temporary build root.
///
/// # Example
///
/// ```rust,no_run
/// use pants_test_utils::TestBuildRoot;
///
/// let root = TestBuildRoot::new();
/// root.write_config("[GLOBAL]\nbackend_packages = [\"pants.backend.python\"]\n");
/// let bootstrapper = root.bootstrapper(&["test", "src/python::"]);
/// ```
pub struct TestBuildRoot {
    temp_dir: TempDir,
    root: NormalizedPath,
}

impl Default for TestBuildRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuildRoot {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("TestBuildRoot::new: failed to create temp dir");
        let root = NormalizedPath::new(temp_dir.path());
        Self { temp_dir, root }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// `root/rel` as an absolute path string.
    pub fn path(&self, rel: &str) -> String {
        self.root.join(rel).as_str().to_string()
    }

    /// Write `pants.toml`.
    pub fn write_config(&self, content: &str) {
        self.write_file("pants.toml", content);
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write_file(&self, rel: &str, content: &str) {
        let path = self.temp_dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .expect("TestBuildRoot::write_file: failed to create parent dir");
        }
        fs::write(&path, content).expect("TestBuildRoot::write_file: failed to write file");
    }

    /// Bootstrap `pants <args...>` with no environment.
    pub fn bootstrapper(&self, args: &[&str]) -> OptionsBootstrapper {
        self.bootstrapper_with_env(args, &[])
    }

    /// Bootstrap `pants <args...>` with the given environment.
    pub fn bootstrapper_with_env(
        &self,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> OptionsBootstrapper {
        let argv = std::iter::once("pants")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        OptionsBootstrapper::create(self.root.clone(), env.iter().copied(), argv)
            .expect("TestBuildRoot::bootstrapper: bootstrap options failed to parse")
    }
}
