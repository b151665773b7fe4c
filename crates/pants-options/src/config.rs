//! Config file contents, merged across files
//!
//! Each config file is a table of sections. `[GLOBAL]` holds global-scope
//! options; any other section name is an option scope. Keys may be written
//! in `snake_case` or `kebab-case`. Later files override earlier ones key by
//! key.

use crate::Result;
use crate::scope::GLOBAL_SCOPE;
use pants_fs::{ConfigStore, NormalizedPath};
use std::collections::BTreeMap;

/// Section name used for the global scope in config files.
pub const GLOBAL_SECTION: &str = "GLOBAL";

/// Merged config sections plus the files they were read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    sections: BTreeMap<String, toml::Table>,
    sources: Vec<NormalizedPath>,
}

impl Config {
    /// An empty config with no sources.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and merge the given files in order.
    ///
    /// Files that do not exist are skipped so that the default `pants.toml`
    /// is optional. Unreadable or malformed files are errors.
    pub fn load(paths: &[NormalizedPath]) -> Result<Self> {
        let store = ConfigStore::new();
        let mut config = Self::empty();

        for path in paths {
            if !path.is_file() {
                tracing::debug!(%path, "Config file not found, skipping");
                continue;
            }
            let table: toml::Table = store.load(path)?;
            config.merge(Self::from_table(table));
            config.sources.push(path.clone());
        }

        Ok(config)
    }

    /// Parse a single TOML document.
    pub fn parse(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content).map_err(|e| pants_fs::Error::ConfigParse {
            path: "<string>".into(),
            format: "TOML".into(),
            message: e.to_string(),
        })?;
        Ok(Self::from_table(table))
    }

    fn from_table(table: toml::Table) -> Self {
        let mut sections = BTreeMap::new();
        for (name, value) in table {
            match value {
                toml::Value::Table(section) => {
                    let normalized = section
                        .into_iter()
                        .map(|(key, value)| (key.replace('_', "-"), value))
                        .collect();
                    sections.insert(name, normalized);
                }
                other => {
                    tracing::debug!(
                        key = %name,
                        value = %other,
                        "Ignoring top-level config value outside a section"
                    );
                }
            }
        }
        Self {
            sections,
            sources: Vec::new(),
        }
    }

    /// Overlay `other` on top of this config, key by key.
    pub fn merge(&mut self, other: Config) {
        for (name, section) in other.sections {
            let target = self.sections.entry(name).or_default();
            for (key, value) in section {
                target.insert(key, value);
            }
        }
        self.sources.extend(other.sources);
    }

    /// Look up an option value for a scope.
    pub fn get(&self, scope: &str, option: &str) -> Option<&toml::Value> {
        let section = if scope == GLOBAL_SCOPE {
            GLOBAL_SECTION
        } else {
            scope
        };
        self.sections.get(section)?.get(option)
    }

    /// Files that contributed to this config, in load order.
    pub fn sources(&self) -> &[NormalizedPath] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
