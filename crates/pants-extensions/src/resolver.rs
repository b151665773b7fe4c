//! Plugin resolution: requirement strings to a [`WorkingSet`]

use crate::error::{Error, Result};
use crate::requirement::{Requirement, canonical_name};
use crate::working_set::{Distribution, WorkingSet};
use pants_options::OptionsBootstrapper;

/// Resolves the `plugins` bootstrap option into loadable distributions.
pub trait PluginResolver: Send + Sync {
    fn resolve(&self, bootstrapper: &OptionsBootstrapper) -> Result<WorkingSet>;
}

/// The distributions available for resolution.
#[derive(Debug, Clone, Default)]
pub struct PluginIndex {
    available: Vec<Distribution>,
}

impl PluginIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, distribution: Distribution) {
        self.available.push(distribution);
    }

    pub fn with(mut self, distribution: Distribution) -> Self {
        self.add(distribution);
        self
    }

    /// Every available version of a project.
    pub fn candidates(&self, name: &str) -> impl Iterator<Item = &Distribution> {
        let key = canonical_name(name);
        self.available
            .iter()
            .filter(move |d| canonical_name(&d.name) == key)
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}

/// Resolves each requirement to the highest satisfying version in a
/// [`PluginIndex`].
#[derive(Debug, Clone, Default)]
pub struct IndexPluginResolver {
    index: PluginIndex,
}

impl IndexPluginResolver {
    pub fn new(index: PluginIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &PluginIndex {
        &self.index
    }

    fn resolve_one(&self, raw: &str) -> Result<&Distribution> {
        let requirement = Requirement::parse(raw)?;
        let best = self
            .index
            .candidates(&requirement.name)
            .filter(|d| requirement.matches(&d.name, &d.version))
            .max_by(|a, b| a.version.cmp(&b.version));

        best.ok_or_else(|| {
            let available: Vec<String> = self
                .index
                .candidates(&requirement.name)
                .map(|d| d.version.to_string())
                .collect();
            let reason = if available.is_empty() {
                format!("no distribution named '{}' is available", requirement.name)
            } else {
                format!("no available version matches (found {})", available.join(", "))
            };
            Error::Resolution {
                requirement: raw.to_string(),
                reason,
            }
        })
    }
}

impl PluginResolver for IndexPluginResolver {
    fn resolve(&self, bootstrapper: &OptionsBootstrapper) -> Result<WorkingSet> {
        let mut working_set = WorkingSet::new();
        for raw in &bootstrapper.get_bootstrap_options().plugins {
            let distribution = self.resolve_one(raw)?;
            tracing::debug!(requirement = %raw, resolved = %distribution, "Resolved plugin");
            working_set.add(distribution.clone());
        }
        Ok(working_set)
    }
}
