//! Resolved plugin distributions

use crate::error::Result;
use crate::requirement::{Requirement, canonical_name};
use crate::version::parse_version;
use semver::Version;

/// A loadable plugin distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub name: String,
    pub version: Version,
    /// Backend name activated when the plugin is loaded
    pub entry_point: String,
}

impl Distribution {
    pub fn new(
        name: impl Into<String>,
        version: &str,
        entry_point: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            version: parse_version(version)?,
            entry_point: entry_point.into(),
        })
    }
}

impl std::fmt::Display for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// The distributions a resolver selected, at most one per project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingSet {
    distributions: Vec<Distribution>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a distribution, replacing any other version of the same project.
    pub fn add(&mut self, distribution: Distribution) {
        let key = canonical_name(&distribution.name);
        match self
            .distributions
            .iter_mut()
            .find(|d| canonical_name(&d.name) == key)
        {
            Some(existing) => *existing = distribution,
            None => self.distributions.push(distribution),
        }
    }

    /// The distribution satisfying `requirement`, if any.
    pub fn find(&self, requirement: &Requirement) -> Option<&Distribution> {
        self.distributions
            .iter()
            .find(|d| requirement.matches(&d.name, &d.version))
    }

    pub fn get(&self, name: &str) -> Option<&Distribution> {
        let key = canonical_name(name);
        self.distributions.iter().find(|d| canonical_name(&d.name) == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Distribution> {
        self.distributions.iter()
    }

    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_replaces_same_project() {
        let mut set = WorkingSet::new();
        set.add(Distribution::new("my-plugin", "1.0", "my.plugin").unwrap());
        set.add(Distribution::new("My_Plugin", "1.1", "my.plugin").unwrap());

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("my-plugin").unwrap().version, Version::new(1, 1, 0));
    }

    #[test]
    fn test_find_honors_constraint() {
        let mut set = WorkingSet::new();
        set.add(Distribution::new("my-plugin", "1.0.0", "my.plugin").unwrap());

        assert!(set.find(&Requirement::parse("my-plugin>=1.0").unwrap()).is_some());
        assert!(set.find(&Requirement::parse("my-plugin>=2.0").unwrap()).is_none());
    }
}
