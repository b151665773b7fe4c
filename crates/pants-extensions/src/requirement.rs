//! Plugin requirement strings: `name`, `name==1.2.0`, `name>=1.0,<2.0`

use crate::error::{Error, Result};
use crate::version::VersionConstraint;
use regex::Regex;
use std::sync::LazyLock;

static REQUIREMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*([<>=!].*)?$")
        .expect("requirement pattern is valid")
});

/// A parsed plugin requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Project name as written
    pub name: String,
    /// `None` accepts any version
    pub constraint: Option<VersionConstraint>,
}

impl Requirement {
    pub fn parse(requirement: &str) -> Result<Self> {
        let captures = REQUIREMENT_PATTERN
            .captures(requirement)
            .ok_or_else(|| Error::InvalidRequirement {
                requirement: requirement.to_string(),
                reason: "expected a project name optionally followed by a version constraint"
                    .to_string(),
            })?;

        let name = captures[1].to_string();
        let constraint = captures
            .get(2)
            .map(|m| VersionConstraint::parse(m.as_str()))
            .transpose()?;

        Ok(Self { name, constraint })
    }

    /// Normalized project name used for lookups.
    pub fn key(&self) -> String {
        canonical_name(&self.name)
    }

    pub fn matches(&self, name: &str, version: &semver::Version) -> bool {
        canonical_name(name) == self.key()
            && self.constraint.as_ref().is_none_or(|c| c.matches(version))
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.constraint {
            Some(constraint) => write!(f, "{}{}", self.name, constraint),
            None => f.write_str(&self.name),
        }
    }
}

/// Project names compare case-insensitively with `_` and `.` equivalent to `-`.
pub fn canonical_name(name: &str) -> String {
    name.to_ascii_lowercase().replace(['_', '.'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;

    #[test]
    fn test_name_only() {
        let req = Requirement::parse("pantsbuild.pants.contrib.go").unwrap();
        assert_eq!(req.name, "pantsbuild.pants.contrib.go");
        assert!(req.constraint.is_none());
        assert!(req.matches("pantsbuild-pants-contrib-go", &Version::new(9, 9, 9)));
    }

    #[test]
    fn test_with_constraint() {
        let req = Requirement::parse("my_plugin >= 1.0, < 2.0").unwrap();
        assert_eq!(req.name, "my_plugin");
        assert!(req.matches("My-Plugin", &Version::new(1, 5, 0)));
        assert!(!req.matches("my-plugin", &Version::new(2, 0, 0)));
        assert!(!req.matches("other", &Version::new(1, 5, 0)));
    }

    #[test]
    fn test_display() {
        let req = Requirement::parse("plugin==1.2.0").unwrap();
        assert_eq!(req.to_string(), "plugin==1.2.0");
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            Requirement::parse("==1.0"),
            Err(Error::InvalidRequirement { .. })
        ));
        assert!(matches!(
            Requirement::parse("plugin==x"),
            Err(Error::VersionConstraintParse { .. })
        ));
    }
}
