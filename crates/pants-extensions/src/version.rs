//! Version constraints for plugin requirements.
//!
//! A constraint is one or more comma-separated comparators, all of which
//! must match:
//!
//! ```
//! use pants_extensions::version::VersionConstraint;
//!
//! let constraint = VersionConstraint::parse(">=1.0,<2.0").unwrap();
//! assert!(constraint.matches(&semver::Version::new(1, 4, 2)));
//! assert!(!constraint.matches(&semver::Version::new(2, 0, 0)));
//! ```
//!
//! Versions written as `major.minor` are padded with a `.0` patch.

use crate::error::{Error, Result};
use semver::Version;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Gte,
    Gt,
    Lte,
    Lt,
    Eq,
    Ne,
}

impl Op {
    /// Longest operators first so `>=` is not read as `>`.
    const ALL: [(&'static str, Op); 6] = [
        (">=", Op::Gte),
        ("<=", Op::Lte),
        ("==", Op::Eq),
        ("!=", Op::Ne),
        (">", Op::Gt),
        ("<", Op::Lt),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn matches(&self, candidate: &Version) -> bool {
        match self.op {
            Op::Gte => candidate >= &self.version,
            Op::Gt => candidate > &self.version,
            Op::Lte => candidate <= &self.version,
            Op::Lt => candidate < &self.version,
            Op::Eq => candidate == &self.version,
            Op::Ne => candidate != &self.version,
        }
    }
}

/// A parsed constraint such as `==1.2.0` or `>=1.0,<2.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    comparators: Vec<Comparator>,
    raw: String,
}

impl VersionConstraint {
    pub fn parse(constraint: &str) -> Result<Self> {
        let comparators = constraint
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| parse_comparator(constraint, part))
            .collect::<Result<Vec<_>>>()?;

        if comparators.is_empty() {
            return Err(Error::VersionConstraintParse {
                constraint: constraint.to_string(),
                reason: "empty constraint".to_string(),
            });
        }

        Ok(Self {
            comparators,
            raw: constraint.trim().to_string(),
        })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.comparators.iter().all(|c| c.matches(version))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_comparator(constraint: &str, part: &str) -> Result<Comparator> {
    let (op, rest) = Op::ALL
        .iter()
        .find_map(|(prefix, op)| part.strip_prefix(prefix).map(|rest| (*op, rest)))
        .unwrap_or((Op::Eq, part));

    let version = parse_version(rest.trim()).map_err(|e| Error::VersionConstraintParse {
        constraint: constraint.to_string(),
        reason: e.to_string(),
    })?;
    Ok(Comparator { op, version })
}

/// Parse a version, padding `major.minor` to `major.minor.0`.
pub fn parse_version(version: &str) -> Result<Version> {
    let version = version.trim();
    Version::parse(version)
        .or_else(|_| Version::parse(&format!("{version}.0")))
        .map_err(|source| Error::InvalidVersion {
            version: version.to_string(),
            source,
        })
}
