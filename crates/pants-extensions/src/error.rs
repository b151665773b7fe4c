/// Errors that can occur while resolving plugins or activating backends.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A plugin requirement string could not be parsed.
    #[error("invalid plugin requirement '{requirement}': {reason}")]
    InvalidRequirement { requirement: String, reason: String },

    /// A version constraint could not be parsed.
    #[error("invalid version constraint '{constraint}': {reason}")]
    VersionConstraintParse { constraint: String, reason: String },

    /// Invalid semver version string.
    #[error("invalid version '{version}': {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    /// No available distribution satisfies a plugin requirement.
    #[error("could not resolve plugin '{requirement}': {reason}")]
    Resolution { requirement: String, reason: String },

    /// A requested backend package is not registered.
    #[error("unknown backend package '{0}'")]
    UnknownBackend(String),

    /// A plugin requirement has no matching distribution in the working set.
    #[error("plugin '{requirement}' is not in the resolved working set")]
    PluginNotFound { requirement: String },

    /// Two providers registered the same target alias or option scope.
    #[error("{kind} '{name}' is registered by both {first} and {second}")]
    DuplicateRegistration {
        kind: &'static str,
        name: String,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
