//! Error types for pants-options

use crate::scope::display_scope;

/// Result type for pants-options operations
pub type Result<T> = std::result::Result<T, Error>;

/// One or more CLI tokens that matched no registered option.
///
/// `arg_scope` is the scope the flags appeared in (`""` for global), which is
/// what suggestion generation needs to pick candidate flags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown flags {} on scope {}", .flags.join(", "), display_scope(.arg_scope))]
pub struct UnknownFlagsError {
    pub arg_scope: String,
    pub flags: Vec<String>,
}

impl UnknownFlagsError {
    pub fn new(arg_scope: impl Into<String>, flags: Vec<String>) -> Self {
        Self {
            arg_scope: arg_scope.into(),
            flags,
        }
    }
}

/// Errors that can occur while bootstrapping or parsing options
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config file could not be read or parsed
    #[error(transparent)]
    Fs(#[from] pants_fs::Error),

    /// CLI flags that no registered scope declares
    #[error(transparent)]
    UnknownFlags(#[from] UnknownFlagsError),

    /// A value could not be converted to the option's declared kind
    #[error("Invalid value {value:?} for option --{option} in scope {scope}: {reason}")]
    InvalidValue {
        scope: String,
        option: String,
        value: String,
        reason: String,
    },

    /// A global option failed structural validation
    #[error("Invalid option --{option}: {reason}")]
    InvalidOption { option: String, reason: String },
}

impl Error {
    pub fn invalid_value(
        scope: &str,
        option: &str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            scope: display_scope(scope).to_string(),
            option: option.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_option(option: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.to_string(),
            reason: reason.into(),
        }
    }
}
