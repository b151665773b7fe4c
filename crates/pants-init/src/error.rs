//! Error types for pants-init

use pants_options::UnknownFlagsError;

/// Result type for pants-init operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while initializing options
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The repository asks for a different version than the one running
    #[error("Version mismatch: Requested version was {requested}, our version is {running}.")]
    VersionMismatch { requested: String, running: String },

    /// `--rule-threads-core` below the supported minimum
    #[error("--rule-threads-core values less than 2 are not supported.")]
    InvalidThreadCount { core: usize },

    /// `--rule-threads-core` too large to derive the default maximum from
    #[error("--rule-threads-core value {core} is too large to derive --rule-threads-max from.")]
    ThreadCountOverflow { core: usize },

    /// Flags that no registered scope declares
    #[error(transparent)]
    UnknownFlags(#[from] UnknownFlagsError),

    // Transparent wrappers for underlying crate errors
    /// Option parsing or validation error from pants-options
    #[error(transparent)]
    Options(pants_options::Error),

    /// Plugin resolution or activation error from pants-extensions
    #[error(transparent)]
    Extensions(#[from] pants_extensions::Error),
}

impl From<pants_options::Error> for Error {
    fn from(err: pants_options::Error) -> Self {
        match err {
            pants_options::Error::UnknownFlags(unknown) => Self::UnknownFlags(unknown),
            other => Self::Options(other),
        }
    }
}

impl Error {
    /// Whether this is a fatal misconfiguration rather than bad CLI input
    /// or a plugin failure.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::VersionMismatch { .. }
            | Self::InvalidThreadCount { .. }
            | Self::ThreadCountOverflow { .. } => true,
            Self::Options(err) => matches!(
                err,
                pants_options::Error::InvalidOption { .. }
                    | pants_options::Error::InvalidValue { .. }
            ),
            Self::Extensions(err) => matches!(
                err,
                pants_extensions::Error::DuplicateRegistration { .. }
                    | pants_extensions::Error::UnknownBackend(_)
            ),
            Self::UnknownFlags(_) => false,
        }
    }
}
