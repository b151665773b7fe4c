//! Option scopes, bootstrap options and option parsing for Pants.
//!
//! The bootstrap options are the small, schema-independent subset of global
//! options that must be known before plugins are loaded (which in turn
//! determine the full option schema). This crate provides:
//!
//! - [`OptionsBootstrapper`]: raw args, environment and config files plus the
//!   [`BootstrapOptions`] derived from them
//! - [`ScopeInfo`] / [`OptionSpec`]: declarations of option namespaces
//! - [`OptionParser`]: the seam for full option parsing, with [`ArgParser`] as
//!   the default engine
//! - [`GlobalOptionsValidator`]: structural checks on the global scope

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod global;
pub mod options;
pub mod parser;
pub mod scope;
pub mod validation;
pub mod value;

pub use bootstrap::{BootstrapOptions, OptionsBootstrapper};
pub use config::Config;
pub use error::{Error, Result, UnknownFlagsError};
pub use global::GlobalOptions;
pub use options::Options;
pub use parser::{ArgParser, OptionParser};
pub use scope::{
    GLOBAL_SCOPE, OptionKind, OptionSpec, Optionable, ScopeInfo, Subsystem, display_scope,
};
pub use validation::GlobalOptionsValidator;
pub use value::{OptionValue, OptionValueContainer, Rank, RankedValue};

/// The version of the running tool.
///
/// Bootstrap options declare the version a repository expects; the options
/// assembler refuses to proceed when the two differ.
pub fn pants_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
