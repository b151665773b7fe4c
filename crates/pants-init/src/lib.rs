//! Bootstrap initialization for Pants.
//!
//! Turns an [`OptionsBootstrapper`](pants_options::OptionsBootstrapper) into a
//! cached [`BuildConfiguration`](pants_extensions::BuildConfiguration) and a
//! validated [`Options`](pants_options::Options):
//!
//! - [`BuildConfigurationCache`]: activates plugins and backends at most once
//!   per cache until reset
//! - [`OptionsInitializer`]: derived values (executor bounds, ignore and
//!   invalidation globs), options assembly and unknown-flag recovery
//! - [`FlagErrorHelp`]: "did you mean" diagnostics for unknown flags
//! - [`BootstrapSession`]: one cache plus one initializer, wired with the
//!   default collaborators unless overridden

pub mod cache;
pub mod error;
pub mod help;
pub mod initializer;
pub mod session;

pub use cache::BuildConfigurationCache;
pub use error::{Error, Result};
pub use help::{FlagErrorHelp, FlagErrorHelpPrinter, FlagSuggestion, HelpPrinter};
pub use initializer::{OptionsInitializer, OptionsOutcome};
pub use session::{BootstrapSession, BootstrapSessionBuilder};
