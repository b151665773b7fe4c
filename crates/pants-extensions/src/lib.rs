//! Plugin and backend activation for Pants.
//!
//! This crate turns the `plugins` and `backend_packages` bootstrap options
//! into a [`BuildConfiguration`]: requirements are resolved to a
//! [`WorkingSet`] by a [`PluginResolver`], then an [`Activator`] registers
//! the core backend, each backend package and each plugin entry point.

pub mod activator;
pub mod backend;
pub mod build_configuration;
pub mod error;
pub mod loader;
pub mod requirement;
pub mod resolver;
pub mod version;
pub mod working_set;

pub use activator::{Activator, ExtensionLoader};
pub use backend::{Backend, BackendRegistry};
pub use build_configuration::{BuildConfiguration, BuildConfigurationBuilder, TargetType};
pub use error::{Error, Result};
pub use loader::{ModuleLoader, SearchPath};
pub use requirement::Requirement;
pub use resolver::{IndexPluginResolver, PluginIndex, PluginResolver};
pub use version::VersionConstraint;
pub use working_set::{Distribution, WorkingSet};
