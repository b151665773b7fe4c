//! Shared test utilities for the pants bootstrap workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`build_root`]: [`TestBuildRoot`](build_root::TestBuildRoot), a temporary
//!   build root with config files and a bootstrapper factory
//! - [`doubles`]: resolver and activator doubles that count their calls

pub mod build_root;
pub mod doubles;

pub use build_root::TestBuildRoot;
pub use doubles::{CountingActivator, CountingResolver, FailingResolver};
