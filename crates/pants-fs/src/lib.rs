//! Filesystem helpers for the Pants bootstrap
//!
//! Provides lexically normalized paths (no filesystem access, no symlink
//! resolution) and format-agnostic config file loading.

pub mod config;
pub mod error;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
