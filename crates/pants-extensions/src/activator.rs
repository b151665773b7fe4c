//! Activation of backends and plugins into a [`BuildConfiguration`]

use crate::backend::{BackendRegistry, CORE_BACKEND};
use crate::build_configuration::{BuildConfiguration, BuildConfigurationBuilder};
use crate::error::{Error, Result};
use crate::requirement::Requirement;
use crate::working_set::WorkingSet;

/// Loads plugins and backends into a build configuration.
pub trait Activator: Send + Sync {
    fn load(
        &self,
        plugins: &[String],
        working_set: &WorkingSet,
        backend_packages: &[String],
    ) -> Result<BuildConfiguration>;
}

/// Default [`Activator`] backed by a [`BackendRegistry`].
///
/// The core backend is always activated first, then `backend_packages` in
/// order, then the entry point of each plugin's resolved distribution.
/// Naming the same backend twice activates it once.
#[derive(Debug, Clone, Default)]
pub struct ExtensionLoader {
    registry: BackendRegistry,
}

impl ExtensionLoader {
    pub fn new(registry: BackendRegistry) -> Self {
        Self { registry }
    }

    /// A loader over the built-in backends.
    pub fn builtin() -> Self {
        Self::new(BackendRegistry::with_builtins())
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    fn activate(
        &self,
        name: &str,
        builder: &mut BuildConfigurationBuilder,
        activated: &mut Vec<String>,
    ) -> Result<()> {
        if activated.iter().any(|a| a == name) {
            tracing::debug!(backend = name, "Backend already activated, skipping");
            return Ok(());
        }
        let backend = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownBackend(name.to_string()))?;

        builder.begin_provider(name);
        backend.register(builder)?;
        activated.push(name.to_string());
        Ok(())
    }
}

impl Activator for ExtensionLoader {
    fn load(
        &self,
        plugins: &[String],
        working_set: &WorkingSet,
        backend_packages: &[String],
    ) -> Result<BuildConfiguration> {
        let mut builder = BuildConfiguration::builder();
        let mut activated = Vec::new();

        self.activate(CORE_BACKEND, &mut builder, &mut activated)?;
        for package in backend_packages {
            self.activate(package, &mut builder, &mut activated)?;
        }

        for raw in plugins {
            let requirement = Requirement::parse(raw)?;
            let distribution = working_set
                .find(&requirement)
                .ok_or_else(|| Error::PluginNotFound {
                    requirement: raw.clone(),
                })?;
            tracing::debug!(
                plugin = %distribution,
                entry_point = %distribution.entry_point,
                "Loading plugin"
            );
            self.activate(&distribution.entry_point, &mut builder, &mut activated)?;
        }

        let config = builder.build();
        tracing::info!(
            backends = activated.len(),
            target_types = config.target_types().len(),
            "Activated build configuration"
        );
        Ok(config)
    }
}
