//! The registry of everything core, backends and plugins contribute

use crate::error::{Error, Result};
use pants_options::{Optionable, ScopeInfo};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A target type that can appear in BUILD files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetType {
    pub alias: String,
    pub help: String,
    /// Backend or plugin that registered the type
    pub provider: String,
}

/// All registered target types and optionables.
///
/// Built once through [`BuildConfigurationBuilder`] and shared read-only
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct BuildConfiguration {
    target_types: Vec<TargetType>,
    optionables: Vec<Arc<dyn Optionable>>,
    /// scope -> provider
    scope_providers: BTreeMap<String, String>,
    /// Activated backends and plugins, in activation order
    providers: Vec<String>,
}

impl BuildConfiguration {
    pub fn builder() -> BuildConfigurationBuilder {
        BuildConfigurationBuilder::new()
    }

    pub fn target_types(&self) -> &[TargetType] {
        &self.target_types
    }

    pub fn target_type(&self, alias: &str) -> Option<&TargetType> {
        self.target_types.iter().find(|t| t.alias == alias)
    }

    pub fn all_optionables(&self) -> &[Arc<dyn Optionable>] {
        &self.optionables
    }

    /// Scope declarations of every registered optionable, in registration
    /// order.
    pub fn known_scope_infos(&self) -> Vec<ScopeInfo> {
        self.optionables
            .iter()
            .flat_map(|optionable| optionable.known_scope_infos())
            .collect()
    }

    pub fn scope_provider(&self, scope: &str) -> Option<&str> {
        self.scope_providers.get(scope).map(String::as_str)
    }

    pub fn providers(&self) -> &[String] {
        &self.providers
    }

    pub fn is_activated(&self, provider: &str) -> bool {
        self.providers.iter().any(|p| p == provider)
    }
}

/// Append-only builder for a [`BuildConfiguration`].
///
/// Registrations are attributed to the current provider set with
/// [`begin_provider`](Self::begin_provider). Registering a target alias or an
/// option scope twice is an error naming both providers.
#[derive(Debug, Default)]
pub struct BuildConfigurationBuilder {
    current: String,
    config: BuildConfiguration,
}

impl BuildConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute subsequent registrations to `provider`.
    pub fn begin_provider(&mut self, provider: impl Into<String>) {
        self.current = provider.into();
        self.config.providers.push(self.current.clone());
    }

    pub fn register_target_type(
        &mut self,
        alias: impl Into<String>,
        help: impl Into<String>,
    ) -> Result<()> {
        let alias = alias.into();
        if let Some(existing) = self.config.target_type(&alias) {
            return Err(Error::DuplicateRegistration {
                kind: "target type",
                name: alias,
                first: existing.provider.clone(),
                second: self.current.clone(),
            });
        }
        self.config.target_types.push(TargetType {
            alias,
            help: help.into(),
            provider: self.current.clone(),
        });
        Ok(())
    }

    pub fn register_optionable(&mut self, optionable: Arc<dyn Optionable>) -> Result<()> {
        let scopes: Vec<String> = optionable
            .known_scope_infos()
            .into_iter()
            .map(|info| info.scope)
            .collect();

        for scope in &scopes {
            if let Some(first) = self.config.scope_providers.get(scope) {
                return Err(Error::DuplicateRegistration {
                    kind: "option scope",
                    name: pants_options::display_scope(scope).to_string(),
                    first: first.clone(),
                    second: self.current.clone(),
                });
            }
        }

        for scope in scopes {
            self.config.scope_providers.insert(scope, self.current.clone());
        }
        self.config.optionables.push(optionable);
        Ok(())
    }

    pub fn build(self) -> BuildConfiguration {
        self.config
    }
}
