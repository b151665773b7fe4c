//! The fully parsed option values for every registered scope

use crate::scope::{GLOBAL_SCOPE, ScopeInfo};
use crate::value::OptionValueContainer;
use serde::Serialize;
use std::collections::BTreeMap;

static EMPTY: OptionValueContainer = OptionValueContainer::new();

/// Parsed and validated options.
///
/// Holds one [`OptionValueContainer`] per registered scope, the goals and
/// specs named on the command line (in order), passthrough args after `--`,
/// and the scope catalog the values were parsed against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Options {
    scopes: BTreeMap<String, OptionValueContainer>,
    goals: Vec<String>,
    specs: Vec<String>,
    passthru: Vec<String>,
    #[serde(skip)]
    known_scope_infos: Vec<ScopeInfo>,
}

impl Options {
    pub fn new(
        scopes: BTreeMap<String, OptionValueContainer>,
        known_scope_infos: Vec<ScopeInfo>,
        goals: Vec<String>,
        specs: Vec<String>,
        passthru: Vec<String>,
    ) -> Self {
        Self {
            scopes,
            goals,
            specs,
            passthru,
            known_scope_infos,
        }
    }

    /// Values of the global scope.
    pub fn for_global_scope(&self) -> &OptionValueContainer {
        self.scopes.get(GLOBAL_SCOPE).unwrap_or(&EMPTY)
    }

    pub fn for_scope(&self, scope: &str) -> Option<&OptionValueContainer> {
        self.scopes.get(scope)
    }

    /// Names of all scopes with values, sorted (`""` first).
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }

    pub fn known_scope_infos(&self) -> &[ScopeInfo] {
        &self.known_scope_infos
    }

    pub fn scope_info(&self, scope: &str) -> Option<&ScopeInfo> {
        self.known_scope_infos.iter().find(|info| info.scope == scope)
    }

    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    pub fn specs(&self) -> &[String] {
        &self.specs
    }

    pub fn passthru(&self) -> &[String] {
        &self.passthru
    }
}
