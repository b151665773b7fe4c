//! Option scopes and option declarations
//!
//! A scope is a named namespace of options. The global scope is the empty
//! string; every other scope belongs to a subsystem or a goal contributed by
//! core code or an activated backend/plugin.

use crate::value::OptionValue;

/// Name of the global scope.
pub const GLOBAL_SCOPE: &str = "";

/// Human-readable name for a scope (`global` for the global scope).
pub fn display_scope(scope: &str) -> &str {
    if scope.is_empty() { "global" } else { scope }
}

/// The value type an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Int,
    Str,
    List,
}

/// Declaration of a single option within a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Option name in kebab-case, without leading dashes
    pub name: String,
    pub kind: OptionKind,
    /// Value used when no config, env or flag sets the option
    pub default: Option<OptionValue>,
    pub help: String,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            help: String::new(),
        }
    }

    pub fn bool(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, OptionKind::Bool).with_default(default)
    }

    pub fn int(name: impl Into<String>, default: i64) -> Self {
        Self::new(name, OptionKind::Int).with_default(default)
    }

    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Str).with_default(default.into())
    }

    pub fn list<S: Into<String>>(
        name: impl Into<String>,
        default: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(name, OptionKind::List)
            .with_default(default.into_iter().map(Into::into).collect::<Vec<String>>())
    }

    pub fn with_default(mut self, default: impl Into<OptionValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// The unscoped flag spelling, e.g. `--rule-threads-core`.
    pub fn flag(&self) -> String {
        format!("--{}", self.name)
    }
}

/// A scope together with the options declared in it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeInfo {
    pub scope: String,
    pub description: String,
    /// Goals can be selected on the command line by their bare name
    pub is_goal: bool,
    pub options: Vec<OptionSpec>,
}

impl ScopeInfo {
    pub fn new(scope: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            description: description.into(),
            is_goal: false,
            options: Vec::new(),
        }
    }

    pub fn goal(scope: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            is_goal: true,
            ..Self::new(scope, description)
        }
    }

    pub fn with_option(mut self, spec: OptionSpec) -> Self {
        self.options.push(spec);
        self
    }

    pub fn is_global(&self) -> bool {
        self.scope == GLOBAL_SCOPE
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|spec| spec.name == name)
    }

    /// Prefix used by scope-qualified flags, e.g. `python-setup-` in
    /// `--python-setup-interpreter-constraints`.
    pub fn flag_prefix(&self) -> String {
        format!("{}-", self.scope.replace('.', "-"))
    }

    /// Flags as they may be written inside this scope (`--name`, plus
    /// `--no-name` for booleans).
    pub fn unscoped_flags(&self) -> Vec<String> {
        let mut flags = Vec::with_capacity(self.options.len());
        for spec in &self.options {
            flags.push(spec.flag());
            if spec.kind == OptionKind::Bool {
                flags.push(format!("--no-{}", spec.name));
            }
        }
        flags
    }
}

/// Something that declares option scopes: the global options, a subsystem,
/// a goal.
pub trait Optionable: std::fmt::Debug + Send + Sync {
    /// The primary scope this optionable registers options in.
    fn options_scope(&self) -> &str;

    /// Every scope this optionable needs registered.
    fn known_scope_infos(&self) -> Vec<ScopeInfo>;
}

/// A data-driven optionable declaring a single scope.
///
/// Backends describe their subsystems and goals with this rather than a
/// dedicated type per subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct Subsystem {
    info: ScopeInfo,
}

impl Subsystem {
    pub fn new(info: ScopeInfo) -> Self {
        Self { info }
    }

    pub fn scope_info(&self) -> &ScopeInfo {
        &self.info
    }
}

impl Optionable for Subsystem {
    fn options_scope(&self) -> &str {
        &self.info.scope
    }

    fn known_scope_infos(&self) -> Vec<ScopeInfo> {
        vec![self.info.clone()]
    }
}
