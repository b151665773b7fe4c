//! The option parsing engine
//!
//! Values are layered per option: declared default, then config files, then
//! environment variables, then command-line flags.
//!
//! Command-line conventions:
//!
//! - `args[0]` is the binary name and is skipped
//! - `--name=value` sets an option; booleans also accept `--name`/`--no-name`
//! - `--<scope>-<name>=value` addresses a scoped option from anywhere
//! - a bare word naming a goal switches the current scope to that goal
//! - any other bare word is a spec (target address)
//! - everything after `--` is passed through untouched
//!
//! List values written as `[a, b]` replace what lower ranks set, `+[a, b]`
//! and bare values append.

use crate::bootstrap::OptionsBootstrapper;
use crate::config::Config;
use crate::error::{Error, Result, UnknownFlagsError};
use crate::options::Options;
use crate::scope::{GLOBAL_SCOPE, OptionKind, OptionSpec, ScopeInfo};
use crate::value::{OptionValue, OptionValueContainer, Rank};
use std::collections::BTreeMap;

/// Parses raw input against a catalog of known scopes.
pub trait OptionParser: Send + Sync {
    /// Parse everything the bootstrapper holds (args, env, config files).
    ///
    /// Fails with [`Error::UnknownFlags`] when a flag matches no option in
    /// any of `known_scope_infos`.
    fn parse(
        &self,
        known_scope_infos: &[ScopeInfo],
        bootstrapper: &OptionsBootstrapper,
    ) -> Result<Options>;
}

/// Default [`OptionParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgParser;

impl OptionParser for ArgParser {
    fn parse(
        &self,
        known_scope_infos: &[ScopeInfo],
        bootstrapper: &OptionsBootstrapper,
    ) -> Result<Options> {
        self.parse_args(
            known_scope_infos,
            bootstrapper.args(),
            bootstrapper.env(),
            bootstrapper.config(),
        )
    }
}

impl ArgParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse args, env and config against `known_scope_infos`.
    pub fn parse_args(
        &self,
        known_scope_infos: &[ScopeInfo],
        args: &[String],
        env: &BTreeMap<String, String>,
        config: &Config,
    ) -> Result<Options> {
        let mut scopes: BTreeMap<String, OptionValueContainer> = BTreeMap::new();
        scopes.entry(GLOBAL_SCOPE.to_string()).or_default();
        for info in known_scope_infos {
            let container = scopes.entry(info.scope.clone()).or_default();
            for spec in &info.options {
                seed(container, &info.scope, spec, env, config)?;
            }
        }

        let split = ArgSplitter::new(known_scope_infos).split(args);
        if let Some(err) = split.unknown_flags_error() {
            return Err(err.into());
        }

        for flag in &split.flags {
            let container = scopes.entry(flag.scope.clone()).or_default();
            apply_flag(container, flag)?;
        }

        Ok(Options::new(
            scopes,
            known_scope_infos.to_vec(),
            split.goals,
            split.specs,
            split.passthru,
        ))
    }

    /// Parse only the options of `bootstrap_info`, ignoring everything else.
    ///
    /// Used before plugins are loaded, when most flags cannot be recognized
    /// yet: unknown flags and bare words are skipped rather than rejected.
    pub fn parse_bootstrap(
        &self,
        bootstrap_info: &ScopeInfo,
        args: &[String],
        env: &BTreeMap<String, String>,
        config: &Config,
    ) -> Result<OptionValueContainer> {
        let mut container = OptionValueContainer::new();
        for spec in &bootstrap_info.options {
            seed(&mut container, &bootstrap_info.scope, spec, env, config)?;
        }

        let split = ArgSplitter::new(std::slice::from_ref(bootstrap_info)).split(args);
        for flag in split.flags.iter().filter(|f| f.scope == bootstrap_info.scope) {
            apply_flag(&mut container, flag)?;
        }
        Ok(container)
    }
}

/// Environment variable names consulted for an option, in priority order.
pub fn env_var_names(scope: &str, option: &str) -> Vec<String> {
    let udest = option.to_uppercase().replace(['-', '.'], "_");
    if scope == GLOBAL_SCOPE {
        let mut names = vec![format!("PANTS_GLOBAL_{udest}"), format!("PANTS_{udest}")];
        if udest.starts_with("PANTS_") {
            names.push(udest);
        }
        names
    } else {
        let uscope = scope.to_uppercase().replace(['-', '.'], "_");
        vec![format!("PANTS_{uscope}_{udest}")]
    }
}

/// Apply default, config and env values for one option.
fn seed(
    container: &mut OptionValueContainer,
    scope: &str,
    spec: &OptionSpec,
    env: &BTreeMap<String, String>,
    config: &Config,
) -> Result<()> {
    if let Some(default) = &spec.default {
        container.set(spec.name.clone(), Rank::Default, default.clone());
    }

    if let Some(raw) = config.get(scope, &spec.name) {
        let value = from_config(scope, spec, container.get(&spec.name), raw)?;
        container.set(spec.name.clone(), Rank::Config, value);
    }

    let env_value = env_var_names(scope, &spec.name)
        .into_iter()
        .find_map(|name| env.get(&name));
    if let Some(text) = env_value {
        let value = parse_text(scope, spec, container.get(&spec.name), text)?;
        container.set(spec.name.clone(), Rank::Env, value);
    }

    Ok(())
}

fn apply_flag(container: &mut OptionValueContainer, flag: &ParsedFlag) -> Result<()> {
    let spec = &flag.spec;
    let value = match (spec.kind, flag.value.as_deref()) {
        (OptionKind::Bool, None) => OptionValue::Bool(!flag.negated),
        (OptionKind::Bool, Some(text)) if !flag.negated => {
            OptionValue::Bool(parse_bool(&flag.scope, spec, text)?)
        }
        (OptionKind::Bool, Some(text)) => {
            return Err(Error::invalid_value(
                &flag.scope,
                &spec.name,
                text,
                "a negated flag does not take a value",
            ));
        }
        (_, None) => {
            return Err(Error::invalid_value(
                &flag.scope,
                &spec.name,
                "",
                format!("expected --{}=<value>", spec.name),
            ));
        }
        (_, Some(text)) => parse_text(&flag.scope, spec, container.get(&spec.name), text)?,
    };
    container.set(spec.name.clone(), Rank::Flag, value);
    Ok(())
}

/// Convert a string from the environment or the command line.
fn parse_text(
    scope: &str,
    spec: &OptionSpec,
    current: Option<&OptionValue>,
    text: &str,
) -> Result<OptionValue> {
    match spec.kind {
        OptionKind::Bool => parse_bool(scope, spec, text).map(OptionValue::Bool),
        OptionKind::Int => text
            .trim()
            .parse::<i64>()
            .map(OptionValue::Int)
            .map_err(|e| Error::invalid_value(scope, &spec.name, text, e.to_string())),
        OptionKind::Str => Ok(OptionValue::Str(text.to_string())),
        OptionKind::List => {
            let edit = parse_list_edit(scope, spec, text)?;
            Ok(OptionValue::List(edit.apply(current)))
        }
    }
}

/// Convert a value read from a config file.
fn from_config(
    scope: &str,
    spec: &OptionSpec,
    current: Option<&OptionValue>,
    raw: &toml::Value,
) -> Result<OptionValue> {
    match (spec.kind, raw) {
        (OptionKind::Bool, toml::Value::Boolean(b)) => Ok(OptionValue::Bool(*b)),
        (OptionKind::Int, toml::Value::Integer(i)) => Ok(OptionValue::Int(*i)),
        (OptionKind::Str, toml::Value::String(s)) => Ok(OptionValue::Str(s.clone())),
        (OptionKind::List, toml::Value::Array(items)) => {
            Ok(OptionValue::List(items.iter().map(value_to_string).collect()))
        }
        (OptionKind::List, toml::Value::Table(table)) => {
            let edit_list = |key: &str| -> Vec<String> {
                match table.get(key) {
                    Some(toml::Value::Array(items)) => items.iter().map(value_to_string).collect(),
                    Some(other) => vec![value_to_string(other)],
                    None => Vec::new(),
                }
            };
            let remove = edit_list("remove");
            let mut items: Vec<String> = current
                .and_then(OptionValue::as_list)
                .unwrap_or_default()
                .iter()
                .filter(|item| !remove.contains(item))
                .cloned()
                .collect();
            items.extend(edit_list("add"));
            Ok(OptionValue::List(items))
        }
        (_, toml::Value::String(s)) => parse_text(scope, spec, current, s),
        (kind, other) => Err(Error::invalid_value(
            scope,
            &spec.name,
            other.to_string(),
            format!("expected {}", kind_name(kind)),
        )),
    }
}

fn parse_bool(scope: &str, spec: &OptionSpec, text: &str) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::invalid_value(
            scope,
            &spec.name,
            text,
            "expected true or false",
        )),
    }
}

enum ListEdit {
    Replace(Vec<String>),
    Append(Vec<String>),
}

impl ListEdit {
    fn apply(self, current: Option<&OptionValue>) -> Vec<String> {
        match self {
            Self::Replace(items) => items,
            Self::Append(items) => {
                let mut merged = current
                    .and_then(OptionValue::as_list)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();
                merged.extend(items);
                merged
            }
        }
    }
}

fn parse_list_edit(scope: &str, spec: &OptionSpec, text: &str) -> Result<ListEdit> {
    let trimmed = text.trim();
    if let Some(literal) = trimmed.strip_prefix('+').filter(|rest| rest.starts_with('[')) {
        parse_list_literal(scope, spec, literal).map(ListEdit::Append)
    } else if trimmed.starts_with('[') {
        parse_list_literal(scope, spec, trimmed).map(ListEdit::Replace)
    } else {
        Ok(ListEdit::Append(vec![text.to_string()]))
    }
}

/// Parse `['a', "b"]` using TOML array syntax.
fn parse_list_literal(scope: &str, spec: &OptionSpec, literal: &str) -> Result<Vec<String>> {
    let doc: toml::Table = toml::from_str(&format!("value = {literal}"))
        .map_err(|e| Error::invalid_value(scope, &spec.name, literal, e.message().to_string()))?;
    match doc.get("value") {
        Some(toml::Value::Array(items)) => Ok(items.iter().map(value_to_string).collect()),
        _ => Err(Error::invalid_value(
            scope,
            &spec.name,
            literal,
            "expected a list literal",
        )),
    }
}

fn value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind_name(kind: OptionKind) -> &'static str {
    match kind {
        OptionKind::Bool => "a boolean",
        OptionKind::Int => "an integer",
        OptionKind::Str => "a string",
        OptionKind::List => "a list",
    }
}

/// A flag matched to a registered option.
#[derive(Debug, Clone)]
struct ParsedFlag {
    scope: String,
    spec: OptionSpec,
    value: Option<String>,
    negated: bool,
}

#[derive(Debug, Default)]
struct SplitArgs {
    goals: Vec<String>,
    specs: Vec<String>,
    passthru: Vec<String>,
    flags: Vec<ParsedFlag>,
    /// (arg scope, flag) pairs that matched nothing
    unknown: Vec<(String, String)>,
}

impl SplitArgs {
    /// All unknown flags of the first scope that had any.
    fn unknown_flags_error(&self) -> Option<UnknownFlagsError> {
        let (scope, _) = self.unknown.first()?;
        let flags = self
            .unknown
            .iter()
            .filter(|(s, _)| s == scope)
            .map(|(_, flag)| flag.clone())
            .collect();
        Some(UnknownFlagsError::new(scope.clone(), flags))
    }
}

struct ArgSplitter<'a> {
    global: Option<&'a ScopeInfo>,
    /// Non-global scopes, longest name first so that `--a-b-opt` prefers
    /// scope `a-b` over scope `a`
    scoped: Vec<&'a ScopeInfo>,
    by_name: BTreeMap<&'a str, &'a ScopeInfo>,
}

impl<'a> ArgSplitter<'a> {
    fn new(known_scope_infos: &'a [ScopeInfo]) -> Self {
        let mut by_name = BTreeMap::new();
        for info in known_scope_infos {
            by_name.entry(info.scope.as_str()).or_insert(info);
        }
        let mut scoped: Vec<&ScopeInfo> = by_name
            .values()
            .copied()
            .filter(|info| !info.is_global())
            .collect();
        scoped.sort_by(|a, b| b.scope.len().cmp(&a.scope.len()).then(a.scope.cmp(&b.scope)));

        Self {
            global: by_name.get(GLOBAL_SCOPE).copied(),
            scoped,
            by_name,
        }
    }

    fn split(&self, args: &[String]) -> SplitArgs {
        let mut out = SplitArgs::default();
        let mut current: &str = GLOBAL_SCOPE;
        let mut tokens = args.iter().skip(1);

        while let Some(token) = tokens.next() {
            if token == "--" {
                out.passthru.extend(tokens.by_ref().cloned());
                break;
            }

            if let Some(body) = token.strip_prefix("--") {
                let (name, value) = match body.split_once('=') {
                    Some((name, value)) => (name, Some(value.to_string())),
                    None => (body, None),
                };
                match self.resolve(current, name) {
                    Some((info, spec, negated)) => out.flags.push(ParsedFlag {
                        scope: info.scope.clone(),
                        spec: spec.clone(),
                        value,
                        negated,
                    }),
                    None => out.unknown.push((current.to_string(), format!("--{name}"))),
                }
            } else if token.starts_with('-') && token.len() > 1 {
                out.unknown.push((current.to_string(), token.clone()));
            } else if let Some(info) = self
                .by_name
                .get(token.as_str())
                .filter(|info| info.is_goal)
            {
                current = &info.scope;
                out.goals.push(token.clone());
            } else {
                out.specs.push(token.clone());
            }
        }

        out
    }

    /// Find the option a flag name refers to: the current goal scope first,
    /// then scope-qualified spellings, then the global scope.
    fn resolve(&self, current: &str, name: &str) -> Option<(&'a ScopeInfo, &'a OptionSpec, bool)> {
        if current != GLOBAL_SCOPE {
            if let Some(info) = self.by_name.get(current).copied() {
                if let Some((spec, negated)) = lookup(info, name) {
                    return Some((info, spec, negated));
                }
            }
        }

        for info in &self.scoped {
            let prefix = info.flag_prefix();
            if let Some(rest) = name.strip_prefix(prefix.as_str()) {
                if let Some((spec, negated)) = lookup(info, rest) {
                    return Some((info, spec, negated));
                }
            }
            let negated_rest = name
                .strip_prefix("no-")
                .and_then(|n| n.strip_prefix(prefix.as_str()));
            if let Some(spec) = negated_rest
                .and_then(|rest| info.option(rest))
                .filter(|spec| spec.kind == OptionKind::Bool)
            {
                return Some((info, spec, true));
            }
        }

        let global = self.global?;
        lookup(global, name).map(|(spec, negated)| (global, spec, negated))
    }
}

/// Match `name` or, for booleans, `no-<name>` within one scope.
fn lookup<'a>(info: &'a ScopeInfo, name: &str) -> Option<(&'a OptionSpec, bool)> {
    if let Some(spec) = info.option(name) {
        return Some((spec, false));
    }
    let bare = name.strip_prefix("no-")?;
    info.option(bare)
        .filter(|spec| spec.kind == OptionKind::Bool)
        .map(|spec| (spec, true))
}
