//! Option values and the per-scope value container

use crate::scope::OptionKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl OptionValue {
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Bool(_) => OptionKind::Bool,
            Self::Int(_) => OptionKind::Int,
            Self::Str(_) => OptionKind::Str,
            Self::List(_) => OptionKind::List,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for OptionValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Where a value came from. Later ranks override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Default,
    Config,
    Env,
    Flag,
}

/// A value paired with the rank it was set at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedValue {
    pub rank: Rank,
    pub value: OptionValue,
}

/// The option values of a single scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionValueContainer {
    values: BTreeMap<String, RankedValue>,
}

impl OptionValueContainer {
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Set `name` to `value`, recording the rank it came from.
    pub fn set(&mut self, name: impl Into<String>, rank: Rank, value: OptionValue) {
        self.values.insert(name.into(), RankedValue { rank, value });
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name).map(|ranked| &ranked.value)
    }

    pub fn get_ranked(&self, name: &str) -> Option<&RankedValue> {
        self.values.get(name)
    }

    pub fn rank(&self, name: &str) -> Option<Rank> {
        self.values.get(name).map(|ranked| ranked.rank)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(OptionValue::as_bool)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptionValue::as_int)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(OptionValue::as_list)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Option names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_reject_other_kinds() {
        let mut container = OptionValueContainer::new();
        container.set("level", Rank::Default, "info".into());
        container.set("plugins", Rank::Flag, vec!["a".to_string()].into());

        assert_eq!(container.get_str("level"), Some("info"));
        assert_eq!(container.get_int("level"), None);
        assert_eq!(container.get_list("plugins"), Some(&["a".to_string()][..]));
        assert_eq!(container.rank("plugins"), Some(Rank::Flag));
    }

    #[test]
    fn ranks_are_ordered_by_precedence() {
        assert!(Rank::Default < Rank::Config);
        assert!(Rank::Config < Rank::Env);
        assert!(Rank::Env < Rank::Flag);
    }

    #[test]
    fn display_lists() {
        let value = OptionValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(value.to_string(), "[a, b]");
    }
}
