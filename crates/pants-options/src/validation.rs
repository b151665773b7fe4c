//! Structural checks on the global scope

use crate::error::{Error, Result};
use crate::global::{self, GlobalOptions};
use crate::value::OptionValueContainer;

/// Validates parsed global options before they are handed out.
pub trait GlobalOptionsValidator: Send + Sync {
    fn validate(&self, global: &OptionValueContainer) -> Result<()>;
}

impl GlobalOptionsValidator for GlobalOptions {
    fn validate(&self, values: &OptionValueContainer) -> Result<()> {
        if let (Some(core), Some(max)) = (
            values.get_int(global::RULE_THREADS_CORE),
            values.get_int(global::RULE_THREADS_MAX),
        ) {
            // Zero leaves the maximum to be derived from the core count.
            if max != 0 && max < core {
                return Err(Error::invalid_option(
                    global::RULE_THREADS_MAX,
                    format!("{max} is less than --{} ({core})", global::RULE_THREADS_CORE),
                ));
            }
        }

        if let Some(level) = values.get_str(global::LEVEL) {
            if !global::LOG_LEVELS.contains(&level) {
                return Err(Error::invalid_option(
                    global::LEVEL,
                    format!("{level:?} is not one of {}", global::LOG_LEVELS.join(", ")),
                ));
            }
        }

        if values.get_str(global::PANTS_WORKDIR).is_some_and(str::is_empty) {
            return Err(Error::invalid_option(global::PANTS_WORKDIR, "must not be empty"));
        }

        if values
            .get_list(global::PANTS_IGNORE)
            .is_some_and(|patterns| patterns.iter().any(|p| p.trim().is_empty()))
        {
            return Err(Error::invalid_option(
                global::PANTS_IGNORE,
                "patterns must not be empty",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Rank;

    fn container(entries: &[(&str, crate::OptionValue)]) -> OptionValueContainer {
        let mut values = OptionValueContainer::new();
        for (name, value) in entries {
            values.set(*name, Rank::Flag, value.clone());
        }
        values
    }

    #[test]
    fn accepts_defaults() {
        assert!(GlobalOptions.validate(&OptionValueContainer::new()).is_ok());
    }

    #[test]
    fn rejects_max_below_core() {
        let values = container(&[
            (global::RULE_THREADS_CORE, crate::OptionValue::Int(4)),
            (global::RULE_THREADS_MAX, crate::OptionValue::Int(2)),
        ]);
        let err = GlobalOptions.validate(&values).unwrap_err();
        assert!(err.to_string().contains("--rule-threads-max"));
    }

    #[test]
    fn zero_max_is_left_to_the_default() {
        let values = container(&[
            (global::RULE_THREADS_CORE, crate::OptionValue::Int(4)),
            (global::RULE_THREADS_MAX, crate::OptionValue::Int(0)),
        ]);
        assert!(GlobalOptions.validate(&values).is_ok());
    }

    #[test]
    fn rejects_unknown_level() {
        let values = container(&[(global::LEVEL, "loud".into())]);
        assert!(GlobalOptions.validate(&values).is_err());
    }

    #[test]
    fn rejects_blank_ignore_pattern() {
        let values = container(&[(global::PANTS_IGNORE, vec![" ".to_string()].into())]);
        assert!(GlobalOptions.validate(&values).is_err());
    }
}
