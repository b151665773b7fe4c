//! "Did you mean" diagnostics for unknown flags

use colored::{Color, Colorize};
use pants_options::{GLOBAL_SCOPE, Options, UnknownFlagsError, display_scope, global};
use serde::Serialize;

/// Maximum number of close matches suggested per flag.
const MAX_MATCHES: usize = 3;
/// Minimum similarity ratio for a suggestion.
const MATCH_CUTOFF: f32 = 0.6;
const MISPLACED_GLOBAL_HINT: &str =
    "Global options must come before any goals or goal-specific options.";

/// What to tell the user about one unknown flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagSuggestion {
    pub flag: String,
    /// The flag is a global flag written after a goal
    pub misplaced_global: bool,
    /// Close matches among the flags valid in the scope, best first
    pub matches: Vec<String>,
}

/// The diagnostic for an [`UnknownFlagsError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagErrorHelp {
    pub scope: String,
    pub suggestions: Vec<FlagSuggestion>,
    /// e.g. `./pants help test`
    pub help_command: String,
}

impl FlagErrorHelp {
    /// Suggest replacements for each unknown flag.
    ///
    /// Candidates are the unscoped flags of the error's scope plus the global
    /// flags. `options` must know the full scope catalog.
    pub fn compute(options: &Options, error: &UnknownFlagsError) -> Self {
        let scope = error.arg_scope.as_str();
        let global_flags = options
            .scope_info(GLOBAL_SCOPE)
            .map(|info| info.unscoped_flags())
            .unwrap_or_default();

        let mut candidates: Vec<String> = Vec::new();
        if scope != GLOBAL_SCOPE {
            if let Some(info) = options.scope_info(scope) {
                candidates.extend(info.unscoped_flags());
            }
        }
        for flag in &global_flags {
            if !candidates.contains(flag) {
                candidates.push(flag.clone());
            }
        }
        let candidate_refs: Vec<&str> = candidates.iter().map(String::as_str).collect();

        let suggestions = error
            .flags
            .iter()
            .map(|flag| {
                let misplaced_global = scope != GLOBAL_SCOPE && global_flags.contains(flag);
                let matches = if misplaced_global {
                    Vec::new()
                } else {
                    similar::get_close_matches(
                        flag.as_str(),
                        &candidate_refs,
                        MAX_MATCHES,
                        MATCH_CUTOFF,
                    )
                    .into_iter()
                    .map(str::to_string)
                    .collect()
                };
                FlagSuggestion {
                    flag: flag.clone(),
                    misplaced_global,
                    matches,
                }
            })
            .collect();

        let bin_name = options
            .for_global_scope()
            .get_str(global::PANTS_BIN_NAME)
            .unwrap_or("./pants");
        let help_command = if scope == GLOBAL_SCOPE {
            format!("{bin_name} help")
        } else {
            format!("{bin_name} help {scope}")
        };

        Self {
            scope: scope.to_string(),
            suggestions,
            help_command,
        }
    }

    /// The diagnostic as terminal text, one line per message.
    pub fn render(&self, colors: bool) -> String {
        let red = |text: &str| paint(text, Color::Red, colors);
        let cyan = |text: &str| paint(text, Color::Cyan, colors);
        let green = |text: &str| paint(text, Color::Green, colors);

        let mut out = String::new();
        for suggestion in &self.suggestions {
            out.push_str(&format!(
                "Unknown flag {} on {} scope\n",
                red(&suggestion.flag),
                display_scope(&self.scope)
            ));
            if suggestion.misplaced_global {
                out.push_str(&format!(
                    "Did you mean to use the global {}? {MISPLACED_GLOBAL_HINT}\n",
                    cyan(&suggestion.flag)
                ));
            } else if !suggestion.matches.is_empty() {
                let matches: Vec<String> = suggestion.matches.iter().map(|m| cyan(m)).collect();
                out.push_str(&format!("Did you mean {}?\n", matches.join(", ")));
            }
        }
        out.push_str(&format!("Use `{}` to get help.\n", green(&self.help_command)));
        out
    }
}

fn paint(text: &str, color: Color, colors: bool) -> String {
    if colors {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

/// Reports unknown flags to the user.
pub trait HelpPrinter: Send + Sync {
    fn handle_unknown_flags(&self, options: &Options, error: &UnknownFlagsError) -> FlagErrorHelp;
}

/// Default [`HelpPrinter`]: writes the diagnostic to stderr, in color unless
/// the `colors` global option is off.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagErrorHelpPrinter;

impl HelpPrinter for FlagErrorHelpPrinter {
    fn handle_unknown_flags(&self, options: &Options, error: &UnknownFlagsError) -> FlagErrorHelp {
        let help = FlagErrorHelp::compute(options, error);
        let colors = options
            .for_global_scope()
            .get_bool(global::COLORS)
            .unwrap_or(true);
        eprint!("{}", help.render(colors));
        help
    }
}
