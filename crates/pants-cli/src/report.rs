//! What a bootstrap run derived, as text or JSON

use colored::Colorize;
use pants_extensions::BuildConfiguration;
use pants_init::{BootstrapSession, OptionsInitializer};
use pants_options::{Options, OptionsBootstrapper, display_scope};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct Report {
    pub buildroot: String,
    pub rule_threads_core: usize,
    pub rule_threads_max: usize,
    pub pants_ignore: Vec<String>,
    pub pantsd_invalidation_globs: Vec<String>,
    pub goals: Vec<String>,
    pub specs: Vec<String>,
    pub passthru: Vec<String>,
    pub backends: Vec<String>,
    pub target_types: Vec<String>,
    pub scopes: Vec<String>,
}

impl Report {
    pub fn new(
        session: &BootstrapSession,
        bootstrapper: &OptionsBootstrapper,
        build_configuration: &BuildConfiguration,
        options: &Options,
    ) -> Result<Self> {
        let buildroot = bootstrapper.buildroot();
        let bootstrap_options = bootstrapper.get_bootstrap_options();
        let (rule_threads_core, rule_threads_max) =
            OptionsInitializer::compute_executor_arguments(bootstrap_options)?;

        Ok(Self {
            buildroot: buildroot.to_string(),
            rule_threads_core,
            rule_threads_max,
            pants_ignore: OptionsInitializer::compute_pants_ignore(buildroot, bootstrap_options),
            pantsd_invalidation_globs: session.pantsd_invalidation_globs(bootstrapper),
            goals: options.goals().to_vec(),
            specs: options.specs().to_vec(),
            passthru: options.passthru().to_vec(),
            backends: build_configuration.providers().to_vec(),
            target_types: build_configuration
                .target_types()
                .iter()
                .map(|t| t.alias.clone())
                .collect(),
            scopes: options.scopes().map(|s| display_scope(s).to_string()).collect(),
        })
    }

    pub fn print(&self) {
        println!("{}", "Bootstrap".bold());
        println!();
        println!("{}:   {}", "Build root".dimmed(), self.buildroot);
        println!(
            "{}:   {} core, {} max",
            "Rule threads".dimmed(),
            self.rule_threads_core.to_string().cyan(),
            self.rule_threads_max.to_string().cyan()
        );
        println!();

        print_section("Goals", &self.goals);
        print_section("Specs", &self.specs);
        print_section("Passthru", &self.passthru);
        print_section("Backends", &self.backends);
        print_section("Target types", &self.target_types);
        print_section("Scopes", &self.scopes);
        print_section("Ignore globs", &self.pants_ignore);
        print_section("Invalidation globs", &self.pantsd_invalidation_globs);
    }
}

fn print_section(title: &str, items: &[String]) {
    println!("{}:", title.bold());
    if items.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for item in items {
        println!("  {}", item.green());
    }
    println!();
}
