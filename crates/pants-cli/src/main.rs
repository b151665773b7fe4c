//! Pants bootstrap CLI
//!
//! Runs the bootstrap for a build root and reports the derived configuration.

mod cli;
mod error;
mod report;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use pants_extensions::SearchPath;
use pants_fs::NormalizedPath;
use pants_init::BootstrapSession;
use pants_options::OptionsBootstrapper;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use error::{CliError, Result};
use report::Report;

/// OS path list seeding the module search path.
const SEARCH_PATH_VAR: &str = "PYTHONPATH";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let buildroot = resolve_buildroot(cli.buildroot.as_deref())?;
    let argv = std::iter::once("pants".to_string()).chain(cli.args).collect();
    let bootstrapper = OptionsBootstrapper::create(buildroot, std::env::vars(), argv)?;

    init_tracing(cli.verbose, &bootstrapper.get_bootstrap_options().level);
    tracing::debug!(buildroot = %bootstrapper.buildroot(), "Bootstrap options parsed");

    let session = BootstrapSession::builtin(Arc::new(SearchPath::from_env_var(SEARCH_PATH_VAR)));
    let (build_configuration, options) =
        session.create_with_build_config(&bootstrapper, cli.strict)?;

    let Some(options) = options else {
        println!("{}", "no options produced".yellow());
        return Ok(());
    };

    let report = Report::new(&session, &bootstrapper, &build_configuration, &options)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}

fn resolve_buildroot(buildroot: Option<&Path>) -> Result<NormalizedPath> {
    let dir = match buildroot {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let canonical = dunce::canonicalize(&dir).map_err(|e| {
        CliError::user(format!(
            "Build root {} is not accessible: {e}",
            dir.display()
        ))
    })?;
    Ok(NormalizedPath::new(canonical))
}

/// Log to stderr at DEBUG with `-v`, otherwise at the bootstrap `level`.
fn init_tracing(verbose: bool, level: &str) {
    let level = if verbose {
        Level::DEBUG
    } else {
        level.parse().unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{} tracing subscriber already set", "warning:".yellow().bold());
    }
}
