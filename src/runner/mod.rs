//! CLI execution and pipeline driving.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! reads the Cakefile, orders its targets, and runs them through the system
//! shell.

mod error;
mod path_helpers;

pub use error::RunnerError;

use crate::cakefile;
use crate::cli::{Cli, Commands};
use crate::exec::{ExecutionSummary, Executor, ShellRunner, SystemShell};
use crate::order::{self, CyclePolicy};
use crate::status::{ConsoleReporter, SilentReporter, StatusReporter};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use path_helpers::{ensure_cakefile_exists, resolve_cakefile_path};

/// Build the reporter for the requested verbosity.
fn make_reporter(quiet: bool) -> Box<dyn StatusReporter> {
    if quiet {
        Box::new(SilentReporter)
    } else {
        Box::new(ConsoleReporter::stdout())
    }
}

/// Build the system shell described by the CLI and environment.
fn make_shell(cli: &Cli) -> SystemShell {
    let shell = SystemShell::resolve(cli.shell.as_deref());
    match &cli.directory {
        Some(dir) => shell.in_dir(dir),
        None => shell,
    }
}

/// Execute the parsed [`Cli`] command.
///
/// # Errors
///
/// Returns an error if the Cakefile cannot be read or parsed, a dependency is
/// undeclared (or cyclic under `--deny-cycles`), or any command fails.
pub fn run(cli: &Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Run);
    let reporter = make_reporter(cli.quiet && command == Commands::Run);
    run_with(cli, reporter.as_ref(), make_shell(cli)).map(|_| ())
}

/// Execute `cli` with an injected reporter and shell.
///
/// Returns the execution summary, which is empty for the `order` and
/// `targets` commands. `targets` lists the parsed set without ordering it.
///
/// # Errors
///
/// See [`run`].
pub fn run_with<R: ShellRunner>(
    cli: &Cli,
    reporter: &dyn StatusReporter,
    shell: R,
) -> Result<ExecutionSummary> {
    let path = resolve_cakefile_path(cli)?;
    ensure_cakefile_exists(cli, &path)?;

    let set = cakefile::from_path(&path)?;
    info!(path = %path, targets = set.len(), "parsed Cakefile");
    if set.is_empty() {
        warn!(path = %path, "Cakefile declares no targets");
    }
    if tracing::enabled!(tracing::Level::DEBUG) {
        let json =
            serde_json::to_string_pretty(&set).context("serialising parsed targets")?;
        debug!("Targets:\n{json}");
    }

    let command = cli.command.unwrap_or(Commands::Run);
    if command == Commands::Targets {
        set.iter().for_each(|target| reporter.report_target(target));
        return Ok(ExecutionSummary::default());
    }

    let policy = if cli.deny_cycles {
        CyclePolicy::Deny
    } else {
        CyclePolicy::Break
    };
    let order = order::execution_order_with(&set, policy)?;
    reporter.report_order(&order);

    match command {
        Commands::Order | Commands::Targets => Ok(ExecutionSummary::default()),
        Commands::Run => {
            let summary = Executor::new(shell, reporter).execute(&set, &order)?;
            Ok(summary)
        }
    }
}

#[cfg(test)]
mod tests;
