//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and its subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run the targets of a Cakefile in dependency order.
#[derive(Debug, Parser, Default)]
#[command(name = "cake", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the Cakefile to use.
    #[arg(short, long, value_name = "FILE", default_value = cake_env::DEFAULT_CAKEFILE)]
    pub file: PathBuf,

    /// Change to this directory before doing anything.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Enable verbose logging output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress output on stdout.
    #[arg(short, long)]
    pub quiet: bool,

    /// Shell used to run commands, invoked as `<shell> -c <command>`.
    ///
    /// Overrides the `CAKE_SHELL` environment variable.
    #[arg(long, value_name = "PROGRAM")]
    pub shell: Option<PathBuf>,

    /// Fail when the dependency graph contains a cycle instead of breaking it.
    #[arg(long)]
    pub deny_cycles: bool,

    /// Optional subcommand to execute; defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse command-line arguments, providing `run` as the default command.
    #[must_use]
    pub fn parse_with_default() -> Self {
        Self::parse().with_default_command()
    }

    /// Apply the default command if none was specified.
    #[must_use]
    pub fn with_default_command(mut self) -> Self {
        if self.command.is_none() {
            self.command = Some(Commands::Run);
        }
        self
    }
}

/// Available top-level commands for cake.
#[derive(Debug, Subcommand, PartialEq, Eq, Clone, Copy)]
pub enum Commands {
    /// Run every target in dependency order (default).
    Run,

    /// Print the execution order without running any commands.
    Order,

    /// List every declared target as `name: [command, ...]`.
    Targets,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_to_run_with_cakefile() {
        let cli = Cli::try_parse_from(["cake"])
            .expect("parse")
            .with_default_command();
        assert_eq!(cli.file, PathBuf::from("Cakefile"));
        assert_eq!(cli.command, Some(Commands::Run));
        assert!(!cli.deny_cycles);
    }

    #[rstest]
    #[case(&["cake", "order"], Commands::Order)]
    #[case(&["cake", "targets"], Commands::Targets)]
    #[case(&["cake", "-C", "work", "-f", "build.cake", "run"], Commands::Run)]
    fn parses_subcommands(#[case] args: &[&str], #[case] expected: Commands) {
        let cli = Cli::try_parse_from(args).expect("parse");
        assert_eq!(cli.command, Some(expected));
    }

    #[rstest]
    fn parses_shell_and_cycle_flags() {
        let cli = Cli::try_parse_from(["cake", "--shell", "bash", "--deny-cycles", "-q"])
            .expect("parse");
        assert_eq!(cli.shell, Some(PathBuf::from("bash")));
        assert!(cli.deny_cycles);
        assert!(cli.quiet);
    }
}
