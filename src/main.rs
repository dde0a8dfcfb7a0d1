//! Application entry point.
//!
//! Parses command-line arguments and delegates execution to [`runner::run`].

use cake::{cli::Cli, diagnostics, runner};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = Cli::parse_with_default();
    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    };
    fmt().with_max_level(max_level).with_writer(io::stderr).init();
    match runner::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "runner failed");
            let mut stderr = io::stderr().lock();
            for line in diagnostics::error_lines(&err) {
                drop(writeln!(stderr, "{line}"));
            }
            if cli.verbose {
                if let Some(report) = diagnostics::render_report(&err) {
                    drop(writeln!(stderr, "{report}"));
                }
            }
            ExitCode::FAILURE
        }
    }
}
