//! Error types for the runner module.

use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the driver before the pipeline starts.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// The Cakefile does not exist at the expected path.
    #[error("{file_name} not found in {directory}")]
    #[diagnostic(
        code(cake::runner::cakefile_not_found),
        help("create a {file_name} or point at one with --file")
    )]
    CakefileNotFound {
        /// Name of the expected file (e.g., "Cakefile").
        file_name: String,
        /// Directory description (e.g., "the current directory").
        directory: String,
        /// The path that was attempted.
        path: PathBuf,
        /// The operating system's report for the lookup.
        #[source]
        source: io::Error,
    },
}
