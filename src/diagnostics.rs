//! Diagnostics utilities.
//!
//! Formats a failed run for the error stream: one `Error: <message>` line per
//! error in the chain, innermost cause first, plus an optional graphical
//! `miette` report for errors that carry diagnostic metadata.
//!
//! # Examples
//! ```
//! use cake::diagnostics::error_lines;
//!
//! let err = anyhow::anyhow!("disk on fire").context("failed to read Cakefile");
//! assert_eq!(
//!     error_lines(&err),
//!     ["Error: disk on fire", "Error: failed to read Cakefile"],
//! );
//! ```

use crate::cakefile::ParseError;
use crate::exec::ExecError;
use crate::order::OrderError;
use crate::runner::RunnerError;
use miette::{Diagnostic, GraphicalReportHandler};

/// Render every error in the chain as `Error: <message>`, innermost first.
#[must_use]
pub fn error_lines(err: &anyhow::Error) -> Vec<String> {
    let mut lines: Vec<String> = err.chain().map(|cause| format!("Error: {cause}")).collect();
    lines.reverse();
    lines
}

/// Find the first error in the chain that carries `miette` metadata.
fn as_diagnostic(err: &anyhow::Error) -> Option<&dyn Diagnostic> {
    err.chain().find_map(|cause| {
        cause
            .downcast_ref::<ParseError>()
            .map(|d| d as &dyn Diagnostic)
            .or_else(|| cause.downcast_ref::<OrderError>().map(|d| d as &dyn Diagnostic))
            .or_else(|| cause.downcast_ref::<ExecError>().map(|d| d as &dyn Diagnostic))
            .or_else(|| cause.downcast_ref::<RunnerError>().map(|d| d as &dyn Diagnostic))
    })
}

/// Render a graphical report for the first diagnostic in the chain.
///
/// Returns `None` when no error in the chain is a known diagnostic.
#[must_use]
pub fn render_report(err: &anyhow::Error) -> Option<String> {
    let diagnostic = as_diagnostic(err)?;
    let mut out = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut out, diagnostic)
        .ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cakefile;

    #[test]
    fn parse_errors_render_a_single_line() {
        let err = anyhow::Error::from(cakefile::from_str("foo\n", "Cakefile").expect_err("bad"));
        assert_eq!(error_lines(&err), ["Error: no target [line 1]"]);
    }

    #[test]
    fn report_includes_source_name_and_help() {
        let err = anyhow::Error::from(
            cakefile::from_str("ok:\n\ttrue\nbroken\n", "Cakefile").expect_err("bad"),
        );
        let report = render_report(&err).expect("diagnostic");
        assert!(report.contains("Cakefile"), "report: {report}");
        assert!(report.contains("cake::parse::no_target"), "report: {report}");
    }

    #[test]
    fn plain_errors_have_no_report() {
        assert!(render_report(&anyhow::anyhow!("plain")).is_none());
    }
}
