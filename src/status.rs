//! Progress reporting for a cake run.
//!
//! This module provides a [`StatusReporter`] trait plus a console reporter
//! writing the familiar progress lines and a silent reporter for `--quiet`.
//! Reporting is observability only: write failures never abort a run.

use crate::graph::Target;
use crate::order::ExecutionOrder;
use std::io::{self, Write};
use std::sync::Mutex;

/// Header printed before the execution order.
pub const ORDER_HEADER: &str = "[...Target Order...]";
/// Header printed before commands start running.
pub const PROCESSING_HEADER: &str = "[...Processing...]";

/// Report run progress to the user.
pub trait StatusReporter {
    /// Announce the execution order.
    fn report_order(&self, order: &ExecutionOrder);

    /// Announce that command execution is starting.
    fn report_processing(&self);

    /// Echo a command immediately before it runs.
    fn report_command(&self, command: &str);

    /// Describe a declared target and its commands.
    fn report_target(&self, target: &Target);
}

/// Writes progress lines to a stream, standard output by default.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: Mutex<W>,
}

impl ConsoleReporter {
    /// Create a reporter writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Create a reporter writing to `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the reporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn line(&self, text: &str) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // Status output failures should not abort the run.
        drop(writeln!(out, "{text}"));
        drop(out.flush());
    }
}

impl<W: Write> StatusReporter for ConsoleReporter<W> {
    fn report_order(&self, order: &ExecutionOrder) {
        self.line(ORDER_HEADER);
        for name in order {
            self.line(name);
        }
    }

    fn report_processing(&self) {
        self.line(PROCESSING_HEADER);
    }

    fn report_command(&self, command: &str) {
        self.line(&format!("@{command}"));
    }

    fn report_target(&self, target: &Target) {
        self.line(&target.to_string());
    }
}

/// Silent reporter: emits nothing.
pub struct SilentReporter;

impl StatusReporter for SilentReporter {
    fn report_order(&self, _order: &ExecutionOrder) {}
    fn report_processing(&self) {}
    fn report_command(&self, _command: &str) {}
    fn report_target(&self, _target: &Target) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cakefile, order};

    #[test]
    fn console_reporter_writes_progress_lines() {
        let set = cakefile::from_str("a: b\n\techo A\nb:\n", "Cakefile").expect("parse");
        let order = order::execution_order(&set).expect("order");
        let reporter = ConsoleReporter::new(Vec::new());

        reporter.report_order(&order);
        reporter.report_processing();
        reporter.report_command("echo A");

        let text = String::from_utf8(reporter.into_inner()).expect("utf8");
        assert_eq!(
            text,
            "[...Target Order...]\nb\na\n[...Processing...]\n@echo A\n"
        );
    }

    #[test]
    fn console_reporter_describes_targets() {
        let set = cakefile::from_str("a: b\n\techo A\n\techo AA\nb:\n", "Cakefile")
            .expect("parse");
        let reporter = ConsoleReporter::new(Vec::new());
        set.iter().for_each(|target| reporter.report_target(target));
        let text = String::from_utf8(reporter.into_inner()).expect("utf8");
        assert_eq!(text, "a: [echo A, echo AA]\nb: []\n");
    }
}
