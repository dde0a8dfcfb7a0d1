//! Sequential task execution.
//!
//! The [`Executor`] walks an [`ExecutionOrder`] one target at a time and runs
//! each target's commands in listed order through a [`ShellRunner`]. The first
//! failing command aborts its target, and the first failing target aborts the
//! run. Work already done by earlier targets is not rolled back.

use std::io;

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::graph::{Target, TargetSet};
use crate::order::ExecutionOrder;
use crate::status::StatusReporter;

mod shell;

pub use shell::{ExitOutcome, ShellRunner, SystemShell};

/// A single command that did not succeed.
#[derive(Debug, Error, Diagnostic)]
pub enum TaskError {
    /// The command ran but exited abnormally or with a non-zero status.
    #[error("processing task [{command}]")]
    #[diagnostic(code(cake::exec::task_failed))]
    Failed {
        /// The literal command string.
        command: String,
        /// Exit code; `None` when the process was terminated by a signal.
        code: Option<i32>,
    },

    /// The shell could not be started.
    #[error("processing task [{command}]")]
    #[diagnostic(
        code(cake::exec::spawn_failed),
        help("check that the shell exists or set it with --shell")
    )]
    Spawn {
        /// The literal command string.
        command: String,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },
}

impl TaskError {
    /// The command that failed.
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Failed { command, .. } | Self::Spawn { command, .. } => command,
        }
    }
}

/// Errors that abort a run.
#[derive(Debug, Error, Diagnostic)]
pub enum ExecError {
    /// One of the target's commands failed.
    #[error("processing target [{name}]")]
    #[diagnostic(code(cake::exec::target_failed))]
    Target {
        /// Name of the failing target.
        name: String,
        /// The command failure.
        #[source]
        source: TaskError,
    },

    /// The execution order names a target missing from the set.
    #[error("execution order names undeclared target [{name}]")]
    #[diagnostic(code(cake::exec::missing_target))]
    MissingTarget {
        /// The unknown name.
        name: String,
    },
}

/// Counts of work completed by a successful run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExecutionSummary {
    /// Targets whose commands all succeeded.
    pub targets: usize,
    /// Commands run successfully.
    pub commands: usize,
}

/// Runs targets in order through a [`ShellRunner`].
pub struct Executor<'a, R> {
    runner: R,
    reporter: &'a dyn StatusReporter,
}

impl<'a, R: ShellRunner> Executor<'a, R> {
    /// Create an executor using `runner` for commands and `reporter` for
    /// progress output.
    pub fn new(runner: R, reporter: &'a dyn StatusReporter) -> Self {
        Self { runner, reporter }
    }

    /// Run every target of `set` in `order`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Target`] for the first target with a failing
    /// command, or [`ExecError::MissingTarget`] when `order` names a target
    /// not present in `set`. Remaining targets are not run.
    pub fn execute(
        &mut self,
        set: &TargetSet,
        order: &ExecutionOrder,
    ) -> Result<ExecutionSummary, ExecError> {
        self.reporter.report_processing();
        let mut summary = ExecutionSummary::default();
        for name in order {
            let target = set.get(name).ok_or_else(|| ExecError::MissingTarget {
                name: name.clone(),
            })?;
            summary.commands += self
                .run_target(target)
                .map_err(|source| {
                    warn!(target = %name, command = source.command(), "target failed");
                    ExecError::Target {
                        name: name.clone(),
                        source,
                    }
                })?;
            summary.targets += 1;
        }
        info!(
            targets = summary.targets,
            commands = summary.commands,
            "all targets completed"
        );
        Ok(summary)
    }

    /// Run the target's commands, returning how many ran.
    fn run_target(&mut self, target: &Target) -> Result<usize, TaskError> {
        debug!(target = %target.name, commands = target.commands.len(), "processing target");
        for command in &target.commands {
            self.run_command(command)?;
        }
        Ok(target.commands.len())
    }

    fn run_command(&mut self, command: &str) -> Result<(), TaskError> {
        self.reporter.report_command(command);
        let outcome = self
            .runner
            .run_shell_command(command)
            .map_err(|source| TaskError::Spawn {
                command: command.to_owned(),
                source,
            })?;
        if outcome.success {
            return Ok(());
        }
        warn!(command, code = ?outcome.code, "command failed");
        Err(TaskError::Failed {
            command: command.to_owned(),
            code: outcome.code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::SilentReporter;
    use crate::{cakefile, order};
    use rstest::{fixture, rstest};

    /// Records commands and fails the ones listed in `fail`.
    #[derive(Default)]
    struct FakeShell {
        ran: Vec<String>,
        fail: Vec<(String, Option<i32>)>,
        unspawnable: Option<String>,
    }

    impl ShellRunner for FakeShell {
        fn run_shell_command(&mut self, command: &str) -> io::Result<ExitOutcome> {
            if self.unspawnable.as_deref() == Some(command) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no shell"));
            }
            self.ran.push(command.to_owned());
            Ok(self
                .fail
                .iter()
                .find(|(c, _)| c == command)
                .map_or_else(ExitOutcome::succeeded, |(_, code)| ExitOutcome::failed(*code)))
        }
    }

    #[fixture]
    fn graph() -> (TargetSet, ExecutionOrder) {
        let set = cakefile::from_str(
            "all: lib\n\tlink\n\tpackage\nlib:\n\tcompile a\n\tcompile b\nextra:\n\tnote\n",
            "Cakefile",
        )
        .expect("parse");
        let order = order::execution_order(&set).expect("order");
        (set, order)
    }

    #[rstest]
    fn runs_commands_in_dependency_order(graph: (TargetSet, ExecutionOrder)) {
        let (set, order) = graph;
        let mut shell = FakeShell::default();
        let summary = Executor::new(&mut shell, &SilentReporter)
            .execute(&set, &order)
            .expect("success");
        assert_eq!(shell.ran, ["compile a", "compile b", "link", "package", "note"]);
        assert_eq!(
            summary,
            ExecutionSummary {
                targets: 3,
                commands: 5
            }
        );
    }

    #[rstest]
    #[case(Some(137))]
    #[case(Some(1))]
    #[case(None)]
    fn first_failure_aborts_remaining_work(
        graph: (TargetSet, ExecutionOrder),
        #[case] code: Option<i32>,
    ) {
        let (set, order) = graph;
        let mut shell = FakeShell {
            fail: vec![("compile a".into(), code)],
            ..FakeShell::default()
        };
        let err = Executor::new(&mut shell, &SilentReporter)
            .execute(&set, &order)
            .expect_err("failure");
        assert_eq!(shell.ran, ["compile a"]);
        let ExecError::Target { name, source } = err else {
            panic!("expected target failure");
        };
        assert_eq!(name, "lib");
        assert_eq!(source.command(), "compile a");
        assert!(matches!(source, TaskError::Failed { code: c, .. } if c == code));
    }

    #[rstest]
    fn spawn_failure_is_a_task_failure(graph: (TargetSet, ExecutionOrder)) {
        let (set, order) = graph;
        let mut shell = FakeShell {
            unspawnable: Some("link".into()),
            ..FakeShell::default()
        };
        let err = Executor::new(&mut shell, &SilentReporter)
            .execute(&set, &order)
            .expect_err("failure");
        assert_eq!(err.to_string(), "processing target [all]");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("processing task [link]"));
        let ExecError::Target { source: task, .. } = &err else {
            panic!("expected target failure");
        };
        assert!(matches!(task, TaskError::Spawn { .. }));
        assert_eq!(task.command(), "link");
        assert_eq!(shell.ran, ["compile a", "compile b"]);
    }

    #[rstest]
    fn order_naming_unknown_target_is_rejected(graph: (TargetSet, ExecutionOrder)) {
        let (set, _) = graph;
        let bogus = order::execution_order(
            &cakefile::from_str("ghost:\n", "Cakefile").expect("parse"),
        )
        .expect("order");
        let err = Executor::new(FakeShell::default(), &SilentReporter)
            .execute(&set, &bogus)
            .expect_err("missing");
        assert!(matches!(err, ExecError::MissingTarget { name } if name == "ghost"));
    }

    #[rstest]
    fn targets_without_commands_succeed() {
        let set = cakefile::from_str("a: b\nb:\n", "Cakefile").expect("parse");
        let order = order::execution_order(&set).expect("order");
        let summary = Executor::new(FakeShell::default(), &SilentReporter)
            .execute(&set, &order)
            .expect("success");
        assert_eq!(summary.targets, 2);
        assert_eq!(summary.commands, 0);
    }
}
