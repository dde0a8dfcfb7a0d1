//! A [`ShellRunner`] that records commands instead of spawning processes.

use cake::exec::{ExitOutcome, ShellRunner};
use std::collections::HashMap;
use std::io;

/// Records every command and answers with scripted outcomes.
///
/// Commands without a scripted outcome succeed.
///
/// # Examples
///
/// ```rust
/// use cake::exec::{ExitOutcome, ShellRunner};
/// use test_support::RecordingShell;
///
/// let mut shell = RecordingShell::default().failing("make", Some(2));
/// assert!(shell.run_shell_command("echo").expect("run").success);
/// assert_eq!(shell.run_shell_command("make").expect("run"), ExitOutcome::failed(Some(2)));
/// assert_eq!(shell.commands(), ["echo", "make"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingShell {
    commands: Vec<String>,
    outcomes: HashMap<String, ExitOutcome>,
}

impl RecordingShell {
    /// Make `command` fail with `code` (`None` simulates a signal).
    #[must_use]
    pub fn failing(mut self, command: &str, code: Option<i32>) -> Self {
        self.outcomes
            .insert(command.to_owned(), ExitOutcome::failed(code));
        self
    }

    /// Commands run so far, in order.
    #[must_use]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl ShellRunner for RecordingShell {
    fn run_shell_command(&mut self, command: &str) -> io::Result<ExitOutcome> {
        self.commands.push(command.to_owned());
        Ok(self
            .outcomes
            .get(command)
            .copied()
            .unwrap_or_else(ExitOutcome::succeeded))
    }
}
