//! Shell invocation for Cakefile commands.
//!
//! Every command is handed, unmodified, to a command interpreter as a single
//! argument: `sh -c <command>` on Unix and `cmd /C <command>` on Windows. The
//! child inherits the standard streams and is waited on synchronously.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use cake_env::SHELL_ENV;
use tracing::{debug, info};

#[cfg(windows)]
const SHELL: &str = "cmd";
#[cfg(windows)]
const SHELL_ARGS: &[&str] = &["/C"];

#[cfg(not(windows))]
const SHELL: &str = "sh";
#[cfg(not(windows))]
const SHELL_ARGS: &[&str] = &["-c"];

/// Flag used for shells named explicitly via `--shell` or the environment.
const CUSTOM_SHELL_FLAG: &str = "-c";

/// How a shell invocation ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExitOutcome {
    /// `true` only for a normal exit with status 0.
    pub success: bool,
    /// Exit code, when the process exited normally.
    pub code: Option<i32>,
}

impl ExitOutcome {
    /// A normal exit with status 0.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    /// A failed invocation. `code` is `None` for abnormal termination.
    #[must_use]
    pub const fn failed(code: Option<i32>) -> Self {
        Self {
            success: false,
            code,
        }
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Capability to run one shell command to completion.
///
/// The executor only depends on this trait, so tests can substitute a fake
/// that records commands instead of spawning processes.
pub trait ShellRunner {
    /// Run `command` through a shell and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when the shell cannot be spawned or waited on.
    fn run_shell_command(&mut self, command: &str) -> io::Result<ExitOutcome>;
}

impl<T: ShellRunner + ?Sized> ShellRunner for &mut T {
    fn run_shell_command(&mut self, command: &str) -> io::Result<ExitOutcome> {
        (**self).run_shell_command(command)
    }
}

/// Runs commands through a real shell process.
#[derive(Clone, Debug)]
pub struct SystemShell {
    program: PathBuf,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl Default for SystemShell {
    fn default() -> Self {
        Self {
            program: PathBuf::from(SHELL),
            args: SHELL_ARGS.iter().map(|arg| (*arg).to_owned()).collect(),
            working_dir: None,
        }
    }
}

impl SystemShell {
    /// Use `program` as the shell, invoked as `<program> -c <command>`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: vec![CUSTOM_SHELL_FLAG.to_owned()],
            working_dir: None,
        }
    }

    /// Pick the shell from an explicit override, then [`SHELL_ENV`], then the
    /// platform default.
    #[must_use]
    pub fn resolve(explicit: Option<&Path>) -> Self {
        Self::resolve_with(explicit, |key| std::env::var_os(key))
    }

    /// As [`SystemShell::resolve`], reading the environment through `read_env`.
    #[must_use]
    pub fn resolve_with<F>(explicit: Option<&Path>, mut read_env: F) -> Self
    where
        F: FnMut(&str) -> Option<OsString>,
    {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| {
                read_env(SHELL_ENV)
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from)
            })
            .map_or_else(Self::default, Self::new)
    }

    /// Run commands inside `dir` instead of the current directory.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// The shell program that will be spawned.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments placed before the command string.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(command);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl ShellRunner for SystemShell {
    fn run_shell_command(&mut self, command: &str) -> io::Result<ExitOutcome> {
        let mut cmd = self.command(command);
        info!(shell = %self.program.display(), command, "Running command");
        let status = cmd.status()?;
        debug!(?status, "command finished");
        Ok(status.into())
    }
}
