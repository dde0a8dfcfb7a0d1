//! Unit tests for the runner's path handling and pipeline wiring.

use super::*;
use crate::exec::ExitOutcome;
use crate::order::OrderError;
use crate::status::{ConsoleReporter, SilentReporter};
use rstest::rstest;
use std::io;
use std::path::PathBuf;

#[derive(Default)]
struct Recorder {
    ran: Vec<String>,
}

impl ShellRunner for Recorder {
    fn run_shell_command(&mut self, command: &str) -> io::Result<ExitOutcome> {
        self.ran.push(command.to_owned());
        Ok(ExitOutcome::succeeded())
    }
}

fn cli_for(dir: &tempfile::TempDir, contents: &str, command: Commands) -> Cli {
    std::fs::write(dir.path().join("Cakefile"), contents).expect("write Cakefile");
    Cli {
        file: PathBuf::from("Cakefile"),
        directory: Some(dir.path().to_path_buf()),
        command: Some(command),
        ..Cli::default()
    }
}

#[rstest]
#[case(None, "Cakefile", "Cakefile")]
#[case(Some("work"), "Cakefile", "work/Cakefile")]
#[case(Some("work"), "/tmp/Cakefile", "/tmp/Cakefile")]
fn resolve_cakefile_path_respects_directory(
    #[case] directory: Option<&str>,
    #[case] file: &str,
    #[case] expected: &str,
) {
    let cli = Cli {
        file: PathBuf::from(file),
        directory: directory.map(PathBuf::from),
        ..Cli::default()
    };
    let resolved = resolve_cakefile_path(&cli).expect("resolve");
    assert_eq!(resolved.as_str(), expected);
}

#[rstest]
fn missing_cakefile_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cli = Cli {
        file: PathBuf::from("Cakefile"),
        directory: Some(dir.path().to_path_buf()),
        ..Cli::default()
    };
    let err = run_with(&cli, &SilentReporter, Recorder::default()).expect_err("missing");
    let runner_err = err.downcast_ref::<RunnerError>().expect("runner error");
    assert!(matches!(runner_err, RunnerError::CakefileNotFound { file_name, .. } if file_name == "Cakefile"));
    let os_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<io::Error>())
        .expect("os error in chain");
    assert_eq!(os_error.kind(), io::ErrorKind::NotFound);
}

#[rstest]
fn targets_command_lists_without_ordering() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cli = cli_for(&dir, "a: missing
	echo A
", Commands::Targets);
    let reporter = ConsoleReporter::new(Vec::new());
    let mut shell = Recorder::default();
    run_with(&cli, &reporter, &mut shell).expect("targets");
    assert!(shell.ran.is_empty());
    let text = String::from_utf8(reporter.into_inner()).expect("utf8");
    assert_eq!(text, "a: [echo A]\n");
}

#[rstest]
fn empty_cakefile_runs_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cli = cli_for(&dir, "\n\n", Commands::Run);
    let mut shell = Recorder::default();
    let summary = run_with(&cli, &SilentReporter, &mut shell).expect("run");
    assert_eq!(summary, ExecutionSummary::default());
    assert!(shell.ran.is_empty());
}

#[rstest]
fn run_executes_targets_in_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cli = cli_for(&dir, "a: b\n\techo A\nb:\n\techo B\n", Commands::Run);
    let mut shell = Recorder::default();
    let summary = run_with(&cli, &SilentReporter, &mut shell).expect("run");
    assert_eq!(shell.ran, ["echo B", "echo A"]);
    assert_eq!(summary.targets, 2);
}

#[rstest]
fn order_command_runs_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cli = cli_for(&dir, "a: b\n\techo A\nb:\n\techo B\n", Commands::Order);
    let mut shell = Recorder::default();
    run_with(&cli, &SilentReporter, &mut shell).expect("order");
    assert!(shell.ran.is_empty());
}

#[rstest]
fn deny_cycles_flag_rejects_cycles() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut cli = cli_for(&dir, "a: b\nb: a\n", Commands::Run);
    run_with(&cli, &SilentReporter, Recorder::default()).expect("cycle broken by default");

    cli.deny_cycles = true;
    let err = run_with(&cli, &SilentReporter, Recorder::default()).expect_err("cycle");
    assert!(matches!(
        err.downcast_ref::<OrderError>(),
        Some(OrderError::Cycle { .. })
    ));
}

#[rstest]
fn undeclared_dependency_stops_before_execution() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cli = cli_for(&dir, "x: y\n\techo X\n", Commands::Run);
    let mut shell = Recorder::default();
    let err = run_with(&cli, &SilentReporter, &mut shell).expect_err("missing y");
    assert!(err.downcast_ref::<OrderError>().is_some());
    assert!(shell.ran.is_empty());
}
