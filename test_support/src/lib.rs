//! Test utilities for cake.
//!
//! This crate provides helpers for writing Cakefiles into scratch
//! directories, fake shell executables, and a recording [`ShellRunner`]
//! used in integration tests.
//!
//! [`ShellRunner`]: cake::exec::ShellRunner

pub mod exec;
pub mod recording;

pub use exec::{fake_shell, logged_commands, write_cakefile};
pub use recording::RecordingShell;
