//! Cake core library.
//!
//! Cake reads a `Cakefile` describing named targets, their dependencies, and
//! the shell commands each target runs. The pipeline is one-way:
//!
//! 1. [`cakefile`] parses lines into a [`graph::TargetSet`];
//! 2. [`order`] derives an [`order::ExecutionOrder`] from the dependency edges;
//! 3. [`exec`] runs each target's commands in that order, stopping at the
//!    first failure.
//!
//! [`runner`] composes these for the `cake` binary.

pub mod cakefile;
pub mod cli;
pub mod diagnostics;
pub mod exec;
pub mod graph;
pub mod order;
pub mod runner;
pub mod status;
