//! Cakefile loading and parsing.
//!
//! A Cakefile is line oriented. A declaration line names a target and lists
//! its dependencies; the tab-indented lines that follow are the target's
//! shell commands:
//!
//! ```text
//! app: lib
//! 	cc -o app main.o -llib
//!
//! lib:
//! 	cc -c lib.c
//! ```
//!
//! Blank lines are ignored anywhere, including inside a command block.
//! Forward references to targets declared later are allowed; resolving them
//! is left to [`crate::order`].

use crate::graph::{Target, TargetSet};
use anyhow::{Context, Result};
use std::{fs, io, path::Path};
use tracing::{debug, warn};

mod diagnostics;

pub use diagnostics::{ParseError, ParseErrorKind};

/// Name used in diagnostics when the source has no file name.
const ANONYMOUS_SOURCE: &str = "<input>";

/// Split `source` into lines, trimming trailing whitespace.
///
/// Leading whitespace is preserved because a leading tab marks a command.
#[must_use]
pub fn split_lines(source: &str) -> Vec<String> {
    source.lines().map(|line| line.trim_end().to_owned()).collect()
}

/// Read the file at `path` as a sequence of lines.
///
/// Cakefiles must be UTF-8 throughout, commands included.
///
/// # Errors
///
/// Returns the underlying I/O error when the file is missing or unreadable,
/// and an [`io::ErrorKind::InvalidData`] error naming the first line that is
/// not valid UTF-8.
pub fn read_lines(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let data = String::from_utf8(bytes).map_err(|err| {
        let valid = err.utf8_error().valid_up_to();
        let line = err
            .as_bytes()
            .get(..valid)
            .map_or(0, |head| head.iter().filter(|&&b| b == b'\n').count())
            + 1;
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid UTF-8 [line {line}]"),
        )
    })?;
    Ok(split_lines(&data))
}

/// Parse `lines` into a [`TargetSet`].
///
/// # Errors
///
/// Returns [`ParseError`] for the first line that is not blank, not a
/// command, and not a valid `<name>: <deps>` declaration. No partial set is
/// returned.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<TargetSet, ParseError> {
    parse_named(lines, ANONYMOUS_SOURCE)
}

/// Parse Cakefile text, naming the source `name` in diagnostics.
///
/// # Errors
///
/// Returns [`ParseError`] as described for [`parse_lines`].
pub fn from_str(source: &str, name: &str) -> Result<TargetSet, ParseError> {
    parse_named(&split_lines(source), name)
}

/// Load and parse the Cakefile at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to parse.
pub fn from_path(path: impl AsRef<Path>) -> Result<TargetSet> {
    let path_ref = path.as_ref();
    let lines = read_lines(path_ref)
        .with_context(|| format!("failed to read {}", path_ref.display()))?;
    debug!(path = %path_ref.display(), lines = lines.len(), "read Cakefile");
    let set = parse_named(&lines, &path_ref.display().to_string())?;
    Ok(set)
}

fn parse_named<S: AsRef<str>>(lines: &[S], name: &str) -> Result<TargetSet, ParseError> {
    let fail = |kind, line| ParseError::new(kind, line, lines, name);
    let mut set = TargetSet::default();
    let mut current: Option<Target> = None;

    for (idx, text) in lines.iter().map(AsRef::as_ref).enumerate() {
        let line_no = idx + 1;
        if text.trim().is_empty() {
            continue;
        }
        if let Some(command) = text.strip_prefix('\t') {
            let Some(target) = current.as_mut() else {
                return Err(fail(ParseErrorKind::OrphanTask, line_no));
            };
            target.commands.push(command.to_owned());
            continue;
        }
        if let Some(done) = current.take() {
            commit(&mut set, done);
        }
        current = Some(parse_declaration(text).map_err(|kind| fail(kind, line_no))?);
    }
    if let Some(done) = current {
        commit(&mut set, done);
    }
    Ok(set)
}

fn parse_declaration(text: &str) -> Result<Target, ParseErrorKind> {
    let (head, tail) = text.split_once(':').ok_or(ParseErrorKind::MissingColon)?;
    if head.is_empty() {
        return Err(ParseErrorKind::LeadingColon);
    }
    let name = head.trim();
    if name.is_empty() {
        return Err(ParseErrorKind::EmptyName);
    }
    Ok(Target {
        name: name.to_owned(),
        dependencies: tail.split_whitespace().map(str::to_owned).collect(),
        commands: Vec::new(),
    })
}

fn commit(set: &mut TargetSet, target: Target) {
    let name = target.name.clone();
    if set.insert_or_merge(target) {
        warn!(target = %name, "duplicate target declaration merged into the first");
    }
}
