//! Path resolution helpers for the runner module.
//!
//! Centralises Cakefile path logic so the main runner module stays focused on
//! driving the pipeline.

use crate::cli::Cli;
use anyhow::{Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use std::{fs, io};

use super::RunnerError;

/// Determine the Cakefile path respecting the CLI's directory option.
///
/// # Errors
/// Returns an error when the CLI `file` or `directory` paths are not valid
/// UTF-8, or when the resolved path has no file name.
pub(super) fn resolve_cakefile_path(cli: &Cli) -> Result<Utf8PathBuf> {
    let file = Utf8PathBuf::from_path_buf(cli.file.clone())
        .map_err(|path| anyhow!("Cakefile path {} is not valid UTF-8", path.display()))?;
    let resolved = if let Some(dir) = &cli.directory {
        let base = Utf8PathBuf::from_path_buf(dir.clone())
            .map_err(|path| anyhow!("directory {} is not valid UTF-8", path.display()))?;
        base.join(&file)
    } else {
        file
    };
    if resolved.file_name().is_none() {
        return Err(anyhow!("Cakefile path {resolved} has no file name"));
    }
    Ok(resolved)
}

/// Fail with [`RunnerError::CakefileNotFound`] when nothing exists at `path`.
///
/// Other lookup failures are left for the reader to report.
pub(super) fn ensure_cakefile_exists(cli: &Cli, path: &Utf8Path) -> Result<()> {
    let source = match fs::metadata(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => err,
        _ => return Ok(()),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Cakefile path {path} has no file name"))?
        .to_owned();
    let directory = if cli.directory.is_some() {
        let parent = path.parent().map_or_else(|| path.as_str(), Utf8Path::as_str);
        format!("directory {parent}")
    } else {
        "the current directory".to_owned()
    };
    Err(RunnerError::CakefileNotFound {
        file_name,
        directory,
        path: path.to_path_buf().into_std_path_buf(),
        source,
    }
    .into())
}
