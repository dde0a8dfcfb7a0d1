//! Helpers for creating Cakefiles and executable stubs in tests.
//!
//! Callers own the returned [`TempDir`] to keep files on disk.
//!
//! # Examples
//!
//! ```rust
//! use test_support::write_cakefile;
//!
//! let (dir, path) = write_cakefile("all:\n\ttrue\n").expect("Cakefile");
//! assert!(path.starts_with(dir.path()));
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Write `contents` to `Cakefile` in a fresh temporary directory.
///
/// Returns the directory guard and the path of the written file.
pub fn write_cakefile(contents: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new().context("create temp dir")?;
    let path = dir.path().join("Cakefile");
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

/// Create a fake shell that appends each command to `commands.log` and exits
/// with `exit_code`.
///
/// The script is invoked like a real shell, as `<shell> -c <command>`.
/// Returns the temporary directory, the executable, and the log path.
pub fn fake_shell(exit_code: i32) -> Result<(TempDir, PathBuf, PathBuf)> {
    let dir = TempDir::new().context("create temp dir")?;
    let path = dir.path().join("fake-shell");
    let log = dir.path().join("commands.log");
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$2\" >> '{}'\nexit {exit_code}\n",
        log.display()
    );
    fs::write(&path, script).context("write fake shell")?;
    make_executable(&path)?;
    Ok((dir, path, log))
}

/// Read the commands recorded by a [`fake_shell`], one per line.
pub fn logged_commands(log: &Path) -> Result<Vec<String>> {
    if !log.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(log).with_context(|| format!("read {}", log.display()))?;
    Ok(text.lines().map(str::to_owned).collect())
}

/// Mark an existing file as executable on Unix; no-op elsewhere.
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)
            .with_context(|| format!("stat {}", path.display()))?
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)
            .with_context(|| format!("chmod {}", path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
