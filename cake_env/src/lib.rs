#![forbid(unsafe_code)]

//! Shared environment constants used across cake crates (library, tests, and
//! helpers).

/// Environment variable naming the shell used to run Cakefile commands.
///
/// The value is a program name or path. The program is invoked as
/// `<shell> -c <command>`.
///
/// # Examples
///
/// ```
/// use cake_env::SHELL_ENV;
/// assert_eq!(SHELL_ENV, "CAKE_SHELL");
/// ```
pub const SHELL_ENV: &str = "CAKE_SHELL";

/// Default name of the file describing build targets.
pub const DEFAULT_CAKEFILE: &str = "Cakefile";
