//! Turns Cakefile syntax errors into actionable diagnostics.
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Why a line could not be read as a target declaration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// The line contains no colon at all.
    MissingColon,
    /// The line starts with a colon, so no name precedes it.
    LeadingColon,
    /// Only whitespace precedes the colon.
    EmptyName,
    /// A tab-indented command appears before any target declaration.
    OrphanTask,
}

impl ParseErrorKind {
    const fn hint(self) -> &'static str {
        match self {
            Self::MissingColon => "declare a target as `<name>: <dependencies>`",
            Self::LeadingColon | Self::EmptyName => "a target name must precede the colon",
            Self::OrphanTask => "indented commands must follow a `<name>:` declaration",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::MissingColon => "expected a `:` on this line",
            Self::LeadingColon | Self::EmptyName => "missing target name",
            Self::OrphanTask => "command has no owning target",
        }
    }
}

/// A Cakefile line that is neither blank, a command, nor a valid declaration.
///
/// Displays as `no target [line <n>]`.
#[derive(Debug, Error, Diagnostic)]
#[error("no target [line {line}]")]
#[diagnostic(code(cake::parse::no_target))]
pub struct ParseError {
    kind: ParseErrorKind,
    line: usize,
    #[source_code]
    src: NamedSource<String>,
    #[label("{note}")]
    span: SourceSpan,
    note: &'static str,
    #[help]
    help: String,
}

impl ParseError {
    pub(super) fn new<S: AsRef<str>>(
        kind: ParseErrorKind,
        line: usize,
        lines: &[S],
        name: &str,
    ) -> Self {
        let (source, span) = locate(lines, line);
        Self {
            kind,
            line,
            src: NamedSource::new(name, source),
            span,
            note: kind.label(),
            help: kind.hint().to_owned(),
        }
    }

    /// One-based number of the offending line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Classification of the failure.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

/// Rebuild the source text and find the byte span of the one-based `line`.
fn locate<S: AsRef<str>>(lines: &[S], line: usize) -> (String, SourceSpan) {
    let mut source = String::new();
    let mut span = (0, 0);
    for (idx, text) in lines.iter().map(AsRef::as_ref).enumerate() {
        if idx + 1 == line {
            span = (source.len(), text.len());
        }
        source.push_str(text);
        source.push('\n');
    }
    (source, span.into())
}
