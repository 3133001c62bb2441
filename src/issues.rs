//! Issue types for audit results.
//!
//! Each issue is self-contained with everything the reporters need to
//! display it: location, literal source line, severity and rule.

use enum_dispatch::enum_dispatch;

use crate::core::SourceContext;
use crate::core::directives::IGNORE_MARKER;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UnsafeOperator,
    IoError,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UnsafeOperator => write!(f, "unsafe-operator"),
            Rule::IoError => write!(f, "io-error"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A line using `!` outside any suppression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsafeOperatorIssue {
    /// Location of the first `!` on the line, with the literal line.
    pub context: SourceContext,
}

impl UnsafeOperatorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnsafeOperator
    }
}

/// Why a file could not be audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileErrorKind {
    /// The file could not be read.
    Io,
    /// The file is not lexically valid Swift.
    Parse,
}

impl std::fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileErrorKind::Io => write!(f, "io"),
            FileErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// File that could not be read or lexed. The rest of the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileErrorIssue {
    pub file_path: String,
    pub error: String,
    pub kind: FileErrorKind,
}

impl FileErrorIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule(&self) -> Rule {
        match self.kind {
            FileErrorKind::Io => Rule::IoError,
            FileErrorKind::Parse => Rule::ParseError,
        }
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found during the audit.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    UnsafeOperator(UnsafeOperatorIssue),
    FileError(FileErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::UnsafeOperator(_) => UnsafeOperatorIssue::severity(),
            Issue::FileError(_) => FileErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::UnsafeOperator(_) => UnsafeOperatorIssue::rule(),
            Issue::FileError(issue) => issue.rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (no line context).
    File { path: &'a str },
}

impl<'a> ReportLocation<'a> {
    pub fn file_path(&self) -> &'a str {
        match *self {
            ReportLocation::Source(ctx) => ctx.file_path(),
            ReportLocation::File { path } => path,
        }
    }
}

/// Trait for types that can be reported to the CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for UnsafeOperatorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        "unsafe '!' operator".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some(format!(
            "unwrap with `if let` or `guard let`, or end the line with `// {}`",
            IGNORE_MARKER
        ))
    }
}

impl Report for FileErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        match self.kind {
            FileErrorKind::Io => "could not read file".to_string(),
            FileErrorKind::Parse => "could not parse file".to_string(),
        }
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        self.rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}

// ============================================================
// Issue Ordering
// ============================================================

impl Issue {
    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.line(),
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.col(),
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule
        self.location()
            .file_path()
            .cmp(other.location().file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
