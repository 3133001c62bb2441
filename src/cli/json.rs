//! JSON output for `--format json`.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::AuditResult;
use crate::issues::Issue;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub summary: JsonSummary,
    pub violations: Vec<JsonViolation<'a>>,
    pub errors: Vec<JsonError<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSummary {
    pub files_checked: usize,
    pub violation_count: usize,
    pub error_count: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonViolation<'a> {
    pub path: &'a str,
    pub line: usize,
    pub column: usize,
    /// The offending line, trimmed.
    pub source: &'a str,
}

#[derive(Debug, Serialize)]
pub struct JsonError<'a> {
    pub path: &'a str,
    pub kind: String,
    pub message: &'a str,
}

impl<'a> JsonReport<'a> {
    pub fn new(result: &'a AuditResult) -> Self {
        let mut violations = Vec::new();
        let mut errors = Vec::new();

        for issue in &result.issues {
            match issue {
                Issue::UnsafeOperator(issue) => violations.push(JsonViolation {
                    path: issue.context.file_path(),
                    line: issue.context.line(),
                    column: issue.context.col(),
                    source: issue.context.trimmed_line(),
                }),
                Issue::FileError(issue) => errors.push(JsonError {
                    path: &issue.file_path,
                    kind: issue.kind.to_string(),
                    message: &issue.error,
                }),
            }
        }

        Self {
            summary: JsonSummary {
                files_checked: result.files_checked,
                violation_count: violations.len(),
                error_count: errors.len(),
            },
            violations,
            errors,
        }
    }
}

/// Print the audit result as pretty JSON to stdout.
pub fn print(result: &AuditResult) -> Result<()> {
    print_to(result, &mut io::stdout().lock())
}

pub fn print_to<W: Write>(result: &AuditResult, writer: &mut W) -> Result<()> {
    let report = JsonReport::new(result);
    serde_json::to_writer_pretty(&mut *writer, &report).context("Failed to write JSON report")?;
    writeln!(writer)?;
    Ok(())
}
