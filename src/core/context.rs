use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config, load_config_file},
    core::{
        data::{SourceContext, SourceLocation},
        file_scanner::scan_files,
        scan::scan_source,
    },
    issues::{FileErrorIssue, FileErrorKind, Issue, UnsafeOperatorIssue},
};

/// Outcome of auditing every collected file.
#[derive(Debug)]
pub struct AuditResult {
    /// All issues, sorted by path, line and column.
    pub issues: Vec<Issue>,
    pub files_checked: usize,
}

impl AuditResult {
    pub fn violation_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, Issue::UnsafeOperator(_)))
            .count()
    }

    pub fn file_error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, Issue::FileError(_)))
            .count()
    }
}

/// Audit context: merged configuration plus the files to scan.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g. `--fail-on-violations`)
/// 2. `.bangauditrc.json` (explicit `--config`, or found by searching upward)
/// 3. Built-in defaults
pub struct AuditContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Files to audit, sorted.
    pub files: Vec<String>,

    /// Path arguments that do not exist.
    pub missing: Vec<String>,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,
}

impl AuditContext {
    /// Create a new `AuditContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be read, parsed or validated.
    pub fn new(paths: &[PathBuf], common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let base_dir = PathBuf::from(".");

        let mut config = match &common_args.config {
            Some(path) => {
                if verbose {
                    eprintln!("{} Using config {}", "note:".bold(), path.display());
                }
                load_config_file(path)?
            }
            None => {
                let start_dir = env::current_dir().unwrap_or_else(|_| base_dir.clone());
                let result = load_config(&start_dir)?;
                if verbose {
                    match &result.path {
                        Some(path) => {
                            eprintln!("{} Using config {}", "note:".bold(), path.display())
                        }
                        None => eprintln!(
                            "{} No {} found, using default configuration",
                            "note:".bold(),
                            CONFIG_FILE_NAME
                        ),
                    }
                }
                result.config
            }
        };

        if common_args.fail_on_violations {
            config.fail_on_violations = true;
        }

        let scan_result = scan_files(
            &base_dir,
            paths,
            &config.extensions,
            &config.ignores,
            verbose,
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        if verbose {
            eprintln!(
                "{} Auditing {} file(s)",
                "note:".bold(),
                scan_result.files.len()
            );
        }

        Ok(Self {
            config,
            files: scan_result.files.into_iter().collect(),
            missing: scan_result.missing,
            verbose,
        })
    }

    pub fn fail_on_violations(&self) -> bool {
        self.config.fail_on_violations
    }

    /// Audit every file in parallel. A file that fails to read or lex becomes a
    /// `FileErrorIssue`; the other files are still audited.
    pub fn run(&self) -> AuditResult {
        let mut issues: Vec<Issue> = self
            .files
            .par_iter()
            .flat_map_iter(|file_path| match audit_file(Path::new(file_path)) {
                Ok(found) => found
                    .into_iter()
                    .map(Issue::UnsafeOperator)
                    .collect::<Vec<_>>(),
                Err(err) => {
                    if self.verbose {
                        eprintln!(
                            "{} {} - {}",
                            "warning:".bold().yellow(),
                            err.file_path,
                            err.error
                        );
                    }
                    vec![Issue::FileError(err)]
                }
            })
            .collect();

        issues.extend(self.missing.iter().map(|path| {
            Issue::FileError(FileErrorIssue {
                file_path: path.clone(),
                error: "No such file or directory".to_string(),
                kind: FileErrorKind::Io,
            })
        }));

        issues.sort();

        AuditResult {
            issues,
            files_checked: self.files.len(),
        }
    }
}

/// Audit a single file.
pub fn audit_file(path: &Path) -> Result<Vec<UnsafeOperatorIssue>, FileErrorIssue> {
    let file_path = path.to_string_lossy().into_owned();

    let source = fs::read_to_string(path).map_err(|e| FileErrorIssue {
        file_path: file_path.clone(),
        error: e.to_string(),
        kind: FileErrorKind::Io,
    })?;

    audit_source(&file_path, &source)
}

/// Audit source text already in memory. Reported lines are taken from `source`.
pub fn audit_source(
    file_path: &str,
    source: &str,
) -> Result<Vec<UnsafeOperatorIssue>, FileErrorIssue> {
    let violations = scan_source(source).map_err(|e| FileErrorIssue {
        file_path: file_path.to_string(),
        error: e.to_string(),
        kind: FileErrorKind::Parse,
    })?;

    let lines = source_lines(source);
    Ok(violations
        .into_iter()
        .map(|v| {
            let source_line = lines.get(v.line - 1).copied().unwrap_or_default();
            UnsafeOperatorIssue {
                context: SourceContext::new(
                    SourceLocation::new(file_path, v.line, v.column),
                    source_line,
                ),
            }
        })
        .collect())
}

/// Split on `\r\n`, `\n` and lone `\r`, matching the lexer's line counting.
fn source_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = source.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&source[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&source[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&source[start..]);
    lines
}
