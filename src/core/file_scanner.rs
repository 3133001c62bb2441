use std::{
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal path prefixes.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Drop `.` components so `./Sources/a.swift` and `Sources/a.swift` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Result of collecting files to audit.
pub struct ScanResult {
    /// Files to audit, deduplicated and sorted.
    pub files: BTreeSet<String>,
    /// Path arguments that do not exist.
    pub missing: Vec<String>,
    pub skipped_count: usize,
}

struct IgnoreMatcher {
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreMatcher {
    fn new(base_dir: &Path, ignore_patterns: &[String], verbose: bool) -> Self {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();

        for p in ignore_patterns {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => patterns.push(pattern),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid ignore pattern '{}': {}",
                                "warning:".bold().yellow(),
                                p,
                                e
                            );
                        }
                    }
                }
            } else {
                let path = normalize(Path::new(p));
                literal_paths.push(normalize(&base_dir.join(&path)));
                literal_paths.push(path);
            }
        }

        Self {
            literal_paths,
            patterns,
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let path = normalize(path);
        if self
            .literal_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            return true;
        }
        self.patterns.iter().any(|p| p.matches_path(&path))
    }
}

/// Collect the files to audit from path arguments.
///
/// Directories are walked recursively and filtered by `extensions`; a file
/// given explicitly is always audited. `ignore_patterns` apply to both.
pub fn scan_files(
    base_dir: &Path,
    paths: &[PathBuf],
    extensions: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut missing = Vec::new();
    let mut skipped_count = 0;

    let ignores = IgnoreMatcher::new(base_dir, ignore_patterns, verbose);
    let extensions: Vec<&str> = extensions
        .iter()
        .map(|e| e.trim_start_matches('.'))
        .collect();

    for root in paths {
        if !root.exists() {
            missing.push(root.to_string_lossy().into_owned());
            continue;
        }

        if root.is_file() {
            if !ignores.is_ignored(root) {
                files.insert(root.to_string_lossy().into_owned());
            }
            continue;
        }

        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();

            if ignores.is_ignored(path) {
                continue;
            }

            if entry.file_type().is_file() && has_extension(path, &extensions) {
                files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    ScanResult {
        files,
        missing,
        skipped_count,
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}
