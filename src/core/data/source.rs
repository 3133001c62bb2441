/// Pure position information in Swift source files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Position with the literal source line it points into.
///
/// `source_line` is kept untrimmed so the reporter can place a caret
/// under `col`; trimming happens at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }

    /// The source line without surrounding whitespace.
    pub fn trimmed_line(&self) -> &str {
        self.source_line.trim()
    }

    /// Column relative to `trimmed_line()` (1-based, never below 1).
    pub fn trimmed_col(&self) -> usize {
        let indent = self.source_line.chars().count()
            - self.source_line.trim_start().chars().count();
        self.col().saturating_sub(indent).max(1)
    }
}
