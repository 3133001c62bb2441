//! Per-line unsafe operator scan.
//!
//! A single left-to-right pass over the token stream. Lines are purely
//! lexical: the current line advances by the newline count of each token's
//! leading trivia, and a line ends at the first token whose leading trivia
//! contains a line break (or at end of file).
//!
//! Per token, in order:
//!
//! 1. an `audit:disable` comment anywhere in the leading trivia disables reporting
//! 2. at a line boundary, a flagged line is reported unless reporting is disabled
//!    or the first comment of the boundary trivia is `audit:ignore`
//! 3. an `audit:enable` comment re-enables reporting
//! 4. the line counter advances
//! 5. an unsafe operator flags the (new) current line
//!
//! Because the region check in step 2 happens between steps 1 and 3, a line
//! followed by `// audit:disable` is not reported, while a line followed by
//! `// audit:enable` is still judged as disabled.

use crate::core::{
    data::{Token, TokenKind},
    directives::Directive,
    parsers::swift::{LexError, Lexer},
};

/// A reported line. `column` is that of the first unsafe operator on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineViolation {
    pub line: usize,
    pub column: usize,
}

/// Scan state for one file. Owned by the caller and threaded through [`ScanState::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanState {
    pub line_number: usize,
    pub region_disabled: bool,
    pub line_has_flagged_token: bool,
    pub flagged_column: usize,
}

impl Default for ScanState {
    fn default() -> Self {
        Self {
            line_number: 1,
            region_disabled: false,
            line_has_flagged_token: false,
            flagged_column: 0,
        }
    }
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one token. Returns the violation for the line that just ended, if any.
    pub fn step(&mut self, token: &Token) -> Option<LineViolation> {
        let leading = &token.leading_trivia;
        let mut violation = None;

        if leading.contains_directive(Directive::DisableRegion) {
            self.region_disabled = true;
        }

        let at_boundary = leading.contains_newline() || token.kind == TokenKind::Eof;
        if at_boundary {
            if self.line_has_flagged_token
                && !self.region_disabled
                && Directive::recognize(leading) != Some(Directive::SuppressLine)
            {
                violation = Some(LineViolation {
                    line: self.line_number,
                    column: self.flagged_column,
                });
            }
            self.line_has_flagged_token = false;
        }

        if leading.contains_directive(Directive::EnableRegion) {
            self.region_disabled = false;
        }

        self.line_number += leading.newline_count();

        if token.kind.is_unsafe_operator() && !self.line_has_flagged_token {
            self.line_has_flagged_token = true;
            self.flagged_column = token.position.column;
        }

        violation
    }
}

/// Collects violations while driving a [`ScanState`].
#[derive(Debug, Default)]
pub struct Scanner {
    state: ScanState,
    violations: Vec<LineViolation>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, token: &Token) {
        if let Some(violation) = self.state.step(token) {
            self.violations.push(violation);
        }
    }

    /// Violations in strictly increasing line order.
    pub fn finish(self) -> Vec<LineViolation> {
        self.violations
    }
}

/// Scan an already lexed token sequence.
pub fn scan_tokens<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> Vec<LineViolation> {
    let mut scanner = Scanner::new();
    for token in tokens {
        scanner.step(token);
    }
    scanner.finish()
}

/// Lex and scan Swift source, one token at a time.
pub fn scan_source(source: &str) -> Result<Vec<LineViolation>, LexError> {
    let mut scanner = Scanner::new();
    for token in Lexer::new(source) {
        scanner.step(&token?);
    }
    Ok(scanner.finish())
}
