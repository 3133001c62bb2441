use std::fmt;

use super::trivia::Trivia;

/// 1-based position of the first character of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token categories produced by the Swift lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    /// `#if`, `#selector`, `#available`, ...
    PoundKeyword,
    IntegerLiteral,
    FloatLiteral,
    /// `"` or `#"` (with any number of `#`), opening or closing.
    StringQuote,
    /// `"""` or `#"""`, opening or closing.
    MultilineStringQuote,
    /// Literal text between quotes and interpolations.
    StringSegment,
    /// `#/.../#` regex literal, any number of `#`.
    RegexLiteral,
    /// `\(` or `\#(` inside a string literal.
    InterpolationStart,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Colon,
    Semicolon,
    Period,
    AtSign,
    Pound,
    Backslash,
    Arrow,
    /// Left-bound lone `!`: forced unwrap, `as!`, `try!`, implicitly unwrapped types.
    ExclamationMark,
    /// Left-bound lone `?`.
    PostfixQuestionMark,
    /// Lone `?` that is not left-bound (ternary).
    InfixQuestionMark,
    PrefixOperator,
    PostfixOperator,
    BinaryOperator,
    Unknown,
    Eof,
}

impl TokenKind {
    /// The kind flagged by the audit.
    pub fn is_unsafe_operator(self) -> bool {
        self == TokenKind::ExclamationMark
    }
}

/// A lexed token with its surrounding trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub leading_trivia: Trivia,
    pub trailing_trivia: Trivia,
    /// Where `text` starts. Display only: scanning derives lines from trivia.
    pub position: Position,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        leading_trivia: Trivia,
        trailing_trivia: Trivia,
        position: Position,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            leading_trivia,
            trailing_trivia,
            position,
        }
    }
}

impl fmt::Display for Token {
    /// Renders the token exactly as it appeared in the source, trivia included.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.leading_trivia, self.text, self.trailing_trivia
        )
    }
}
