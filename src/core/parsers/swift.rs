//! Swift lexer producing tokens with attached trivia.
//!
//! The trivia model follows the classic Swift lexer:
//!
//! - **Leading trivia** holds every space, tab, line break and comment between
//!   the previous token and this one.
//! - **Trailing trivia** holds only horizontal whitespace up to the next line
//!   break or comment. Comments always belong to the *next* token, so in
//!   `x! // note` the comment leads the first token of the following line.
//!
//! String literals are split into quote, segment and interpolation tokens, and
//! interpolated expressions are lexed as ordinary code. Line breaks inside
//! multi-line strings become newline trivia of the next string piece, so the
//! newline count of all leading trivia always tracks the physical line.
//!
//! The lexer is an iterator: callers that only need one token at a time never
//! hold the whole stream. The last token is always [`TokenKind::Eof`], whose
//! leading trivia is whatever trails the final real token.

use thiserror::Error;

use crate::core::data::{Position, Token, TokenKind, Trivia, TriviaPiece};

/// Lexical errors. Any of these makes the file unscannable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal starting at {0}")]
    UnterminatedString(Position),

    #[error("unterminated block comment starting at {0}")]
    UnterminatedComment(Position),

    #[error("unterminated regex literal starting at {0}")]
    UnterminatedRegex(Position),

    #[error("unexpected '{found}' at {at}")]
    UnexpectedCloser { found: char, at: Position },

    #[error("expected '{expected}' to match {opened} but found '{found}' at {at}")]
    MismatchedCloser {
        expected: char,
        found: char,
        opened: Position,
        at: Position,
    },

    #[error("unclosed '{opener}' opened at {opened}")]
    Unclosed { opener: char, opened: Position },
}

const KEYWORDS: &[&str] = &[
    "Any",
    "Self",
    "as",
    "associatedtype",
    "break",
    "case",
    "catch",
    "class",
    "continue",
    "default",
    "defer",
    "deinit",
    "do",
    "else",
    "enum",
    "extension",
    "fallthrough",
    "false",
    "fileprivate",
    "for",
    "func",
    "guard",
    "if",
    "import",
    "in",
    "init",
    "inout",
    "internal",
    "is",
    "let",
    "nil",
    "open",
    "operator",
    "private",
    "protocol",
    "public",
    "repeat",
    "rethrows",
    "return",
    "self",
    "static",
    "struct",
    "subscript",
    "super",
    "switch",
    "throw",
    "throws",
    "true",
    "try",
    "typealias",
    "var",
    "where",
    "while",
];

/// How a string literal was opened: `"`, `"""`, `#"`, `##"""`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StringDelimiter {
    multiline: bool,
    hashes: usize,
}

impl StringDelimiter {
    fn quote_kind(self) -> TokenKind {
        if self.multiline {
            TokenKind::MultilineStringQuote
        } else {
            TokenKind::StringQuote
        }
    }

    fn quote_len(self) -> usize {
        if self.multiline { 3 } else { 1 }
    }
}

/// Open constructs that must be closed before end of file.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Delimiter { opener: char, opened: Position },
    Interpolation { opened: Position },
    String { delimiter: StringDelimiter, opened: Position },
}

impl Frame {
    fn unclosed(self) -> LexError {
        match self {
            Frame::Delimiter { opener, opened } => LexError::Unclosed { opener, opened },
            Frame::Interpolation { opened } => LexError::Unclosed {
                opener: '(',
                opened,
            },
            Frame::String { opened, .. } => LexError::UnterminatedString(opened),
        }
    }
}

fn closer_for(opener: char) -> char {
    match opener {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '/' | '=' | '-' | '+' | '!' | '*' | '%' | '<' | '>' | '&' | '|' | '^' | '~' | '?'
    )
}

/// Streaming Swift lexer. Yields `Err` at most once, then stops.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    frames: Vec<Frame>,
    /// Line breaks met inside a multi-line string, waiting for the next piece.
    pending: Trivia,
    finished: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            frames: Vec::new(),
            pending: Trivia::default(),
            finished: false,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn prev(&self) -> Option<char> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.chars.get(i))
            .copied()
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        match c {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            // `\r\n` moves to the next line on the `\n`.
            '\r' if self.peek(0) != Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }
        Some(c)
    }

    fn bump_n(&mut self, n: usize) -> String {
        (0..n).filter_map(|_| self.bump()).collect()
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek(0)
            && pred(c)
        {
            text.push(c);
            self.bump();
        }
        text
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars().enumerate().all(|(i, c)| self.peek(i) == Some(c))
    }

    fn count_run(&mut self, c: char) -> usize {
        let mut n = 0;
        while self.peek(0) == Some(c) {
            self.bump();
            n += 1;
        }
        n
    }

    fn count_newlines(&mut self) -> usize {
        let mut n = 0;
        loop {
            if self.starts_with("\r\n") {
                self.bump_n(2);
            } else if matches!(self.peek(0), Some('\n' | '\r')) {
                self.bump();
            } else {
                break;
            }
            n += 1;
        }
        n
    }

    fn in_string(&self) -> bool {
        matches!(self.frames.last(), Some(Frame::String { .. }))
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.finished {
            return Ok(None);
        }

        if let Some(Frame::String { delimiter, opened }) = self.frames.last().copied() {
            return self.lex_string_part(delimiter, opened).map(Some);
        }

        let mut leading = std::mem::take(&mut self.pending);
        self.lex_trivia(&mut leading, false)?;

        let start = self.current_position();
        let Some(c) = self.peek(0) else {
            if let Some(frame) = self.frames.last() {
                return Err(frame.unclosed());
            }
            self.finished = true;
            return Ok(Some(Token::new(
                TokenKind::Eof,
                "",
                leading,
                Trivia::default(),
                start,
            )));
        };

        let left_bound = self.is_left_bound();
        let (kind, text) = self.lex_code(c, start, left_bound)?;

        let mut trailing = Trivia::default();
        if !self.in_string() {
            self.lex_trivia(&mut trailing, true)?;
        }

        Ok(Some(Token::new(kind, text, leading, trailing, start)))
    }

    // ============================================================
    // Trivia
    // ============================================================

    fn lex_trivia(&mut self, trivia: &mut Trivia, trailing: bool) -> Result<(), LexError> {
        while let Some(c) = self.peek(0) {
            match c {
                ' ' => trivia.push(TriviaPiece::Spaces(self.count_run(' '))),
                '\t' => trivia.push(TriviaPiece::Tabs(self.count_run('\t'))),
                '\n' | '\r' if !trailing => {
                    trivia.push(TriviaPiece::Newlines(self.count_newlines()));
                }
                '/' if !trailing && self.peek(1) == Some('/') => {
                    let text = self.bump_while(|c| c != '\n' && c != '\r');
                    if text.starts_with("///") && !text.starts_with("////") {
                        trivia.push(TriviaPiece::DocLineComment(text));
                    } else {
                        trivia.push(TriviaPiece::LineComment(text));
                    }
                }
                '/' if !trailing && self.peek(1) == Some('*') => {
                    trivia.push(self.lex_block_comment()?);
                }
                '#' if self.pos == 0 && self.peek(1) == Some('!') => {
                    let text = self.bump_while(|c| c != '\n' && c != '\r');
                    trivia.push(TriviaPiece::Other(text));
                }
                '\u{feff}' | '\u{0b}' | '\u{0c}' => {
                    self.bump();
                    trivia.push(TriviaPiece::Other(c.to_string()));
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn lex_block_comment(&mut self) -> Result<TriviaPiece, LexError> {
        let opened = self.current_position();
        let mut text = String::new();
        let mut depth = 0usize;

        loop {
            if self.starts_with("/*") {
                text.push_str(&self.bump_n(2));
                depth += 1;
            } else if self.starts_with("*/") {
                text.push_str(&self.bump_n(2));
                depth -= 1;
                if depth == 0 {
                    break;
                }
            } else {
                match self.bump() {
                    Some(c) => text.push(c),
                    None => return Err(LexError::UnterminatedComment(opened)),
                }
            }
        }

        if text.starts_with("/**") && !text.starts_with("/**/") {
            Ok(TriviaPiece::DocBlockComment(text))
        } else {
            Ok(TriviaPiece::BlockComment(text))
        }
    }

    // ============================================================
    // Code tokens
    // ============================================================

    /// Whether the character before the current position binds an operator
    /// to its left operand.
    fn is_left_bound(&self) -> bool {
        match self.prev() {
            None => false,
            Some('(' | '[' | '{' | ',' | ';' | ':') => false,
            Some(c) if c.is_whitespace() => false,
            // End of a block comment counts as whitespace.
            Some('/') => !(self.pos >= 2 && self.chars[self.pos - 2] == '*'),
            Some(_) => true,
        }
    }

    /// Whether the character `offset` ahead binds an operator to its right operand.
    fn is_right_bound(&self, offset: usize, left_bound: bool) -> bool {
        match self.peek(offset) {
            None => false,
            Some(')' | ']' | '}' | ',' | ';' | ':') => false,
            Some(c) if c.is_whitespace() => false,
            Some('.') => !left_bound,
            Some('/') => !matches!(self.peek(offset + 1), Some('/' | '*')),
            Some(_) => true,
        }
    }

    fn single(&mut self, kind: TokenKind) -> (TokenKind, String) {
        let text = self.bump_n(1);
        (kind, text)
    }

    fn lex_code(
        &mut self,
        c: char,
        start: Position,
        left_bound: bool,
    ) -> Result<(TokenKind, String), LexError> {
        let token = match c {
            c if is_identifier_start(c) => {
                let text = self.bump_while(is_identifier_continue);
                if KEYWORDS.contains(&text.as_str()) {
                    (TokenKind::Keyword, text)
                } else {
                    (TokenKind::Identifier, text)
                }
            }
            '`' => {
                let mut text = self.bump_n(1);
                text.push_str(&self.bump_while(|c| c != '`' && c != '\n' && c != '\r'));
                if self.peek(0) == Some('`') {
                    text.push_str(&self.bump_n(1));
                }
                (TokenKind::Identifier, text)
            }
            '$' => {
                let mut text = self.bump_n(1);
                text.push_str(&self.bump_while(is_identifier_continue));
                (TokenKind::Identifier, text)
            }
            '0'..='9' => self.lex_number(),
            '"' => self.open_string(0, start),
            '#' => self.lex_pound(start)?,
            '(' | '[' | '{' => {
                self.frames.push(Frame::Delimiter { opener: c, opened: start });
                let kind = match c {
                    '(' => TokenKind::LeftParen,
                    '[' => TokenKind::LeftBracket,
                    _ => TokenKind::LeftBrace,
                };
                self.single(kind)
            }
            ')' | ']' | '}' => {
                let kind = self.close_delimiter(c, start)?;
                self.single(kind)
            }
            ',' => self.single(TokenKind::Comma),
            ':' => self.single(TokenKind::Colon),
            ';' => self.single(TokenKind::Semicolon),
            '@' => self.single(TokenKind::AtSign),
            '\\' => self.single(TokenKind::Backslash),
            '.' if self.peek(1) == Some('.') => self.lex_operator(left_bound),
            '.' => self.single(TokenKind::Period),
            c if is_operator_char(c) => self.lex_operator(left_bound),
            _ => self.single(TokenKind::Unknown),
        };
        Ok(token)
    }

    fn close_delimiter(&mut self, found: char, at: Position) -> Result<TokenKind, LexError> {
        let kind = match found {
            ')' => TokenKind::RightParen,
            ']' => TokenKind::RightBracket,
            _ => TokenKind::RightBrace,
        };

        match self.frames.last().copied() {
            Some(Frame::Delimiter { opener, opened }) => {
                let expected = closer_for(opener);
                if expected != found {
                    return Err(LexError::MismatchedCloser {
                        expected,
                        found,
                        opened,
                        at,
                    });
                }
            }
            Some(Frame::Interpolation { opened }) => {
                if found != ')' {
                    return Err(LexError::MismatchedCloser {
                        expected: ')',
                        found,
                        opened,
                        at,
                    });
                }
            }
            Some(Frame::String { .. }) | None => {
                return Err(LexError::UnexpectedCloser { found, at });
            }
        }

        self.frames.pop();
        Ok(kind)
    }

    fn lex_number(&mut self) -> (TokenKind, String) {
        let is_hex = self.starts_with("0x");
        // `tuple.0.1` is two member accesses, not a float.
        let after_period = self.prev() == Some('.');
        let mut kind = TokenKind::IntegerLiteral;
        let mut text = String::new();

        loop {
            match self.peek(0) {
                Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
                    text.push(c);
                    self.bump();
                    let is_exponent = if is_hex {
                        matches!(c, 'p' | 'P')
                    } else {
                        matches!(c, 'e' | 'E')
                    };
                    if is_exponent {
                        kind = TokenKind::FloatLiteral;
                        if matches!(self.peek(0), Some('+' | '-')) {
                            text.push_str(&self.bump_n(1));
                        }
                    }
                }
                Some('.')
                    if !after_period
                        && kind == TokenKind::IntegerLiteral
                        && self.peek(1).is_some_and(|d| {
                            if is_hex {
                                d.is_ascii_hexdigit()
                            } else {
                                d.is_ascii_digit()
                            }
                        }) =>
                {
                    kind = TokenKind::FloatLiteral;
                    text.push_str(&self.bump_n(1));
                }
                _ => break,
            }
        }

        (kind, text)
    }

    fn lex_pound(&mut self, start: Position) -> Result<(TokenKind, String), LexError> {
        let mut hashes = 0;
        while self.peek(hashes) == Some('#') {
            hashes += 1;
        }

        match self.peek(hashes) {
            Some('"') => return Ok(self.open_string(hashes, start)),
            Some('/') => return self.lex_regex(hashes, start),
            _ => {}
        }

        if hashes == 1 && self.peek(1).is_some_and(is_identifier_start) {
            let mut text = self.bump_n(1);
            text.push_str(&self.bump_while(is_identifier_continue));
            return Ok((TokenKind::PoundKeyword, text));
        }

        Ok(self.single(TokenKind::Pound))
    }

    /// `#/.../#`, `##/.../##`, ... as one token. Line breaks inside an
    /// extended literal are handed to the next token as newline trivia.
    fn lex_regex(
        &mut self,
        hashes: usize,
        start: Position,
    ) -> Result<(TokenKind, String), LexError> {
        let mut text = self.bump_n(hashes + 1);

        loop {
            if self.peek(0) == Some('/') && (1..=hashes).all(|i| self.peek(i) == Some('#')) {
                text.push_str(&self.bump_n(hashes + 1));
                break;
            }
            match self.bump() {
                None => return Err(LexError::UnterminatedRegex(start)),
                Some('\\') => {
                    text.push('\\');
                    if let Some(escaped) = self.peek(0)
                        && escaped != '\n'
                        && escaped != '\r'
                    {
                        text.push(escaped);
                        self.bump();
                    }
                }
                Some(c) => text.push(c),
            }
        }

        let newlines = self.line - start.line;
        if newlines > 0 {
            self.pending.push(TriviaPiece::Newlines(newlines));
        }

        Ok((TokenKind::RegexLiteral, text))
    }

    /// Length of the operator starting at the current position.
    fn operator_len(&self) -> usize {
        let dot_operator = self.peek(0) == Some('.');
        let mut len = 0;

        while let Some(c) = self.peek(len) {
            if !(is_operator_char(c) || (dot_operator && c == '.')) {
                break;
            }
            // `//` and `/*` start a comment, even in the middle of an operator.
            if c == '/' && len > 0 && matches!(self.peek(len + 1), Some('/' | '*')) {
                break;
            }
            len += 1;
        }

        len
    }

    /// Whether a postfix operator run loses its first character: a leading
    /// `!` or `?` (`a!!`, `a!?.b`), or a `>` closing generic arguments before
    /// one (`Array<Int>!`).
    fn splits_postfix_front(&self, len: usize) -> bool {
        let closers = (0..len).take_while(|&i| self.peek(i) == Some('>')).count();
        closers < len && matches!(self.peek(closers), Some('!' | '?'))
    }

    fn lex_operator(&mut self, left_bound: bool) -> (TokenKind, String) {
        let len = self.operator_len();
        let right_bound = self.is_right_bound(len, left_bound);

        let postfix = left_bound && !right_bound;
        let text = if postfix && len > 1 && self.splits_postfix_front(len) {
            let piece = self.bump_n(1);
            if piece == ">" {
                return (TokenKind::PostfixOperator, piece);
            }
            piece
        } else {
            self.bump_n(len)
        };

        let kind = match text.as_str() {
            "!" if left_bound => TokenKind::ExclamationMark,
            "?" if left_bound => TokenKind::PostfixQuestionMark,
            "?" => TokenKind::InfixQuestionMark,
            "->" => TokenKind::Arrow,
            _ if left_bound == right_bound => TokenKind::BinaryOperator,
            _ if left_bound => TokenKind::PostfixOperator,
            _ => TokenKind::PrefixOperator,
        };

        (kind, text)
    }

    // ============================================================
    // String literals
    // ============================================================

    fn open_string(&mut self, hashes: usize, start: Position) -> (TokenKind, String) {
        let mut text = self.bump_n(hashes);
        let multiline = self.starts_with("\"\"\"");
        let delimiter = StringDelimiter { multiline, hashes };
        text.push_str(&self.bump_n(delimiter.quote_len()));

        self.frames.push(Frame::String {
            delimiter,
            opened: start,
        });
        (delimiter.quote_kind(), text)
    }

    fn at_string_close(&self, delimiter: StringDelimiter) -> bool {
        let quotes = delimiter.quote_len();
        (0..quotes).all(|i| self.peek(i) == Some('"'))
            && (0..delimiter.hashes).all(|i| self.peek(quotes + i) == Some('#'))
    }

    /// `\` followed by the delimiter's hashes: an escape sequence.
    fn at_escape(&self, delimiter: StringDelimiter) -> bool {
        self.peek(0) == Some('\\') && (1..=delimiter.hashes).all(|i| self.peek(i) == Some('#'))
    }

    fn at_interpolation(&self, delimiter: StringDelimiter) -> bool {
        self.at_escape(delimiter) && self.peek(delimiter.hashes + 1) == Some('(')
    }

    fn lex_string_part(
        &mut self,
        delimiter: StringDelimiter,
        opened: Position,
    ) -> Result<Token, LexError> {
        loop {
            let start = self.current_position();

            if self.at_string_close(delimiter) {
                let text = self.bump_n(delimiter.quote_len() + delimiter.hashes);
                self.frames.pop();
                let leading = std::mem::take(&mut self.pending);
                let mut trailing = Trivia::default();
                if !self.in_string() {
                    self.lex_trivia(&mut trailing, true)?;
                }
                return Ok(Token::new(
                    delimiter.quote_kind(),
                    text,
                    leading,
                    trailing,
                    start,
                ));
            }

            if self.at_interpolation(delimiter) {
                let text = self.bump_n(delimiter.hashes + 2);
                self.frames.push(Frame::Interpolation { opened: start });
                return Ok(Token::new(
                    TokenKind::InterpolationStart,
                    text,
                    std::mem::take(&mut self.pending),
                    Trivia::default(),
                    start,
                ));
            }

            match self.peek(0) {
                None => return Err(LexError::UnterminatedString(opened)),
                Some('\n' | '\r') => {
                    if !delimiter.multiline {
                        return Err(LexError::UnterminatedString(opened));
                    }
                    let count = self.count_newlines();
                    self.pending.push(TriviaPiece::Newlines(count));
                }
                Some(_) => {
                    let text = self.lex_string_segment(delimiter);
                    return Ok(Token::new(
                        TokenKind::StringSegment,
                        text,
                        std::mem::take(&mut self.pending),
                        Trivia::default(),
                        start,
                    ));
                }
            }
        }
    }

    fn lex_string_segment(&mut self, delimiter: StringDelimiter) -> String {
        let mut text = String::new();

        while let Some(c) = self.peek(0) {
            if c == '\n'
                || c == '\r'
                || self.at_string_close(delimiter)
                || self.at_interpolation(delimiter)
            {
                break;
            }

            if self.at_escape(delimiter) {
                text.push_str(&self.bump_n(delimiter.hashes + 1));
                // A trailing `\` continues the line; the break stays trivia.
                if let Some(escaped) = self.peek(0)
                    && escaped != '\n'
                    && escaped != '\r'
                {
                    text.push(escaped);
                    self.bump();
                }
                continue;
            }

            text.push(c);
            self.bump();
        }

        text
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

/// Lex a whole source string into tokens, ending with [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}
