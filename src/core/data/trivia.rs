use std::fmt;

/// A single piece of trivia attached to a token.
///
/// The set of kinds is closed: every character the lexer does not turn into
/// a token ends up in exactly one of these pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaPiece {
    /// A run of `n` spaces.
    Spaces(usize),
    /// A run of `n` horizontal tabs.
    Tabs(usize),
    /// A run of `n` line breaks (`\n`, `\r\n` and lone `\r` each count once).
    Newlines(usize),
    /// `// ...` up to, not including, the line break.
    LineComment(String),
    /// `/* ... */`, possibly nested and spanning several lines.
    BlockComment(String),
    /// `/// ...`
    DocLineComment(String),
    /// `/** ... */`
    DocBlockComment(String),
    /// Anything else the lexer skips (form feeds, BOM, shebang line).
    Other(String),
}

impl TriviaPiece {
    /// Number of line breaks this piece contributes.
    ///
    /// Block comments count the line breaks they contain so that a comment
    /// spanning several lines keeps the following line numbers exact.
    pub fn newline_count(&self) -> usize {
        match self {
            TriviaPiece::Newlines(n) => *n,
            TriviaPiece::BlockComment(text) | TriviaPiece::DocBlockComment(text) => {
                count_line_breaks(text)
            }
            TriviaPiece::Spaces(_)
            | TriviaPiece::Tabs(_)
            | TriviaPiece::LineComment(_)
            | TriviaPiece::DocLineComment(_)
            | TriviaPiece::Other(_) => 0,
        }
    }

    /// Raw comment text, including the comment markers, if this piece is a comment.
    pub fn comment_text(&self) -> Option<&str> {
        match self {
            TriviaPiece::LineComment(text)
            | TriviaPiece::BlockComment(text)
            | TriviaPiece::DocLineComment(text)
            | TriviaPiece::DocBlockComment(text) => Some(text),
            TriviaPiece::Spaces(_)
            | TriviaPiece::Tabs(_)
            | TriviaPiece::Newlines(_)
            | TriviaPiece::Other(_) => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        self.comment_text().is_some()
    }

    /// Comment body with the opening and closing markers removed, untrimmed.
    pub fn comment_body(&self) -> Option<&str> {
        let body = match self {
            TriviaPiece::LineComment(text) => text.strip_prefix("//")?,
            TriviaPiece::DocLineComment(text) => text.strip_prefix("///")?,
            TriviaPiece::BlockComment(text) => {
                let inner = text.strip_prefix("/*")?;
                inner.strip_suffix("*/").unwrap_or(inner)
            }
            TriviaPiece::DocBlockComment(text) => {
                let inner = text.strip_prefix("/**")?;
                inner.strip_suffix("*/").unwrap_or(inner)
            }
            _ => return None,
        };
        Some(body)
    }
}

impl fmt::Display for TriviaPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriviaPiece::Spaces(n) => write!(f, "{}", " ".repeat(*n)),
            TriviaPiece::Tabs(n) => write!(f, "{}", "\t".repeat(*n)),
            TriviaPiece::Newlines(n) => write!(f, "{}", "\n".repeat(*n)),
            TriviaPiece::LineComment(text)
            | TriviaPiece::BlockComment(text)
            | TriviaPiece::DocLineComment(text)
            | TriviaPiece::DocBlockComment(text)
            | TriviaPiece::Other(text) => f.write_str(text),
        }
    }
}

fn count_line_breaks(text: &str) -> usize {
    let mut count = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => count += 1,
            '\r' => {
                chars.next_if_eq(&'\n');
                count += 1;
            }
            _ => {}
        }
    }
    count
}

/// Ordered sequence of trivia pieces before or after a token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trivia {
    pieces: Vec<TriviaPiece>,
}

impl Trivia {
    pub fn new(pieces: Vec<TriviaPiece>) -> Self {
        Self { pieces }
    }

    pub fn push(&mut self, piece: TriviaPiece) {
        self.pieces.push(piece);
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        &self.pieces
    }

    /// Total number of line breaks across all pieces.
    pub fn newline_count(&self) -> usize {
        self.pieces.iter().map(TriviaPiece::newline_count).sum()
    }

    /// Whether any piece breaks the line, including a block comment spanning lines.
    pub fn contains_newline(&self) -> bool {
        self.pieces.iter().any(|p| p.newline_count() > 0)
    }

    /// All comment pieces, in source order.
    pub fn comments(&self) -> impl Iterator<Item = &TriviaPiece> {
        self.pieces.iter().filter(|p| p.is_comment())
    }

    /// The first comment piece, if any.
    pub fn first_comment(&self) -> Option<&TriviaPiece> {
        self.comments().next()
    }
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            write!(f, "{}", piece)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Trivia {
    type Item = &'a TriviaPiece;
    type IntoIter = std::slice::Iter<'a, TriviaPiece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}

impl FromIterator<TriviaPiece> for Trivia {
    fn from_iter<I: IntoIterator<Item = TriviaPiece>>(iter: I) -> Self {
        Self {
            pieces: iter.into_iter().collect(),
        }
    }
}
