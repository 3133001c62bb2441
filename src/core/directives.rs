//! Audit directives embedded in comments.
//!
//! - `audit:disable` / `audit:enable` - turn reporting off and back on for a region
//! - `audit:ignore` - suppress the line that ends right before the comment
//!
//! A directive is the whole comment body: markers are matched exactly and
//! case-sensitively after stripping the comment delimiters and surrounding
//! whitespace, so `// audit:ignore because` is an ordinary comment.

use crate::core::data::{Trivia, TriviaPiece};

pub const DISABLE_MARKER: &str = "audit:disable";
pub const ENABLE_MARKER: &str = "audit:enable";
pub const IGNORE_MARKER: &str = "audit:ignore";

/// Parsed audit directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    DisableRegion,
    EnableRegion,
    SuppressLine,
}

impl Directive {
    /// Parse a directive from a comment body (delimiters already removed).
    /// Returns None if the body is not exactly one of the markers.
    pub fn parse(body: &str) -> Option<Self> {
        match body.trim() {
            DISABLE_MARKER => Some(Self::DisableRegion),
            ENABLE_MARKER => Some(Self::EnableRegion),
            IGNORE_MARKER => Some(Self::SuppressLine),
            _ => None,
        }
    }

    /// Parse a directive from a single trivia piece. Non-comments never match.
    pub fn from_piece(piece: &TriviaPiece) -> Option<Self> {
        piece.comment_body().and_then(Self::parse)
    }

    /// Directive carried by the first comment of `trivia`, if any.
    ///
    /// Only the first comment counts: `// note` followed by `// audit:ignore`
    /// in the same bundle yields None.
    pub fn recognize(trivia: &Trivia) -> Option<Self> {
        trivia.first_comment().and_then(Self::from_piece)
    }

    pub fn marker(self) -> &'static str {
        match self {
            Self::DisableRegion => DISABLE_MARKER,
            Self::EnableRegion => ENABLE_MARKER,
            Self::SuppressLine => IGNORE_MARKER,
        }
    }
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.marker())
    }
}

impl Trivia {
    /// Whether any comment in this bundle is exactly `directive`.
    pub fn contains_directive(&self, directive: Directive) -> bool {
        self.comments()
            .any(|piece| Directive::from_piece(piece) == Some(directive))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn line(text: &str) -> TriviaPiece {
        TriviaPiece::LineComment(text.to_string())
    }

    #[test]
    fn test_parse_markers() {
        assert_eq!(Directive::parse("audit:disable"), Some(Directive::DisableRegion));
        assert_eq!(Directive::parse(" audit:enable "), Some(Directive::EnableRegion));
        assert_eq!(Directive::parse("\taudit:ignore"), Some(Directive::SuppressLine));
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Directive::parse("audit:ignore because"), None);
        assert_eq!(Directive::parse("Audit:Ignore"), None);
        assert_eq!(Directive::parse("audit:ignored"), None);
        assert_eq!(Directive::parse("audit"), None);
        assert_eq!(Directive::parse(""), None);
    }

    #[test]
    fn test_all_comment_kinds_are_recognized() {
        let pieces = [
            line("// audit:ignore"),
            line("//audit:ignore"),
            TriviaPiece::DocLineComment("/// audit:ignore".to_string()),
            TriviaPiece::BlockComment("/* audit:ignore */".to_string()),
            TriviaPiece::DocBlockComment("/** audit:ignore */".to_string()),
        ];
        for piece in pieces {
            assert_eq!(
                Directive::from_piece(&piece),
                Some(Directive::SuppressLine),
                "{piece:?}"
            );
        }
    }

    #[test]
    fn test_non_comments_never_match() {
        assert_eq!(
            Directive::from_piece(&TriviaPiece::Other("audit:ignore".to_string())),
            None
        );
        assert_eq!(Directive::from_piece(&TriviaPiece::Newlines(1)), None);
    }

    #[test]
    fn test_recognize_uses_first_comment_only() {
        let trivia = Trivia::new(vec![
            TriviaPiece::Spaces(1),
            line("// note"),
            TriviaPiece::Newlines(1),
            line("// audit:ignore"),
        ]);
        assert_eq!(Directive::recognize(&trivia), None);
        assert!(trivia.contains_directive(Directive::SuppressLine));
    }

    #[test]
    fn test_recognize_skips_whitespace() {
        let trivia = Trivia::new(vec![
            TriviaPiece::Spaces(1),
            line("// audit:ignore"),
            TriviaPiece::Newlines(1),
        ]);
        assert_eq!(Directive::recognize(&trivia), Some(Directive::SuppressLine));
        assert_eq!(Directive::recognize(&Trivia::default()), None);
    }

    #[test]
    fn test_contains_directive_finds_later_comments() {
        let trivia = Trivia::new(vec![
            line("// audit:ignore"),
            TriviaPiece::Newlines(2),
            line("// audit:disable"),
            TriviaPiece::Newlines(1),
        ]);
        assert!(trivia.contains_directive(Directive::DisableRegion));
        assert!(!trivia.contains_directive(Directive::EnableRegion));
    }

    #[test]
    fn test_display_is_marker() {
        assert_eq!(Directive::SuppressLine.to_string(), "audit:ignore");
        assert_eq!(Directive::DisableRegion.marker(), DISABLE_MARKER);
    }
}
