//! Core data types shared by the lexer, the scanner and the reporters.
//!
//! ## Module Structure
//!
//! - `source`: Source code location types (SourceContext, SourceLocation)
//! - `token`: Lexed tokens (Token, TokenKind, Position)
//! - `trivia`: Whitespace and comments attached to tokens (Trivia, TriviaPiece)

pub mod source;
pub mod token;
pub mod trivia;

pub use source::{SourceContext, SourceLocation};
pub use token::{Position, Token, TokenKind};
pub use trivia::{Trivia, TriviaPiece};
