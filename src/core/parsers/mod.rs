//! Source parsers.
//!
//! - `swift`: Swift lexer producing a token stream with attached trivia

pub mod swift;
