//! Core audit engine.
//!
//! ## Module Structure
//!
//! - `data`: Tokens, trivia and source locations
//! - `parsers`: Swift lexer producing the token stream
//! - `directives`: `audit:*` comment directives
//! - `scan`: Per-line scan state machine
//! - `file_scanner`: Collects the files to audit
//! - `context`: Loads configuration and audits files in parallel

pub mod context;
pub mod data;
pub mod directives;
pub mod file_scanner;
pub mod parsers;
pub mod scan;

pub use context::{AuditContext, AuditResult, audit_file, audit_source};
pub use data::{Position, SourceContext, SourceLocation, Token, TokenKind, Trivia, TriviaPiece};
pub use directives::Directive;
pub use scan::{LineViolation, ScanState, Scanner, scan_source, scan_tokens};
