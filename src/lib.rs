//! bang-audit - unsafe `!` auditor for Swift sources
//!
//! Flags every line containing a forced unwrap (`x!`) or forced cast (`as!`)
//! token. Lines can be exempted with `// audit:ignore`, and whole regions with
//! `// audit:disable` ... `// audit:enable`.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, output, exit status)
//! - `config`: Configuration file loading and parsing
//! - `core`: Swift lexer, directive recognition and the line scanner
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
