//! CLI argument definitions using clap.
//!
//! `bang-audit [OPTIONS] [PATHS]...` audits the given Swift files and
//! directories; `bang-audit --init` writes a default configuration file.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Swift files or directories to audit
    #[arg(required_unless_present = "init")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Initialize a new .bangauditrc.json configuration file
    #[arg(long, conflicts_with = "paths")]
    pub init: bool,
}

/// Options shared by every audit run.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Configuration file (default: search upward for .bangauditrc.json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exit with status 1 when violations are found (overrides config file)
    #[arg(long, env = "BANG_AUDIT_FAIL_ON_VIOLATIONS")]
    pub fail_on_violations: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, cargo-style diagnostics
    #[default]
    Text,
    /// Machine-readable JSON on stdout
    Json,
}
