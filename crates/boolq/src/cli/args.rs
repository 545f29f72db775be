//! Clap argument definitions for the `boolq` CLI.

use std::path::PathBuf;

use boolq_query::{MatchMode, ModeError};
use clap::{Args, Parser, Subcommand};

/// Parse a match mode from a string.
fn parse_mode(s: &str) -> Result<MatchMode, ModeError> {
    s.parse()
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "boolq")]
#[command(about = "Filter lines and test text against boolean keyword queries")]
pub struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that control how the query is read.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Query interpretation: auto, boolean, or plain [default: from config, else auto]
    #[arg(short = 'm', long, value_parser = parse_mode)]
    pub mode: Option<MatchMode>,

    /// Refuse queries with unbalanced parentheses, unclosed quotes, or dangling operators
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `boolq filter`.
#[derive(Args, Debug, Clone)]
pub struct FilterCommand {
    /// Query to match each line against
    pub query: String,

    /// Input files (standard input when none are given)
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    /// Query interpretation flags.
    pub query_args: QueryArgs,

    /// Field separator for --field [default: from config, else tab]
    #[arg(short = 'd', long)]
    pub delimiter: Option<String>,

    /// Match only this 1-based field (repeatable; fields are joined with a space)
    #[arg(short = 'f', long = "field")]
    pub fields: Vec<usize>,

    /// Print lines that do NOT match
    #[arg(short = 'v', long)]
    pub invert: bool,

    /// Print only the number of selected lines
    #[arg(short = 'c', long)]
    pub count: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `boolq match`.
#[derive(Args, Debug, Clone)]
pub struct MatchCommand {
    /// Query to test
    pub query: String,

    /// Texts to test the query against
    #[arg(required = true)]
    pub texts: Vec<String>,

    #[command(flatten)]
    /// Query interpretation flags.
    pub query_args: QueryArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `boolq explain`.
#[derive(Args, Debug, Clone)]
pub struct ExplainCommand {
    /// Query to explain
    pub query: String,

    /// Query interpretation: auto, boolean, or plain [default: from config, else auto]
    #[arg(short = 'm', long, value_parser = parse_mode)]
    pub mode: Option<MatchMode>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `boolq init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.boolq.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `boolq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print input lines that match a query
    #[command(after_help = "\
QUERY SYNTAX:
  term              Substring match, case-insensitive
  term1 term2       Both terms (implicit AND)
  \"phrase\"          Whole-word phrase match
  a AND b, a && b   Both
  a OR b, a || b    Either
  a NOT b           a without b
  NOT a, !a         Anything without a
  (expr)            Grouping

  AND, OR and NOT share one precedence level and group left to right:
  'a OR b AND c' means '(a OR b) AND c'. Use parentheses to be explicit.

EXAMPLES:
  boolq filter 'shell NOT gas' companies.txt
  boolq filter '\"big oil\" OR energy' -f 2 data.tsv
  ps aux | boolq filter -v 'root || daemon'")]
    Filter(FilterCommand),

    /// Test texts against a query
    Match(MatchCommand),

    /// Show how a query is tokenized, parsed, and matched
    Explain(ExplainCommand),

    /// Initialize boolq configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}

/// Parses CLI arguments, exiting with usage on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
