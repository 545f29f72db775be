//! Helpers shared by the query-running commands.

use std::process::ExitCode;

use boolq_config::Config;
use boolq_query::{MatchMode, Matcher};

use crate::cli::{args::QueryArgs, lint::lint_query, output::warning};

/// Query settings after command-line flags are applied over the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySettings {
    /// How the query is interpreted.
    pub mode: MatchMode,
    /// Whether query warnings are fatal.
    pub strict: bool,
}

impl QuerySettings {
    /// Resolves settings, with flags taking precedence over config values.
    pub fn resolve(config: &Config, args: &QueryArgs) -> Self {
        Self {
            mode: args.mode.unwrap_or(config.search.mode),
            strict: args.strict || config.filter.strict,
        }
    }
}

/// Builds the matcher for `query`, reporting structural warnings on stderr.
///
/// Only boolean queries are checked; in plain mode parentheses and quotes are
/// ordinary text. In strict mode any warning is an error.
pub fn prepare_matcher(query: &str, settings: QuerySettings) -> Result<Matcher, ExitCode> {
    let matcher = Matcher::new(query, settings.mode);
    if !matcher.is_boolean() {
        return Ok(matcher);
    }

    let warnings = lint_query(query);
    for w in &warnings {
        eprintln!("{}", warning(&format!("warning: {w}")));
    }

    if settings.strict && !warnings.is_empty() {
        eprintln!("error: query rejected in strict mode");
        return Err(ExitCode::FAILURE);
    }

    Ok(matcher)
}
