//! Query matchers that pick boolean or plain substring matching.
//!
//! Most queries typed into a search box are a single word or a name. Those skip
//! the parser and use a plain substring test; anything with boolean syntax goes
//! through the full pipeline.

use std::{fmt, str::FromStr};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    ast::QueryExpr, classify::is_boolean_query, error::ModeError, parser::parse_boolean_query,
};

/// How a query string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Boolean if the query uses boolean syntax, plain otherwise.
    #[default]
    Auto,
    /// Always parse the query as a boolean expression.
    Boolean,
    /// Always match the whole query as one substring.
    Plain,
}

impl FromStr for MatchMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "boolean" => Ok(Self::Boolean),
            "plain" => Ok(Self::Plain),
            _ => Err(ModeError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Boolean => write!(f, "boolean"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// A query prepared once and tested against many texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// A parsed boolean expression.
    Boolean(QueryExpr),
    /// A lowercased, trimmed needle for substring matching.
    Plain(String),
}

impl Matcher {
    /// Prepares `query` according to `mode`.
    pub fn new(query: &str, mode: MatchMode) -> Self {
        let boolean = match mode {
            MatchMode::Auto => is_boolean_query(query),
            MatchMode::Boolean => true,
            MatchMode::Plain => false,
        };
        debug!(
            "matching {query:?} in {} mode ({mode} requested)",
            if boolean { "boolean" } else { "plain" }
        );

        if boolean {
            Self::Boolean(parse_boolean_query(query))
        } else {
            Self::Plain(query.trim().to_lowercase())
        }
    }

    /// Returns true if `text` matches.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Boolean(expr) => expr.evaluate(text),
            Self::Plain(needle) => {
                needle.is_empty() || text.to_lowercase().contains(needle.as_str())
            }
        }
    }

    /// Returns true if the query was parsed as a boolean expression.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Returns the parsed expression in boolean mode.
    pub fn expr(&self) -> Option<&QueryExpr> {
        match self {
            Self::Boolean(expr) => Some(expr),
            Self::Plain(_) => None,
        }
    }
}
