//! Query evaluation against candidate text.
//!
//! Evaluation is a pure function of the tree and the text. Matching is
//! case-insensitive: literal values are lowercased when the tree is built and
//! the text is lowercased once per [`QueryExpr::evaluate`] call. Phrases are
//! matched with the regex compiled when the literal was built.

use crate::{ast::QueryExpr, parser::parse_boolean_query};

impl QueryExpr {
    /// Returns true if `text` satisfies this expression.
    pub fn evaluate(&self, text: &str) -> bool {
        self.matches_lowercase(&text.to_lowercase())
    }

    /// Evaluates against text that has already been lowercased.
    fn matches_lowercase(&self, text: &str) -> bool {
        match self {
            Self::Literal { value, .. } if value.is_empty() => true,
            Self::Literal {
                pattern: Some(pattern),
                ..
            } => pattern.is_match(text),
            Self::Literal { value, .. } => text.contains(value.as_str()),
            Self::And { left, right } => {
                left.matches_lowercase(text) && right.matches_lowercase(text)
            }
            Self::Or { left, right } => {
                left.matches_lowercase(text) || right.matches_lowercase(text)
            }
            Self::Not { child } => !child.matches_lowercase(text),
        }
    }
}

/// Returns true if `text` matches `query`.
///
/// Parses the query on every call; to test many texts against one query,
/// parse once with [`parse_boolean_query`] and call [`QueryExpr::evaluate`].
pub fn boolean_match(query: &str, text: &str) -> bool {
    parse_boolean_query(query).evaluate(text)
}
