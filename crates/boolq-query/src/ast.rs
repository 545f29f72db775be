//! Query abstract syntax tree.
//!
//! A parsed query is a strict tree: every node owns its children outright and
//! nothing is shared or mutated after construction.

use std::fmt;

use log::warn;
use regex::Regex;
use serde::Serialize;

/// A whole-word phrase compiled to `\b<phrase>\b`.
#[derive(Debug, Clone)]
pub struct PhrasePattern {
    /// Escaped phrase between `\b` anchors.
    regex: Regex,
}

impl PhrasePattern {
    /// Compiles a pattern matching `phrase` between word boundaries.
    ///
    /// Returns `None` for an empty phrase, or when the pattern exceeds the
    /// regex size limit.
    fn compile(phrase: &str) -> Option<Self> {
        if phrase.is_empty() {
            return None;
        }
        let pattern = format!(r"\b{}\b", regex::escape(phrase));
        Regex::new(&pattern)
            .map_err(|e| warn!("phrase {phrase:?} falls back to substring matching: {e}"))
            .ok()
            .map(|regex| Self { regex })
    }

    /// Returns true if the phrase occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for PhrasePattern {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str()
    }
}

impl Eq for PhrasePattern {}

/// A parsed boolean query expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryExpr {
    /// A leaf predicate testing for one value in the text.
    Literal {
        /// The value to look for, lowercased at construction.
        value: String,
        /// Whether the value must appear as a whole-word phrase.
        exact_phrase: bool,
        /// Compiled form of a non-empty phrase.
        #[serde(skip)]
        pattern: Option<PhrasePattern>,
    },

    /// Conjunction: both sides must match.
    And {
        /// Left operand.
        left: Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },

    /// Disjunction: at least one side must match.
    Or {
        /// Left operand.
        left: Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },

    /// Negation: the child must NOT match.
    Not {
        /// Negated expression.
        child: Box<Self>,
    },
}

impl QueryExpr {
    /// Creates a substring literal.
    pub fn literal(value: &str) -> Self {
        Self::Literal {
            value: value.to_lowercase(),
            exact_phrase: false,
            pattern: None,
        }
    }

    /// Creates a whole-word phrase literal.
    pub fn phrase(value: &str) -> Self {
        let value = value.to_lowercase();
        Self::Literal {
            pattern: PhrasePattern::compile(&value),
            value,
            exact_phrase: true,
        }
    }

    /// Creates the empty literal, which matches any text.
    pub fn any() -> Self {
        Self::literal("")
    }

    /// Creates a conjunction.
    pub fn and(left: Self, right: Self) -> Self {
        Self::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates a disjunction.
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates a negation.
    pub fn not(child: Self) -> Self {
        Self::Not {
            child: Box::new(child),
        }
    }

    /// Returns true if this is an empty literal.
    pub fn is_vacuous(&self) -> bool {
        matches!(self, Self::Literal { value, .. } if value.is_empty())
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Literal {
                value,
                exact_phrase: false,
                ..
            } => writeln!(f, "{prefix}Literal({value:?})"),
            Self::Literal {
                value,
                exact_phrase: true,
                ..
            } => writeln!(f, "{prefix}Phrase({value:?})"),
            Self::And { left, right } => {
                writeln!(f, "{prefix}And")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
            Self::Or { left, right } => {
                writeln!(f, "{prefix}Or")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
            Self::Not { child } => {
                writeln!(f, "{prefix}Not")?;
                child.fmt_tree(f, indent + 1)
            }
        }
    }

    /// Formats the expression as a fully parenthesized query string.
    ///
    /// For trees produced by the parser, the output parses back to a tree that
    /// matches exactly the same texts: `((shell OR bp) AND energy)`.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Literal {
                value,
                exact_phrase,
                ..
            } => {
                if *exact_phrase || value.is_empty() {
                    format!("\"{value}\"")
                } else {
                    value.clone()
                }
            }
            Self::And { left, right } => {
                format!("({} AND {})", left.to_query_string(), right.to_query_string())
            }
            Self::Or { left, right } => {
                format!("({} OR {})", left.to_query_string(), right.to_query_string())
            }
            // A NOT directly after NOT would parse as an operator in factor position.
            Self::Not { child } if matches!(**child, Self::Not { .. }) => {
                format!("NOT ({})", child.to_query_string())
            }
            Self::Not { child } => format!("NOT {}", child.to_query_string()),
        }
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
