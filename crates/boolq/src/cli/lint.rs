//! Structural checks on boolean queries.
//!
//! The parser accepts any input and recovers silently, so a typo like a missing
//! `)` changes what a query matches without any error. These checks surface
//! those cases as warnings; `--strict` turns them into failures.

use std::fmt;

use boolq_query::{Token, tokenize};
use serde::Serialize;

/// A structural problem in a boolean query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryWarning {
    /// Parentheses outside quotes do not pair up.
    UnbalancedParens {
        /// Number of `(` outside quotes.
        open: usize,
        /// Number of `)` outside quotes.
        close: usize,
    },
    /// A `"` is never closed; the rest of the query is one phrase.
    UnclosedQuote,
    /// An operator is missing an operand and matches as if it were empty.
    DanglingOperator,
}

impl fmt::Display for QueryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnbalancedParens { open, close } => write!(
                f,
                "unbalanced parentheses ({open} opening, {close} closing)"
            ),
            Self::UnclosedQuote => write!(f, "unclosed quote runs to the end of the query"),
            Self::DanglingOperator => write!(f, "operator without an operand"),
        }
    }
}

/// Returns the structural warnings for `query`, in a fixed order.
pub fn lint_query(query: &str) -> Vec<QueryWarning> {
    let mut warnings = Vec::new();

    let scan = scan_delimiters(query);
    if scan.open != scan.close || scan.closed_early {
        warnings.push(QueryWarning::UnbalancedParens {
            open: scan.open,
            close: scan.close,
        });
    }
    if scan.in_quote {
        warnings.push(QueryWarning::UnclosedQuote);
    }
    if has_dangling_operator(&tokenize(query)) {
        warnings.push(QueryWarning::DanglingOperator);
    }

    warnings
}

/// Delimiter counts from one pass over a query.
#[derive(Debug, Default)]
struct DelimiterScan {
    /// `(` seen outside quotes.
    open: usize,
    /// `)` seen outside quotes.
    close: usize,
    /// A `)` appeared with no open group to close.
    closed_early: bool,
    /// The query ended inside a quote.
    in_quote: bool,
}

/// Counts parentheses outside quotes and tracks quote state.
fn scan_delimiters(query: &str) -> DelimiterScan {
    let mut scan = DelimiterScan::default();

    for ch in query.chars() {
        match ch {
            '"' => scan.in_quote = !scan.in_quote,
            _ if scan.in_quote => {}
            '(' => scan.open += 1,
            ')' => {
                scan.close += 1;
                if scan.close > scan.open {
                    scan.closed_early = true;
                }
            }
            _ => {}
        }
    }

    scan
}

/// Returns true if some operator has nothing to apply to.
fn has_dangling_operator(tokens: &[Token]) -> bool {
    let mut prev: Option<&Token> = None;

    for token in tokens {
        let dangling = match (prev, token) {
            (None | Some(Token::LParen), Token::And | Token::Or) => true,
            (Some(Token::And | Token::Or), Token::And | Token::Or | Token::RParen) => true,
            (Some(Token::Not), Token::And | Token::Or | Token::Not | Token::RParen) => true,
            _ => false,
        };
        if dangling {
            return true;
        }
        prev = Some(token);
    }

    prev.is_some_and(Token::is_operator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_queries_are_clean() {
        for query in [
            "",
            "shell",
            "shell AND NOT gas",
            "(shell OR bp) AND (energy OR gas)",
            "\"big oil\" || energy",
            "NOT (a OR b)",
            "\"(unbalanced inside quotes\"",
            "()",
        ] {
            assert!(lint_query(query).is_empty(), "{query:?}");
        }
    }

    #[test]
    fn unbalanced_parens() {
        assert_eq!(
            lint_query("(shell OR bp"),
            vec![QueryWarning::UnbalancedParens { open: 1, close: 0 }]
        );
        assert_eq!(
            lint_query("shell)"),
            vec![QueryWarning::UnbalancedParens { open: 0, close: 1 }]
        );
    }

    #[test]
    fn close_before_open_is_unbalanced() {
        assert_eq!(
            lint_query(")shell("),
            vec![QueryWarning::UnbalancedParens { open: 1, close: 1 }]
        );
    }

    #[test]
    fn unclosed_quote() {
        assert_eq!(lint_query("\"big oil"), vec![QueryWarning::UnclosedQuote]);
    }

    #[test]
    fn dangling_operators() {
        for query in [
            "shell AND",
            "OR shell",
            "shell NOT",
            "shell AND OR gas",
            "(AND shell)",
            "(shell OR)",
            "a NOT NOT b",
            "NOT",
        ] {
            assert_eq!(
                lint_query(query),
                vec![QueryWarning::DanglingOperator],
                "{query:?}"
            );
        }
    }

    #[test]
    fn multiple_warnings_keep_order() {
        assert_eq!(
            lint_query("(shell AND \"gas"),
            vec![
                QueryWarning::UnbalancedParens { open: 1, close: 0 },
                QueryWarning::UnclosedQuote,
            ]
        );
    }

    #[test]
    fn warning_messages() {
        assert_eq!(
            QueryWarning::UnbalancedParens { open: 2, close: 1 }.to_string(),
            "unbalanced parentheses (2 opening, 1 closing)"
        );
        assert_eq!(
            QueryWarning::DanglingOperator.to_string(),
            "operator without an operand"
        );
    }
}
