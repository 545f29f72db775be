//! Boolean query detection.
//!
//! Callers use this to decide whether a query needs the parser at all or can
//! be answered with a plain case-insensitive substring test.

use crate::lexer::Token;

/// Returns true if `query` uses boolean syntax.
///
/// That is: a whitespace-delimited `AND`, `OR` or `NOT` in any case, a
/// whitespace-delimited `&&` or `||`, any parenthesis or double quote, or a
/// leading `!`. A `!` anywhere else is ordinary text.
pub fn is_boolean_query(query: &str) -> bool {
    if query.contains(['(', ')', '"']) {
        return true;
    }

    if query.trim_start().starts_with('!') {
        return true;
    }

    query
        .split_whitespace()
        .any(|word| word != "!" && Token::operator(word).is_some())
}
