//! Boolean query parsing and matching for short text records.
//!
//! The query language is deliberately forgiving:
//!
//! - **Terms**: `shell` - case-insensitive substring match
//! - **Phrases**: `"shell plc"` - whole-word phrase match
//! - **AND**: `shell AND bp`, `shell && bp`, or just `shell bp`
//! - **OR**: `shell OR bp`, `shell || bp`
//! - **NOT**: `NOT gas`, `! gas`, or `shell NOT gas` (meaning `shell AND NOT gas`)
//! - **Grouping**: `(shell OR bp) AND energy`
//!
//! Operators all bind at the same level and associate to the left, so
//! `a AND b OR c` is `(a AND b) OR c`. Malformed input never fails: unmatched
//! parentheses, unclosed quotes and stray operators degrade to the closest
//! sensible tree.
//!
//! # Example
//!
//! ```
//! use boolq_query::{boolean_match, parse_boolean_query};
//!
//! assert!(boolean_match("(shell OR bp) AND energy", "BP Energy"));
//!
//! let expr = parse_boolean_query("shell NOT gas");
//! assert!(expr.evaluate("Shell Energy"));
//! assert!(!expr.evaluate("Shell Gas Trading"));
//! ```

#![warn(missing_docs)]

mod ast;
mod classify;
mod error;
mod eval;
mod filter;
mod lexer;
mod matcher;
mod parser;

pub use ast::{PhrasePattern, QueryExpr};
pub use classify::is_boolean_query;
pub use error::ModeError;
pub use eval::boolean_match;
pub use filter::{filter_by_boolean_query, filter_by_boolean_query_display};
pub use lexer::{Token, tokenize};
pub use matcher::{MatchMode, Matcher};
pub use parser::{parse_boolean_query, parse_tokens};
