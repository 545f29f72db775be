//! Error types for query configuration.
//!
//! Parsing and evaluation cannot fail; the only fallible input is a mode name.

use thiserror::Error;

/// Errors from parsing a [`MatchMode`](crate::MatchMode) name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    /// The name is not one of the known modes.
    #[error("unknown match mode '{0}' (expected auto, boolean, or plain)")]
    Unknown(String),
}
