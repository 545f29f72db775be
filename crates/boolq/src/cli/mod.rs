//! CLI support for the `boolq` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod lint;
pub mod output;

pub use context::CommandContext;
