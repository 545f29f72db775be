//! Command implementations and dispatch.

pub mod config;
pub mod explain;
pub mod filter;
pub mod init;
pub mod matches;
mod shared;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Filter(cmd) => filter::run(ctx, &cmd),
        Commands::Match(cmd) => matches::run(ctx, &cmd),
        Commands::Explain(cmd) => explain::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
    }
}
