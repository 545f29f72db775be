//! Command-line interface for `boolq`.

mod cli;

use std::process::ExitCode;

use env_logger::{Builder, Env};

use crate::cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands,
};

/// Log filter applied by `--verbose` when `RUST_LOG` is unset.
const VERBOSE_FILTER: &str = "warn,boolq=debug,boolq_query=debug,boolq_config=debug";

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(cli.verbose);

    // init must work even when an existing config file is broken.
    let ctx = match &cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}

/// Installs the logger, honouring `RUST_LOG` when set.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { VERBOSE_FILTER } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
