//! Implementation of `boolq config`.

use std::process::ExitCode;

use boolq_config::config_sources;

use crate::cli::{context::CommandContext, output::warning};

/// Shows effective configuration settings.
///
/// Validation warnings go to stderr so stdout stays loadable TOML.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    let sources = config_sources(&ctx.cwd);
    if sources.is_empty() {
        println!("# defaults (no configuration files found)");
    } else {
        println!("# config files (highest precedence first):");
        for source in &sources {
            println!("#   {} ({})", source.path.display(), source.scope);
        }
    }

    match config.settings_to_toml() {
        Ok(toml) => print!("{toml}"),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    }

    for w in config.validate() {
        eprintln!("{}", warning(&format!("warning: {w}")));
    }

    ExitCode::SUCCESS
}
