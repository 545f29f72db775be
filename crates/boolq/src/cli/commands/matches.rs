//! Implementation of `boolq match`.

use std::process::ExitCode;

use serde::Serialize;

use super::shared::{QuerySettings, prepare_matcher};
use crate::cli::{
    args::MatchCommand,
    context::CommandContext,
    output::{dim, print_json, success},
};

/// JSON verdict for one text.
#[derive(Serialize)]
struct JsonVerdict<'a> {
    /// The text tested.
    text: &'a str,
    /// Whether the query matched it.
    matched: bool,
}

/// Tests each text against the query.
///
/// Succeeds only when every text matched.
pub fn run(ctx: &CommandContext, cmd: &MatchCommand) -> ExitCode {
    let settings = QuerySettings::resolve(&ctx.config, &cmd.query_args);
    let matcher = match prepare_matcher(&cmd.query, settings) {
        Ok(matcher) => matcher,
        Err(code) => return code,
    };

    let verdicts: Vec<JsonVerdict<'_>> = cmd
        .texts
        .iter()
        .map(|text| JsonVerdict {
            text,
            matched: matcher.matches(text),
        })
        .collect();

    if cmd.json {
        if let Err(code) = print_json(&verdicts) {
            return code;
        }
    } else {
        for verdict in &verdicts {
            let label = if verdict.matched {
                success("match")
            } else {
                dim("no match")
            };
            println!("{label}: {}", verdict.text);
        }
    }

    if verdicts.iter().all(|v| v.matched) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
