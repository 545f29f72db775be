//! Implementation of `boolq explain`.

use std::process::ExitCode;

use boolq_query::{MatchMode, Matcher, QueryExpr, Token, tokenize};
use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;

use crate::cli::{
    args::ExplainCommand,
    context::CommandContext,
    lint::{QueryWarning, lint_query},
    output::{dim, header, indent, print_json, subheader, warning},
};

/// JSON form of a token.
#[derive(Serialize)]
struct JsonToken {
    /// Token category.
    kind: &'static str,
    /// Token text as it would be written in a query.
    text: String,
}

/// JSON output for `boolq explain --json`.
#[derive(Serialize)]
struct JsonExplain<'a> {
    /// The query as given.
    query: &'a str,
    /// Mode requested by flag or configuration.
    requested_mode: MatchMode,
    /// Whether the query is evaluated as a boolean expression.
    boolean: bool,
    /// Token stream, in boolean mode.
    tokens: Option<Vec<JsonToken>>,
    /// Parsed tree, in boolean mode.
    tree: Option<&'a QueryExpr>,
    /// Fully parenthesized equivalent query, in boolean mode.
    normalized: Option<String>,
    /// Lowercased substring, in plain mode.
    needle: Option<&'a str>,
    /// Structural warnings.
    warnings: &'a [QueryWarning],
}

/// Explains how a query is read.
pub fn run(ctx: &CommandContext, cmd: &ExplainCommand) -> ExitCode {
    let requested = cmd.mode.unwrap_or(ctx.config.search.mode);
    let matcher = Matcher::new(&cmd.query, requested);
    let warnings = if matcher.is_boolean() {
        lint_query(&cmd.query)
    } else {
        Vec::new()
    };

    if cmd.json {
        let tokens = matcher
            .is_boolean()
            .then(|| tokenize(&cmd.query).iter().map(json_token).collect());
        let output = JsonExplain {
            query: &cmd.query,
            requested_mode: requested,
            boolean: matcher.is_boolean(),
            tokens,
            tree: matcher.expr(),
            normalized: matcher.expr().map(QueryExpr::to_query_string),
            needle: match &matcher {
                Matcher::Plain(needle) => Some(needle.as_str()),
                Matcher::Boolean(_) => None,
            },
            warnings: &warnings,
        };
        return match print_json(&output) {
            Ok(()) => ExitCode::SUCCESS,
            Err(code) => code,
        };
    }

    print_explanation(&cmd.query, requested, &matcher, &warnings);
    ExitCode::SUCCESS
}

/// Prints the human-readable explanation.
fn print_explanation(
    query: &str,
    requested: MatchMode,
    matcher: &Matcher,
    warnings: &[QueryWarning],
) {
    println!("{}", header("Query"));
    println!("  {query}");
    println!();

    let mode = if matcher.is_boolean() {
        "boolean"
    } else {
        "plain"
    };
    println!(
        "{} {mode} {}",
        subheader("Mode:"),
        dim(&format!("(requested: {requested})"))
    );
    println!();

    match matcher {
        Matcher::Boolean(expr) => print_boolean(query, expr),
        Matcher::Plain(needle) => {
            println!("{}", subheader("Substring:"));
            if needle.is_empty() {
                println!("  {}", dim("(empty, matches everything)"));
            } else {
                println!("  {needle:?}");
            }
        }
    }

    if !warnings.is_empty() {
        println!();
        println!("{}", subheader("Warnings:"));
        for w in warnings {
            println!("  - {}", warning(&w.to_string()));
        }
    }
}

/// Prints the token table, tree, and normalized form of a boolean query.
fn print_boolean(query: &str, expr: &QueryExpr) {
    println!("{}", subheader("Tokens:"));
    let tokens = tokenize(query);
    if tokens.is_empty() {
        println!("  {}", dim("(none)"));
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["#", "Kind", "Token"]);
        for (i, token) in tokens.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(token_kind(token)),
                Cell::new(token.to_string()),
            ]);
        }
        println!("{table}");
    }
    println!();

    println!("{}", subheader("Tree:"));
    println!("{}", indent(&expr.to_string()));
    println!();

    println!("{}", subheader("Normalized:"));
    println!("  {}", expr.to_query_string());
}

/// Returns the category name for a token.
fn token_kind(token: &Token) -> &'static str {
    match token {
        Token::And | Token::Or | Token::Not => "operator",
        Token::LParen => "group open",
        Token::RParen => "group close",
        Token::Phrase(_) => "phrase",
        Token::Word(_) => "word",
    }
}

/// Converts a token for JSON output.
fn json_token(token: &Token) -> JsonToken {
    JsonToken {
        kind: token_kind(token),
        text: token.to_string(),
    }
}
