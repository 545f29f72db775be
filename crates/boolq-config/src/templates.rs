//! Starter files for `boolq init`.
//!
//! A template is the default settings rendered as TOML with every line
//! commented out, so a fresh file changes nothing until a value is uncommented.

use crate::{Config, ConfigError};

/// Opening comment of a project config.
const LOCAL_HEADER: &str = "\
# boolq configuration
#
# Applies to this directory and below. Closer files override parent
# directories and ~/.boolq.toml.

";

/// Opening comment of the global config.
const GLOBAL_HEADER: &str = "\
# boolq global configuration (~/.boolq.toml)
#
# Defaults for every directory. Project .boolq.toml files override these.

";

/// Notes printed above each key.
const KEY_NOTES: &[(&str, &str)] = &[
    ("root", "Stop looking in parent directories and ~/.boolq.toml."),
    (
        "mode",
        "auto parses only queries with operators, parentheses or quotes.",
    ),
    ("delimiter", "Field separator used with `fields`."),
    ("fields", "1-based fields joined into the searchable text."),
    ("invert", "Print lines that do not match instead."),
    ("strict", "Refuse queries with unbalanced parentheses or quotes."),
];

/// Returns the project configuration template.
pub fn local_template() -> Result<String, ConfigError> {
    let settings = format!("root = false\n\n{}", default_settings()?);
    Ok(render(LOCAL_HEADER, &settings))
}

/// Returns the global configuration template.
pub fn global_template() -> Result<String, ConfigError> {
    Ok(render(GLOBAL_HEADER, &default_settings()?))
}

/// Renders the default settings as TOML.
fn default_settings() -> Result<String, ConfigError> {
    Config::default().settings_to_toml()
}

/// Prefixes `header` and comments out every line of `settings`.
fn render(header: &str, settings: &str) -> String {
    let mut out = String::from(header);
    for line in settings.lines() {
        if line.is_empty() {
            out.push('\n');
            continue;
        }
        if let Some(note) = note_for(line) {
            out.push_str("# ");
            out.push_str(note);
            out.push('\n');
        }
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Returns the note for a `key = value` line.
fn note_for(line: &str) -> Option<&'static str> {
    let (key, _) = line.split_once(" = ")?;
    KEY_NOTES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, note)| *note)
}
