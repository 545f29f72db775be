//! Configuration system for boolq.
//!
//! boolq uses TOML configuration files named `.boolq.toml`. [`config_sources`] lists
//! the files that apply in a directory, closest first and `~/.boolq.toml` last, and
//! [`Config::load`] merges them.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
mod validate;

use std::path::{Path, PathBuf};

use boolq_query::MatchMode;
pub use discovery::{CONFIG_FILENAME, ConfigSource, Scope, config_sources, global_config_path};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawFilterSettings, RawSearchSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default field separator for field selection.
pub const DEFAULT_DELIMITER: &str = "\t";

/// Top-level merged configuration for boolq.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Query interpretation settings.
    pub search: SearchSettings,
    /// Line filtering settings.
    pub filter: FilterSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads and merges every config file that applies in `cwd`.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let files: Vec<PathBuf> = config_sources(cwd)
            .into_iter()
            .map(|source| source.path)
            .collect();
        Self::load_from_files(&files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            search: &self.search,
            filter: &self.filter,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Query interpretation settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// How queries are interpreted.
    pub mode: MatchMode,
}

/// Line filtering settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Field separator used when selecting fields.
    pub delimiter: String,
    /// 1-based fields joined with a space to form the searchable text; empty means whole line.
    pub fields: Vec<usize>,
    /// Print lines that do not match instead.
    pub invert: bool,
    /// Refuse queries with unbalanced parentheses or quotes.
    pub strict: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            fields: Vec::new(),
            invert: false,
            strict: false,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Query interpretation settings.
    search: &'a SearchSettings,
    /// Line filtering settings.
    filter: &'a FilterSettings,
}
