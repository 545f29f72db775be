//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules.

use std::path::PathBuf;

use crate::{
    Config, FilterSettings, SearchSettings,
    parse::{RawConfig, RawFilterSettings, RawSearchSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every setting, the first defined value wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut search = SearchSettings::default();
    let mut filter = FilterSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.search {
            apply_raw_search(&mut search, raw);
        }
        if let Some(ref raw) = parsed.config.filter {
            apply_raw_filter(&mut filter, raw);
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(PathBuf::from);

    Config {
        search,
        filter,
        config_root,
    }
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(mode) = raw.mode {
        result.mode = mode;
    }
}

/// Applies raw filter settings to result.
fn apply_raw_filter(result: &mut FilterSettings, raw: &RawFilterSettings) {
    if let Some(ref v) = raw.delimiter {
        result.delimiter = v.clone();
    }
    if let Some(ref v) = raw.fields {
        result.fields = v.clone();
    }
    if let Some(v) = raw.invert {
        result.invert = v;
    }
    if let Some(v) = raw.strict {
        result.strict = v;
    }
}
