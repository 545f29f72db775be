//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The field delimiter is empty, so field selection cannot split lines.
    EmptyDelimiter,
    /// Fields are numbered from 1; a 0 never selects anything.
    ZeroFieldIndex,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDelimiter => write!(f, "filter.delimiter is empty"),
            Self::ZeroFieldIndex => {
                write!(f, "filter.fields contains 0 (fields are numbered from 1)")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.filter.delimiter.is_empty() {
        warnings.push(ConfigWarning::EmptyDelimiter);
    }

    if config.filter.fields.contains(&0) {
        warnings.push(ConfigWarning::ZeroFieldIndex);
    }

    warnings
}
