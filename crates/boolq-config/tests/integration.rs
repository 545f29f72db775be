//! Integration tests for boolq-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use boolq_config::{CONFIG_FILENAME, Config, ConfigError, ConfigWarning};
use boolq_query::MatchMode;

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a config file in `rel_dir` and returns its path.
    fn create_config(&self, rel_dir: &str, content: &str) -> PathBuf {
        let dir = self.create_dir(rel_dir);
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_from_no_files_returns_default() {
    let config = Config::load_from_files(&[]).unwrap();

    assert!(config.config_root.is_none());
    assert_eq!(config.search.mode, MatchMode::Auto);
    assert_eq!(config.filter.delimiter, "\t");
}

#[test]
fn test_load_single_root_config() {
    let env = TestEnv::new();
    env.create_config(
        "",
        r#"
root = true

[search]
mode = "boolean"

[filter]
delimiter = ","
fields = [2, 4]
"#,
    );

    let config = Config::load(env.path()).unwrap();

    assert_eq!(config.search.mode, MatchMode::Boolean);
    assert_eq!(config.filter.delimiter, ",");
    assert_eq!(config.filter.fields, vec![2, 4]);
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
}

#[test]
fn test_nested_configs_merge_with_closest_winning() {
    let env = TestEnv::new();
    env.create_config(
        "",
        "root = true\n[search]\nmode = \"plain\"\n[filter]\nstrict = true\n",
    );
    env.create_config("project", "[search]\nmode = \"boolean\"\n");
    let cwd = env.create_dir("project/src");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.search.mode, MatchMode::Boolean);
    assert!(config.filter.strict);
    assert_eq!(config.config_root, Some(env.path().join("project")));
}

#[test]
fn test_invalid_toml_reports_path() {
    let env = TestEnv::new();
    let path = env.create_config("", "root = true\n[filter\n");

    let err = Config::load(env.path()).unwrap_err();

    match &err {
        ConfigError::ParseToml { path: err_path, .. } => assert_eq!(err_path, &path),
        other => panic!("expected ParseToml, got {other:?}"),
    }
    assert!(err.to_string().contains(CONFIG_FILENAME));
}

#[test]
fn test_missing_file_is_read_error() {
    let env = TestEnv::new();
    let missing = env.path().join(CONFIG_FILENAME);

    let err = Config::load_from_files(&[missing]).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn test_validation_warnings_from_loaded_config() {
    let env = TestEnv::new();
    env.create_config(
        "",
        "root = true\n[filter]\ndelimiter = \"\"\nfields = [0]\n",
    );

    let config = Config::load(env.path()).unwrap();

    assert_eq!(
        config.validate(),
        vec![ConfigWarning::EmptyDelimiter, ConfigWarning::ZeroFieldIndex]
    );
}

#[test]
fn test_effective_settings_round_trip() {
    let env = TestEnv::new();
    env.create_config(
        "",
        "root = true\n[search]\nmode = \"plain\"\n[filter]\ninvert = true\n",
    );

    let config = Config::load(env.path()).unwrap();
    let rendered = config.settings_to_toml().unwrap();

    let copy = env.create_config("copy", &format!("root = true\n{rendered}"));
    let reloaded = Config::load_from_files(&[copy]).unwrap();

    assert_eq!(reloaded.search.mode, MatchMode::Plain);
    assert!(reloaded.filter.invert);
}
