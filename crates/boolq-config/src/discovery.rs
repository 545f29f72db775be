//! Where configuration comes from.
//!
//! Sources are listed highest precedence first:
//!
//! 1. `.boolq.toml` in the working directory, then in each parent up to the
//!    filesystem root.
//! 2. `~/.boolq.toml`, the global file.
//!
//! A file with `root = true` ends the list. Nothing above it is read, and that
//! includes the global file. When the walk itself passes through the home
//! directory, the global file is listed once, at the position the walk found it.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use log::debug;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".boolq.toml";

/// Whether a config file belongs to a directory tree or to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Found by walking up from the working directory.
    Local,
    /// `~/.boolq.toml`.
    Global,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Global => write!(f, "global"),
        }
    }
}

/// One config file that takes part in resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// Path to the file.
    pub path: PathBuf,
    /// Where the file sits relative to the user.
    pub scope: Scope,
}

/// Lists the config files that apply in `cwd`, highest precedence first.
pub fn config_sources(cwd: &Path) -> Vec<ConfigSource> {
    sources_from(cwd, global_config_path().as_deref())
}

/// Returns the path to the global configuration file (`~/.boolq.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// The precedence walk, with the global file location passed in.
fn sources_from(cwd: &Path, global: Option<&Path>) -> Vec<ConfigSource> {
    let scope_of = |path: &Path| {
        if global == Some(path) {
            Scope::Global
        } else {
            Scope::Local
        }
    };

    let mut sources = Vec::new();
    for dir in cwd.ancestors() {
        let path = dir.join(CONFIG_FILENAME);
        if !path.is_file() {
            continue;
        }
        let is_root = is_root_config(&path);
        sources.push(ConfigSource {
            scope: scope_of(&path),
            path,
        });
        if is_root {
            debug!("config search stopped at root file in {}", dir.display());
            return sources;
        }
    }

    if let Some(global) = global
        && global.is_file()
        && !sources.iter().any(|s| s.path == global)
    {
        sources.push(ConfigSource {
            path: global.to_path_buf(),
            scope: Scope::Global,
        });
    }

    sources
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// A scratch tree with a `work/` area and a separate `home/`.
    struct ConfigTree {
        /// Removed on drop.
        dir: TempDir,
    }

    impl ConfigTree {
        /// Creates an empty tree.
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
            }
        }

        /// Creates `rel` under the tree and returns it.
        fn dir(&self, rel: &str) -> PathBuf {
            let path = self.dir.path().join(rel);
            fs::create_dir_all(&path).unwrap();
            path
        }

        /// Writes a config file in `rel` and returns its path.
        fn config(&self, rel: &str, contents: &str) -> PathBuf {
            let path = self.dir(rel).join(CONFIG_FILENAME);
            fs::write(&path, contents).unwrap();
            path
        }

        /// Where the global file lives in this tree.
        fn global(&self) -> PathBuf {
            self.dir("home").join(CONFIG_FILENAME)
        }

        /// Runs the walk from `rel` with this tree's home.
        fn sources(&self, rel: &str) -> Vec<ConfigSource> {
            sources_from(&self.dir(rel), Some(&self.global()))
        }
    }

    /// A source found by the walk.
    fn local(path: PathBuf) -> ConfigSource {
        ConfigSource {
            path,
            scope: Scope::Local,
        }
    }

    /// The user's own file.
    fn global(path: PathBuf) -> ConfigSource {
        ConfigSource {
            path,
            scope: Scope::Global,
        }
    }

    #[test]
    fn nothing_to_find() {
        let tree = ConfigTree::new();
        assert!(tree.sources("work/a/b").is_empty());
    }

    #[test]
    fn closest_file_comes_first() {
        let tree = ConfigTree::new();
        let outer = tree.config("work", "");
        let inner = tree.config("work/a/b", "");

        assert_eq!(
            tree.sources("work/a/b/c"),
            vec![local(inner), local(outer)]
        );
    }

    #[test]
    fn global_file_comes_last() {
        let tree = ConfigTree::new();
        let project = tree.config("work", "");
        let home = tree.config("home", "");

        assert_eq!(tree.sources("work/a"), vec![local(project), global(home)]);
    }

    #[test]
    fn root_file_stops_walk_and_skips_global() {
        let tree = ConfigTree::new();
        tree.config("work", "");
        tree.config("home", "");
        let root = tree.config("work/project", "root = true\n");
        let leaf = tree.config("work/project/sub", "");

        assert_eq!(
            tree.sources("work/project/sub"),
            vec![local(leaf), local(root)]
        );
    }

    #[test]
    fn global_file_found_by_walk_is_listed_once() {
        let tree = ConfigTree::new();
        let home = tree.config("home", "");
        let project = tree.config("home/project", "");

        assert_eq!(
            tree.sources("home/project"),
            vec![local(project), global(home)]
        );
    }

    #[test]
    fn no_home_directory() {
        let tree = ConfigTree::new();
        let project = tree.config("work", "");

        assert_eq!(sources_from(&tree.dir("work"), None), vec![local(project)]);
    }

    #[test]
    fn directories_named_like_config_are_skipped() {
        let tree = ConfigTree::new();
        tree.dir(&format!("work/{CONFIG_FILENAME}"));

        assert!(tree.sources("work").is_empty());
    }

    #[test]
    fn global_config_path_ends_with_filename() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with(CONFIG_FILENAME));
        }
    }

    #[test]
    fn scope_display() {
        assert_eq!(Scope::Local.to_string(), "local");
        assert_eq!(Scope::Global.to_string(), "global");
    }
}
