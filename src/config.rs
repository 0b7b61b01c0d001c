// src/config.rs
//! Project configuration.
//!
//! Read from `interfaced.toml` at the project root. Every key is optional;
//! omitted keys take the `Default` values below, so an absent file and an
//! empty file behave the same.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::ConfigError;

/// File name looked up at the project root.
pub const CONFIG_FILE: &str = "interfaced.toml";

/// Resource path prefix naming the project root.
pub const RESOURCE_PREFIX: &str = "res://";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// When false, `Engine::startup` validates every discovered implementer
    /// eagerly. When true, checks happen on first use and missing members
    /// are fatal by default.
    pub runtime_validation: bool,
    /// Default for the `validate` option of `implements`.
    pub strict_validation: bool,
    /// Enables the name registry so implements lists may use quoted class
    /// names. Building it scans every root, which is slow on big projects.
    pub allow_string_classes: bool,
    /// Roots scanned by the startup pass and the name registry.
    pub validate_dirs: Vec<String>,
    /// Extension of script source units, without the dot.
    pub script_extension: String,
    /// Descend into sub-directories of each root.
    pub recursive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime_validation: false,
            strict_validation: true,
            allow_string_classes: false,
            validate_dirs: vec![RESOURCE_PREFIX.to_string()],
            script_extension: "gd".to_string(),
            recursive: true,
        }
    }
}

impl Config {
    /// Load `interfaced.toml` from `project_root`, or defaults when absent.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let path = project_root.join(CONFIG_FILE);
        if !path.is_file() {
            tracing::debug!(root = %project_root.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Load an explicit config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Filesystem directories for `validate_dirs`, resolved against the
    /// project root.
    pub fn root_dirs(&self, project_root: &Path) -> Vec<PathBuf> {
        self.validate_dirs
            .iter()
            .map(|dir| resolve_dir(project_root, dir))
            .collect()
    }
}

/// Filesystem directory for one root as written in config or on the
/// command line.
pub fn resolve_dir(project_root: &Path, dir: &str) -> PathBuf {
    match dir.strip_prefix(RESOURCE_PREFIX) {
        Some(rest) => {
            let rest = rest.trim_start_matches('/');
            if rest.is_empty() {
                project_root.to_path_buf()
            } else {
                project_root.join(rest)
            }
        }
        None => {
            let path = PathBuf::from(dir);
            if path.is_absolute() {
                path
            } else {
                project_root.join(path)
            }
        }
    }
}
