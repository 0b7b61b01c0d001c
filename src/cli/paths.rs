// src/cli/paths.rs
//
// Path expansion for CLI arguments.

use std::path::{Path, PathBuf};

use glob::glob;
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Errors that can occur during path expansion
#[derive(Debug, Error)]
pub enum PathError {
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Expand path patterns into script files with the given extension.
///
/// Each pattern can be:
/// - A direct file path (e.g., "potion.gd")
/// - A directory (expands to `**/*.<extension>` recursively)
/// - A glob pattern (e.g., "items/**/*.gd")
///
/// Explicit files keep their input order and come first; glob and
/// directory matches follow in glob order. The same file reached twice
/// (by any spelling) is listed once. An empty result is not an error.
pub fn expand_paths(patterns: &[String], extension: &str) -> Result<Vec<PathBuf>, PathError> {
    let extension = extension.trim_start_matches('.');
    let mut explicit_files = Vec::new();
    let mut glob_files = Vec::new();
    let mut seen = FxHashSet::default();

    for pattern in patterns {
        let path = PathBuf::from(pattern);
        if path.is_file() {
            // Non-script files named explicitly are skipped silently
            if has_extension(&path, extension) {
                add_unique(path, &mut explicit_files, &mut seen);
            }
        } else if path.is_dir() {
            let dir_pattern = format!("{}/**/*.{}", pattern.trim_end_matches('/'), extension);
            expand_glob(&dir_pattern, extension, &mut glob_files, &mut seen)?;
        } else {
            expand_glob(pattern, extension, &mut glob_files, &mut seen)?;
        }
    }

    explicit_files.extend(glob_files);
    Ok(explicit_files)
}

fn expand_glob(
    pattern: &str,
    extension: &str,
    files: &mut Vec<PathBuf>,
    seen: &mut FxHashSet<PathBuf>,
) -> Result<(), PathError> {
    let entries = glob(pattern).map_err(|e| PathError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    for entry in entries {
        let path = entry.map_err(|e| PathError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() && has_extension(&path, extension) {
            add_unique(path, files, seen);
        }
    }
    Ok(())
}

/// Add a path if not already seen (canonical path decides)
fn add_unique(path: PathBuf, files: &mut Vec<PathBuf>, seen: &mut FxHashSet<PathBuf>) {
    let key = path.canonicalize().unwrap_or_else(|_| path.clone());
    if seen.insert(key) {
        files.push(path);
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}
