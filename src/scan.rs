// src/scan.rs
//! Discovery of script files under configured roots.
//!
//! Directory listing goes through the `Filesystem` trait so hosts (and
//! tests) can supply their own tree. An unreadable root is logged and
//! contributes nothing; the other roots are still scanned.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Directory listing capability
pub trait Filesystem {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;
}

/// `Filesystem` backed by the real OS filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        Ok(entries)
    }
}

/// Lists script files below a root
pub struct Scanner<'a> {
    fs: &'a dyn Filesystem,
    extension: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(fs: &'a dyn Filesystem, extension: &'a str) -> Self {
        Self { fs, extension }
    }

    /// Script paths under `root`, sorted within each directory.
    ///
    /// Never fails: an unreadable root or sub-directory is reported through
    /// `tracing` and skipped.
    pub fn scan(&self, root: &Path, recursive: bool) -> Vec<PathBuf> {
        let mut found = Vec::new();
        self.scan_dir(root, recursive, &mut found);
        found
    }

    /// Scan several roots in order, concatenating the results.
    pub fn scan_all(&self, roots: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
        let mut found = Vec::new();
        for root in roots {
            self.scan_dir(root, recursive, &mut found);
        }
        found
    }

    fn scan_dir(&self, dir: &Path, recursive: bool, found: &mut Vec<PathBuf>) {
        let mut entries = match self.fs.list_dir(dir) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!(path = %dir.display(), %error, "cannot scan directory, skipping");
                return;
            }
        };
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        for entry in entries {
            if entry.name == "." || entry.name == ".." {
                continue;
            }
            let path = dir.join(&entry.name);
            if entry.is_dir {
                if recursive {
                    self.scan_dir(&path, recursive, found);
                }
            } else if has_extension(&entry.name, self.extension) {
                found.push(path);
            }
        }
    }
}

fn has_extension(name: &str, extension: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext == extension.trim_start_matches('.'))
}
