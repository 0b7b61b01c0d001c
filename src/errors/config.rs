// src/errors/config.rs
//! Configuration errors (E3xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("could not read config '{}'", path.display())]
    #[diagnostic(code(E3001))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}'", path.display())]
    #[diagnostic(code(E3002), help(
        "valid keys: runtime_validation, strict_validation, allow_string_classes, validate_dirs, script_extension, recursive"
    ))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
