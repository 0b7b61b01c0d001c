// src/errors/load.rs
//! Script loading errors (E2xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum LoadError {
    #[error("could not read '{}'", path.display())]
    #[diagnostic(code(E2001))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("resource path '{path}' escapes the project root")]
    #[diagnostic(code(E2002), help("resource paths are resolved relative to the project root"))]
    OutsideProject { path: String },

    #[error("invalid entry '{entry}' in the implements list of {key}")]
    #[diagnostic(
        code(E2003),
        help("use preload(\"res://...\") for direct references or a quoted class name")
    )]
    InvalidImplementsEntry {
        key: String,
        entry: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a script reference or a quoted name")]
        span: SourceSpan,
    },

    #[error("unterminated implements list in {key}")]
    #[diagnostic(code(E2004), help("add a closing ']' to the implements constant"))]
    UnterminatedImplements {
        key: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("list starts here")]
        span: SourceSpan,
    },
}
