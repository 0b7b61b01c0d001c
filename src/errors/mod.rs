// src/errors/mod.rs
//! Structured error reporting for interfaced.
//!
//! Error codes:
//! - E1xxx: engine errors (resolution, conformance)
//! - E2xxx: script loading errors
//! - E3xxx: configuration errors
//!
//! All enums derive miette's `Diagnostic` so the CLI can render them.

pub mod config;
pub mod engine;
pub mod load;
pub mod report;

pub use config::ConfigError;
pub use engine::EngineError;
pub use load::LoadError;
pub use report::{render_to_stderr, render_to_string, render_to_writer};
