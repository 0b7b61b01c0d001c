// src/lib.rs
//! Runtime interface conformance for dynamically typed script classes.
//!
//! Scripts declare the interfaces they implement in a `const implements`
//! list; the [`Engine`](engine::Engine) answers whether a runtime value
//! implements a set of interfaces, optionally checking that every event,
//! method and field an interface declares is present.

pub mod cli;
pub mod commands;
pub mod config;
pub mod definitions;
pub mod engine;
pub mod errors;
pub mod identity;
pub mod loader;
pub mod scan;
pub mod script;
pub mod util;

pub use config::Config;
pub use definitions::DefinitionBuilder;
pub use engine::{CheckOptions, Engine, EngineStats, Object, OnMissingMember, Value};
pub use errors::{ConfigError, EngineError, LoadError};
pub use identity::{DefinitionId, MemberKind};
