// src/definitions/mod.rs
//! Script definitions and the registry that owns them.

pub mod entity_defs;
pub mod registry;

pub use entity_defs::{DeclaredInterface, Definition, DefinitionBuilder, MemberSet, ScriptRef};
pub use registry::DefinitionRegistry;
