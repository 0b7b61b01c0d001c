// src/errors/engine.rs
//! Engine errors (E1xxx).
//!
//! These are the "halts": configuration mistakes and, when fatal escalation
//! is requested, incomplete interface implementations. An undeclared
//! interface is never one of these; it is a plain `false`.

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::Diagnostic;
use thiserror::Error;

use crate::errors::LoadError;
use crate::identity::{DefinitionId, MemberKind};

#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    #[error("cannot resolve {value} to a script definition")]
    #[diagnostic(
        code(E1001),
        help("only script definitions and objects with a script carry interface declarations")
    )]
    UnresolvableEntity { value: String },

    #[error(
        "{implementer} declares the interface \"{name}\" by name, but string class names are disabled"
    )]
    #[diagnostic(
        code(E1002),
        help("set `allow_string_classes = true` in interfaced.toml, or use preload(\"res://...\")")
    )]
    StringResolutionDisabled { implementer: String, name: String },

    #[error("{implementer} declares the unknown interface \"{name}\"")]
    #[diagnostic(
        code(E1003),
        help(
            "interfaces referenced by name need a class_name and a `# @interface` marker under one of validate_dirs"
        )
    )]
    UnknownInterfaceName { implementer: String, name: String },

    #[error("{implementer} does not implement the {kind} '{name}' on the interface {interface}")]
    #[diagnostic(code(E1004))]
    MissingMember {
        implementer: String,
        kind: MemberKind,
        name: String,
        interface: String,
    },

    #[error("{implementer} has no source and cannot implement the interface {interface}")]
    #[diagnostic(code(E1005))]
    MissingSource {
        implementer: String,
        interface: String,
    },

    #[error("{referrer} refers to definition {id}, which is not registered with this engine")]
    #[diagnostic(
        code(E1006),
        help("definition ids are only valid on the engine that issued them")
    )]
    UnregisteredDefinition { referrer: String, id: DefinitionId },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),
}

impl EngineError {
    /// True for errors caused by project setup rather than by an
    /// incomplete implementation.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::StringResolutionDisabled { .. }
                | EngineError::UnknownInterfaceName { .. }
                | EngineError::UnregisteredDefinition { .. }
                | EngineError::Load(_)
        )
    }
}
