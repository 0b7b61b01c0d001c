// src/engine/resolver.rs
//! Mapping runtime values to their owning definitions.

use std::fmt;

use crate::engine::Engine;
use crate::errors::EngineError;
use crate::identity::DefinitionId;

/// An object of the scripting environment
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// Native class name, e.g. "Node"
    pub class: String,
    /// Script attached to the object, if any
    pub script: Option<DefinitionId>,
}

impl Object {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            script: None,
        }
    }

    pub fn with_script(class: impl Into<String>, script: DefinitionId) -> Self {
        Self {
            class: class.into(),
            script: Some(script),
        }
    }
}

/// A runtime value handed to `implements`
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A script definition itself
    Definition(DefinitionId),
    /// An instance
    Object(Object),
}

impl Value {
    /// Instance of a script-backed object.
    pub fn instance(script: DefinitionId) -> Self {
        Value::Object(Object::with_script("Object", script))
    }
}

impl From<DefinitionId> for Value {
    fn from(id: DefinitionId) -> Self {
        Value::Definition(id)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "null"),
            Value::Bool(b) => write!(f, "bool {b}"),
            Value::Int(i) => write!(f, "int {i}"),
            Value::Float(x) => write!(f, "float {x}"),
            Value::Str(s) => write!(f, "string {s:?}"),
            Value::Definition(id) => write!(f, "definition {id}"),
            Value::Object(Object { class, script: None }) => write!(f, "{class} without a script"),
            Value::Object(Object {
                class,
                script: Some(id),
            }) => write!(f, "{class} with script {id}"),
        }
    }
}

impl Engine {
    /// The definition owning `value`: itself for a definition, its script
    /// for an object. Primitives and script-less objects fail.
    pub fn resolve(&self, value: &Value) -> Result<DefinitionId, EngineError> {
        let id = match value {
            Value::Definition(id) => Some(*id),
            Value::Object(object) => object.script,
            _ => None,
        };
        match id {
            Some(id) if self.definitions.contains(id) => Ok(id),
            _ => Err(EngineError::UnresolvableEntity {
                value: value.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::definitions::DefinitionBuilder;
    use std::path::Path;

    fn engine() -> Engine {
        Engine::new(Path::new("/project"), Config::default())
    }

    #[test]
    fn definition_resolves_to_itself() {
        let mut engine = engine();
        let id = engine.define(DefinitionBuilder::new("res://potion.gd"));
        assert_eq!(engine.resolve(&Value::Definition(id)).unwrap(), id);
    }

    #[test]
    fn instance_resolves_to_its_script() {
        let mut engine = engine();
        let id = engine.define(DefinitionBuilder::new("res://potion.gd"));
        assert_eq!(engine.resolve(&Value::instance(id)).unwrap(), id);
    }

    #[test]
    fn primitives_are_unresolvable() {
        let engine = engine();
        for value in [Value::Nil, Value::Int(3), Value::Str("x".into())] {
            assert!(matches!(
                engine.resolve(&value),
                Err(EngineError::UnresolvableEntity { .. })
            ));
        }
    }

    #[test]
    fn scriptless_object_and_foreign_id_are_unresolvable() {
        let engine = engine();
        let err = engine.resolve(&Object::new("Node").into()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot resolve Node without a script to a script definition"
        );
        assert!(engine.resolve(&Value::Definition(DefinitionId::new(9))).is_err());
    }
}
