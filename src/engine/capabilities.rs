// src/engine/capabilities.rs
//! Declared interface lists.
//!
//! Resolves a definition's `implements` entries to interface definitions:
//! direct references as-is, script paths through the loader, class names
//! through the name registry. Results are cached per definition.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::definitions::{DeclaredInterface, ScriptRef};
use crate::engine::Engine;
use crate::errors::EngineError;
use crate::identity::DefinitionId;

#[derive(Debug, Default)]
pub(crate) struct CapabilityCache {
    entries: FxHashMap<DefinitionId, Rc<[DefinitionId]>>,
}

impl CapabilityCache {
    fn get(&self, def: DefinitionId) -> Option<Rc<[DefinitionId]>> {
        self.entries.get(&def).cloned()
    }

    fn insert(&mut self, def: DefinitionId, interfaces: Rc<[DefinitionId]>) {
        self.entries.insert(def, interfaces);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Engine {
    /// Interfaces `def` declares, in declaration order without duplicates.
    ///
    /// A class name in the list is a configuration error when string class
    /// names are disabled, and so is a name nobody registered. Neither is a
    /// conformance failure: both halt whatever the validation mode.
    pub fn declared_interfaces(
        &mut self,
        def: DefinitionId,
    ) -> Result<Rc<[DefinitionId]>, EngineError> {
        if let Some(hit) = self.capabilities.get(def) {
            return Ok(hit);
        }
        self.registered(def, None)?;

        let entries = self.definitions.get(def).implements.clone();
        let mut resolved = Vec::with_capacity(entries.len());
        for entry in &entries {
            let interface = match entry {
                DeclaredInterface::Reference(ScriptRef::Definition(id)) => {
                    self.registered(*id, Some(def))?
                }
                DeclaredInterface::Reference(ScriptRef::Path(path)) => {
                    self.loader.load_resource(&mut self.definitions, path)?
                }
                DeclaredInterface::Name(name) => self.resolve_interface_name(def, name)?,
            };
            if !resolved.contains(&interface) {
                resolved.push(interface);
            }
        }
        tracing::debug!(%def, interfaces = resolved.len(), "resolved declared interfaces");

        let resolved: Rc<[DefinitionId]> = resolved.into();
        self.capabilities.insert(def, Rc::clone(&resolved));
        Ok(resolved)
    }

    fn resolve_interface_name(
        &mut self,
        def: DefinitionId,
        name: &str,
    ) -> Result<DefinitionId, EngineError> {
        if !self.config.allow_string_classes {
            return Err(EngineError::StringResolutionDisabled {
                implementer: self.display_name(def, false),
                name: name.to_string(),
            });
        }
        let found = self.name_registry()?.get(name);
        match found {
            Some(id) => Ok(id),
            None => Err(EngineError::UnknownInterfaceName {
                implementer: self.display_name(def, false),
                name: name.to_string(),
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
    fn direct_references_keep_order_and_drop_duplicates() {
        let mut engine = engine();
        let a = engine.define(DefinitionBuilder::new("res://a.gd"));
        let b = engine.define(DefinitionBuilder::new("res://b.gd"));
        let def = engine.define(
            DefinitionBuilder::new("res://x.gd")
                .implements(b)
                .implements(a)
                .implements(b),
        );

        assert_eq!(&*engine.declared_interfaces(def).unwrap(), &[b, a]);
    }

    #[test]
    fn result_is_cached() {
        let mut engine = engine();
        let a = engine.define(DefinitionBuilder::new("res://a.gd"));
        let def = engine.define(DefinitionBuilder::new("res://x.gd").implements(a));

        let first = engine.declared_interfaces(def).unwrap();
        let second = engine.declared_interfaces(def).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(engine.stats().capability_entries, 1);
    }

    #[test]
    fn no_declaration_is_an_empty_list() {
        let mut engine = engine();
        let rock = engine.define(DefinitionBuilder::new("res://rock.gd"));
        assert!(engine.declared_interfaces(rock).unwrap().is_empty());
    }

    #[test]
    fn names_fail_when_string_classes_are_disabled() {
        let mut engine = engine();
        let rock = engine.define(
            DefinitionBuilder::new("res://rock.gd")
                .public_name("Rock")
                .implements_name("CanHeal"),
        );

        let err = engine.declared_interfaces(rock).unwrap_err();
        assert!(matches!(
            &err,
            EngineError::StringResolutionDisabled { implementer, name }
                if implementer == "Rock" && name == "CanHeal"
        ));
        assert_eq!(engine.stats().capability_entries, 0);
    }

    #[test]
    fn foreign_interface_id_is_an_error() {
        let mut engine = engine();
        let potion = engine.define(
            DefinitionBuilder::new("res://potion.gd")
                .public_name("Potion")
                .implements(DefinitionId::new(42))
                .method("heal"),
        );

        let err = engine.declared_interfaces(potion).unwrap_err();
        assert!(
            matches!(err, EngineError::UnregisteredDefinition { ref referrer, id } if referrer == "Potion" && id == DefinitionId::new(42)),
            "{err:?}"
        );
        assert!(err.is_configuration_error());
    }
}
