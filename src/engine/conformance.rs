// src/engine/conformance.rs
//! Member-level conformance of one definition to one interface.
//!
//! Results are cached per (definition, interface) pair. A cached result is
//! returned as-is, even a cached `false` under `RaiseFatal`: only the call
//! that first found the gap escalates. Callers that need an error on every
//! failing call cannot rely on the cache for it.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::definitions::{MemberSet, ScriptRef};
use crate::engine::{Engine, OnMissingMember};
use crate::errors::EngineError;
use crate::identity::{DefinitionId, MemberKind};

#[derive(Debug, Default)]
pub(crate) struct ConformanceCache {
    entries: FxHashMap<(DefinitionId, DefinitionId), bool>,
}

impl ConformanceCache {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Why a definition fails an interface
#[derive(Debug, Clone, PartialEq, Eq)]
enum Gap {
    NoSource,
    Missing { kind: MemberKind, name: String },
}

impl Engine {
    /// Check that `def` exposes every member `interface` requires.
    ///
    /// On a gap, `ReturnFalse` yields `Ok(false)` and `RaiseFatal` an error
    /// naming both definitions. Either way `false` is cached first.
    pub fn conforms(
        &mut self,
        def: DefinitionId,
        interface: DefinitionId,
        on_failure: OnMissingMember,
    ) -> Result<bool, EngineError> {
        if let Some(&cached) = self.conformance.entries.get(&(def, interface)) {
            tracing::trace!(%def, %interface, cached, "conformance cache hit");
            return Ok(cached);
        }
        self.registered(def, None)?;
        self.registered(interface, None)?;

        let gap = self.find_gap(def, interface)?;
        self.conformance.entries.insert((def, interface), gap.is_none());

        let Some(gap) = gap else {
            return Ok(true);
        };
        tracing::debug!(%def, %interface, ?gap, "definition does not conform");
        match on_failure {
            OnMissingMember::ReturnFalse => Ok(false),
            OnMissingMember::RaiseFatal => Err(self.gap_error(def, interface, gap)),
        }
    }

    /// Cached conformance result for a pair, if computed.
    pub fn cached_conformance(&self, def: DefinitionId, interface: DefinitionId) -> Option<bool> {
        self.conformance.entries.get(&(def, interface)).copied()
    }

    fn find_gap(
        &mut self,
        def: DefinitionId,
        interface: DefinitionId,
    ) -> Result<Option<Gap>, EngineError> {
        // An interface without content requires nothing. This is decided
        // before looking at the implementer at all.
        if !self.definitions.get(interface).has_source() {
            return Ok(None);
        }
        let required = self.members_of(interface)?;
        if required.is_empty() {
            return Ok(None);
        }
        if !self.definitions.get(def).has_source() {
            return Ok(Some(Gap::NoSource));
        }

        self.stats.member_probes += 1;
        let provided = self.members_of(def)?;
        for kind in MemberKind::CHECK_ORDER {
            for name in required.names(kind) {
                if kind == MemberKind::Field && is_path_like(name) {
                    continue;
                }
                if !provided.contains(kind, name) {
                    return Ok(Some(Gap::Missing {
                        kind,
                        name: name.clone(),
                    }));
                }
            }
        }
        Ok(None)
    }

    fn gap_error(&mut self, def: DefinitionId, interface: DefinitionId, gap: Gap) -> EngineError {
        let implementer = self.display_name(def, false);
        let interface = self.display_name(interface, false);
        match gap {
            Gap::NoSource => EngineError::MissingSource {
                implementer,
                interface,
            },
            Gap::Missing { kind, name } => EngineError::MissingMember {
                implementer,
                kind,
                name,
                interface,
            },
        }
    }

    /// Members of `def` including those inherited from base scripts.
    pub fn members_of(&mut self, def: DefinitionId) -> Result<MemberSet, EngineError> {
        self.registered(def, None)?;
        let mut members = MemberSet::new();
        let mut seen = FxHashSet::default();
        let mut current = Some(def);
        while let Some(id) = current {
            if !seen.insert(id) {
                tracing::warn!(key = %self.definitions.get(id).key, "cyclic script inheritance");
                break;
            }
            members.merge(self.definitions.get(id).own_members());
            current = match self.definitions.get(id).base.clone() {
                Some(ScriptRef::Definition(base)) => Some(self.registered(base, Some(id))?),
                Some(ScriptRef::Path(path)) => {
                    Some(self.loader.load_resource(&mut self.definitions, &path)?)
                }
                None => None,
            };
        }
        Ok(members)
    }
}

/// Property entries that name a file or sub-path rather than a member, such
/// as the script's own category entry, are not real fields.
fn is_path_like(name: &str) -> bool {
    name.contains(['/', '\\', '.'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::definitions::DefinitionBuilder;
    use crate::engine::UNKNOWN_NAME;
    use std::path::Path;

    fn engine() -> Engine {
        Engine::new(Path::new("/project"), Config::default())
    }

    fn can_heal(engine: &mut Engine) -> DefinitionId {
        engine.define(
            DefinitionBuilder::new("res://can_heal.gd")
                .public_name("CanHeal")
                .method("heal")
                .event("healed"),
        )
    }

    #[test]
    fn superset_conforms() {
        let mut engine = engine();
        let iface = can_heal(&mut engine);
        let potion = engine.define(
            DefinitionBuilder::new("res://potion.gd")
                .method("heal")
                .method("drink")
                .event("healed"),
        );
        assert!(engine.conforms(potion, iface, OnMissingMember::RaiseFatal).unwrap());
    }

    #[test]
    fn events_are_checked_before_methods() {
        let mut engine = engine();
        let iface = can_heal(&mut engine);
        let empty = engine.define(
            DefinitionBuilder::new("res://empty.gd")
                .public_name("Empty")
                .field("x"),
        );

        let err = engine
            .conforms(empty, iface, OnMissingMember::RaiseFatal)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Empty does not implement the event 'healed' on the interface CanHeal"
        );
    }

    #[test]
    fn cached_false_does_not_raise_again() {
        let mut engine = engine();
        let iface = can_heal(&mut engine);
        let potion = engine.define(DefinitionBuilder::new("res://potion.gd").event("healed"));

        assert!(engine.conforms(potion, iface, OnMissingMember::RaiseFatal).is_err());
        assert_eq!(engine.cached_conformance(potion, iface), Some(false));
        assert!(!engine.conforms(potion, iface, OnMissingMember::RaiseFatal).unwrap());
    }

    #[test]
    fn placeholder_interface_is_vacuous() {
        let mut engine = engine();
        let placeholder = engine.define(DefinitionBuilder::new("res://marker.gd"));
        let anything = engine.define(DefinitionBuilder::new("res://anything.gd"));
        assert!(engine.conforms(anything, placeholder, OnMissingMember::RaiseFatal).unwrap());
        assert_eq!(engine.stats().member_probes, 0);
    }

    #[test]
    fn implementer_without_source_fails() {
        let mut engine = engine();
        let iface = can_heal(&mut engine);
        let ghost = engine.define(DefinitionBuilder::new("res://ghost.gd"));

        assert!(!engine.conforms(ghost, iface, OnMissingMember::ReturnFalse).unwrap());
        assert_eq!(engine.cached_conformance(ghost, iface), Some(false));

        let other = engine.define(DefinitionBuilder::new("res://other.gd"));
        let err = engine
            .conforms(other, iface, OnMissingMember::RaiseFatal)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown has no source and cannot implement the interface CanHeal"
        );
    }

    #[test]
    fn path_like_fields_are_skipped() {
        let mut engine = engine();
        let iface = engine.define(
            DefinitionBuilder::new("res://has_name.gd")
                .field("has_name.gd")
                .field("Group/sub")
                .field("name"),
        );
        let impl_ = engine.define(DefinitionBuilder::new("res://a.gd").field("name"));
        assert!(engine.conforms(impl_, iface, OnMissingMember::RaiseFatal).unwrap());
    }

    #[test]
    fn inherited_members_count() {
        let mut engine = engine();
        let iface = can_heal(&mut engine);
        let base = engine.define(DefinitionBuilder::new("res://item.gd").event("healed"));
        let potion = engine.define(
            DefinitionBuilder::new("res://potion.gd")
                .extends(base)
                .method("heal"),
        );
        assert!(engine.conforms(potion, iface, OnMissingMember::ReturnFalse).unwrap());
    }

    #[test]
    fn inheritance_cycles_terminate() {
        let mut engine = engine();
        let a = engine.define(
            DefinitionBuilder::new("res://a.gd")
                .base(Some(ScriptRef::Definition(DefinitionId::new(1))))
                .method("a"),
        );
        let b = engine.define(DefinitionBuilder::new("res://b.gd").extends(a).method("b"));
        assert_eq!(b, DefinitionId::new(1));

        let members = engine.members_of(a).unwrap();
        assert_eq!(members.methods, vec!["a", "b"]);
    }

    #[test]
    fn foreign_ids_are_errors_not_panics() {
        let mut engine = engine();
        let iface = can_heal(&mut engine);
        let orphan = engine.define(
            DefinitionBuilder::new("res://orphan.gd")
                .extends(DefinitionId::new(7))
                .method("heal"),
        );

        assert!(matches!(
            engine.conforms(DefinitionId::new(9), iface, OnMissingMember::ReturnFalse),
            Err(EngineError::UnregisteredDefinition { .. })
        ));
        assert!(matches!(
            engine.members_of(orphan),
            Err(EngineError::UnregisteredDefinition { .. })
        ));
        assert_eq!(engine.display_name(DefinitionId::new(9), false), UNKNOWN_NAME);
    }
}
