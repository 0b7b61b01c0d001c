// src/engine/names.rs
//! Optional class-name registry.
//!
//! Lets implements lists name interfaces with strings instead of script
//! references. Building it scans and loads every script under the
//! configured roots, so it is opt-in (`allow_string_classes`) and happens
//! at most once per engine.

use rustc_hash::FxHashMap;

use crate::engine::Engine;
use crate::errors::EngineError;
use crate::identity::DefinitionId;

#[derive(Debug, Default, Clone)]
pub struct NameRegistry {
    by_name: FxHashMap<String, DefinitionId>,
}

impl NameRegistry {
    /// Look up an interface by its class name
    pub fn get(&self, name: &str) -> Option<DefinitionId> {
        self.by_name.get(name).copied()
    }

    /// Record a name; the first definition registered under a name wins.
    fn insert(&mut self, name: String, def: DefinitionId) -> bool {
        if self.by_name.contains_key(&name) {
            return false;
        }
        self.by_name.insert(name, def);
        true
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Engine {
    /// The name registry, built on first use.
    pub fn name_registry(&mut self) -> Result<&NameRegistry, EngineError> {
        let registry = match self.names.take() {
            Some(registry) => registry,
            None => self.build_name_registry()?,
        };
        let registry: &NameRegistry = self.names.insert(registry);
        Ok(registry)
    }

    fn build_name_registry(&mut self) -> Result<NameRegistry, EngineError> {
        let roots = self.config.root_dirs(self.loader.project_root());
        for path in self.discover(&roots) {
            self.load(&path)?;
        }

        let candidates: Vec<DefinitionId> = self
            .definitions
            .iter()
            .filter(|def| def.opts_into_names())
            .map(|def| def.id)
            .collect();

        let mut registry = NameRegistry::default();
        for def in candidates {
            let name = self.display_name(def, true);
            if name.is_empty() {
                continue;
            }
            if !registry.insert(name.clone(), def) {
                let key = &self.definitions.get(def).key;
                tracing::warn!(%name, %key, "duplicate interface name ignored");
            }
        }
        self.stats.name_registry_builds += 1;
        tracing::debug!(names = registry.len(), "built name registry");
        Ok(registry)
    }
}
