// src/definitions/registry.rs
//! Central registry for script definitions.
//!
//! DefinitionRegistry owns every definition and hands out `DefinitionId`s,
//! which are indices into its storage. Keys are unique: registering a key
//! twice returns the existing id.

use rustc_hash::FxHashMap;

use crate::definitions::entity_defs::{Definition, DefinitionBuilder};
use crate::identity::DefinitionId;

#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    // Storage - IDs are indices into this vector
    definitions: Vec<Definition>,
    by_key: FxHashMap<String, DefinitionId>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, or return the id already registered for its key
    pub fn register(&mut self, builder: DefinitionBuilder) -> DefinitionId {
        if let Some(id) = self.by_key.get(builder.key()) {
            return *id;
        }
        let id = DefinitionId::new(self.definitions.len() as u32);
        let def = builder.build(id);
        self.by_key.insert(def.key.clone(), id);
        self.definitions.push(def);
        tracing::trace!(%id, key = %self.definitions[id.index() as usize].key, "registered definition");
        id
    }

    /// Get a definition by ID
    pub fn get(&self, id: DefinitionId) -> &Definition {
        &self.definitions[id.index() as usize]
    }

    /// Get a definition by ID, if this registry issued it
    pub fn try_get(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.get(id.index() as usize)
    }

    pub fn contains(&self, id: DefinitionId) -> bool {
        (id.index() as usize) < self.definitions.len()
    }

    /// Look up a definition by its key
    pub fn by_key(&self, key: &str) -> Option<DefinitionId> {
        self.by_key.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }
}
