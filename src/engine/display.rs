// src/engine/display.rs
//! Display names for diagnostics.

use rustc_hash::FxHashMap;

use crate::engine::Engine;
use crate::identity::DefinitionId;
use crate::script;

/// Name shown for definitions without any source text.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Class name recovered per definition (`None` when the source declares none)
#[derive(Debug, Default)]
pub(crate) struct DisplayNameCache {
    entries: FxHashMap<DefinitionId, Option<String>>,
}

impl DisplayNameCache {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Engine {
    /// Short public name of a definition.
    ///
    /// Uses the host-declared name or the source's `class_name`. Without
    /// one, `strict` returns an empty string and lenient mode falls back to
    /// the definition key. Definitions with no source at all, and ids this
    /// engine never issued, are `"Unknown"`; that answer is not cached.
    pub fn display_name(&mut self, def: DefinitionId, strict: bool) -> String {
        let Some(definition) = self.definitions.try_get(def) else {
            return UNKNOWN_NAME.to_string();
        };
        let extracted = match self.display_names.entries.get(&def) {
            Some(hit) => hit.clone(),
            None => {
                let extracted = match (&definition.public_name, definition.source_text()) {
                    (Some(name), _) => Some(name.clone()),
                    (None, Some(source)) => script::class_name(source).map(str::to_string),
                    (None, None) => return UNKNOWN_NAME.to_string(),
                };
                self.display_names.entries.insert(def, extracted.clone());
                extracted
            }
        };

        match extracted {
            Some(name) => name,
            None if strict => String::new(),
            None => definition.key.clone(),
        }
    }
}
