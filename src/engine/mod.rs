// src/engine/mod.rs
//! The conformance engine.
//!
//! `Engine` owns every definition and every cache. It is explicit state:
//! construct one per project, pass it by `&mut` to callers, drop it when
//! done. Caches are append-only for the engine's lifetime; nothing is
//! invalidated, because a script's declarations are assumed fixed once seen.
//!
//! Methods are split by concern across the submodules:
//! - `resolver`: runtime values to definitions
//! - `capabilities`: declared `implements` lists
//! - `names`: optional class-name registry
//! - `conformance`: member-level checks
//! - `display`: display names for diagnostics
//! - `orchestrator`: `implements` / `implementations`
//! - `startup`: the eager validation pass

mod capabilities;
mod conformance;
mod display;
mod names;
mod orchestrator;
mod resolver;
mod startup;

use std::path::Path;

use crate::config::Config;
use crate::definitions::{DefinitionBuilder, DefinitionRegistry};
use crate::errors::{ConfigError, EngineError};
use crate::identity::DefinitionId;
use crate::loader::ScriptLoader;
use crate::scan::{Filesystem, OsFilesystem};

pub use display::UNKNOWN_NAME;
pub use names::NameRegistry;
pub use orchestrator::{CheckOptions, Interfaces, OnMissingMember};
pub use resolver::{Object, Value};
pub use startup::StartupReport;

use capabilities::CapabilityCache;
use conformance::ConformanceCache;
use display::DisplayNameCache;

/// Counters and cache sizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Member comparisons actually performed (cache misses)
    pub member_probes: u64,
    /// Discovery scans run
    pub scans: u64,
    /// Successful name registry builds (at most one)
    pub name_registry_builds: u32,
    pub definitions: usize,
    pub capability_entries: usize,
    pub conformance_entries: usize,
    pub display_name_entries: usize,
}

pub struct Engine {
    config: Config,
    loader: ScriptLoader,
    fs: Box<dyn Filesystem>,
    definitions: DefinitionRegistry,
    capabilities: CapabilityCache,
    conformance: ConformanceCache,
    display_names: DisplayNameCache,
    /// Built on first string-name lookup, never rebuilt
    names: Option<NameRegistry>,
    stats: EngineStats,
}

impl Engine {
    /// Engine over the real filesystem.
    pub fn new(project_root: &Path, config: Config) -> Self {
        Self::with_filesystem(project_root, config, Box::new(OsFilesystem))
    }

    /// Engine whose discovery scans list directories through `fs`.
    pub fn with_filesystem(project_root: &Path, config: Config, fs: Box<dyn Filesystem>) -> Self {
        let loader = ScriptLoader::new(project_root, &config.script_extension);
        Self {
            config,
            loader,
            fs,
            definitions: DefinitionRegistry::new(),
            capabilities: CapabilityCache::default(),
            conformance: ConformanceCache::default(),
            display_names: DisplayNameCache::default(),
            names: None,
            stats: EngineStats::default(),
        }
    }

    /// Engine configured from the project's `interfaced.toml`.
    pub fn open(project_root: &Path) -> Result<Self, ConfigError> {
        let config = Config::load(project_root)?;
        Ok(Self::new(project_root, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn project_root(&self) -> &Path {
        self.loader.project_root()
    }

    pub fn definitions(&self) -> &DefinitionRegistry {
        &self.definitions
    }

    /// Register a host-provided definition.
    pub fn define(&mut self, builder: DefinitionBuilder) -> DefinitionId {
        self.definitions.register(builder)
    }

    /// Load a script file.
    pub fn load(&mut self, path: &Path) -> Result<DefinitionId, EngineError> {
        Ok(self.loader.load(&mut self.definitions, path)?)
    }

    /// Load a script by resource path ("res://...").
    pub fn load_resource(&mut self, resource: &str) -> Result<DefinitionId, EngineError> {
        Ok(self.loader.load_resource(&mut self.definitions, resource)?)
    }

    /// `id` if this engine issued it. `referrer` names the definition that
    /// mentioned the id in the error.
    pub(crate) fn registered(
        &mut self,
        id: DefinitionId,
        referrer: Option<DefinitionId>,
    ) -> Result<DefinitionId, EngineError> {
        if self.definitions.contains(id) {
            return Ok(id);
        }
        let referrer = match referrer {
            Some(referrer) => self.display_name(referrer, false),
            None => "the caller".to_string(),
        };
        Err(EngineError::UnregisteredDefinition { referrer, id })
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            definitions: self.definitions.len(),
            capability_entries: self.capabilities.len(),
            conformance_entries: self.conformance.len(),
            display_name_entries: self.display_names.len(),
            ..self.stats
        }
    }
}
