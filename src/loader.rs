// src/loader.rs
//! Script loader for resolving and loading script files.
//!
//! Handles:
//! - `res://` resource path resolution against the project root
//! - File reading and header parsing
//! - Identity: a file loaded twice (by any spelling) maps to one definition

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::RESOURCE_PREFIX;
use crate::definitions::{DeclaredInterface, DefinitionBuilder, DefinitionRegistry, ScriptRef};
use crate::errors::LoadError;
use crate::identity::DefinitionId;
use crate::script;

#[derive(Debug, Clone)]
pub struct ScriptLoader {
    /// Canonical project root
    project_root: PathBuf,
    /// Script extension without the dot
    extension: String,
}

impl ScriptLoader {
    pub fn new(project_root: &Path, extension: &str) -> Self {
        let project_root = project_root
            .canonicalize()
            .unwrap_or_else(|_| project_root.to_path_buf());
        Self {
            project_root,
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Check if a path has the script extension
    pub fn is_script(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == self.extension.as_str())
    }

    /// Definition key for a file: `res://` form inside the project,
    /// the display path otherwise.
    pub fn key_for(&self, path: &Path) -> String {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        match path.strip_prefix(&self.project_root) {
            Ok(relative) => {
                let segments: Vec<_> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect();
                format!("{}{}", RESOURCE_PREFIX, segments.join("/"))
            }
            Err(_) => path.display().to_string(),
        }
    }

    /// Filesystem path for a resource path as written in a script.
    ///
    /// `res://` paths and relative paths resolve against the project root;
    /// neither may climb above it.
    pub fn resolve(&self, resource: &str) -> Result<PathBuf, LoadError> {
        let relative = match resource.strip_prefix(RESOURCE_PREFIX) {
            Some(rest) => rest,
            None if Path::new(resource).is_absolute() => return Ok(PathBuf::from(resource)),
            None => resource,
        };

        let mut resolved = self.project_root.clone();
        let mut depth = 0usize;
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    depth += 1;
                }
                Component::ParentDir if depth > 0 => {
                    resolved.pop();
                    depth -= 1;
                }
                Component::ParentDir => {
                    return Err(LoadError::OutsideProject {
                        path: resource.to_string(),
                    });
                }
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        Ok(resolved)
    }

    /// Load a script by resource path (e.g. "res://interfaces/can_heal.gd")
    pub fn load_resource(
        &self,
        defs: &mut DefinitionRegistry,
        resource: &str,
    ) -> Result<DefinitionId, LoadError> {
        let path = self.resolve(resource)?;
        self.load(defs, &path)
    }

    /// Load a script file, registering it on first sight
    pub fn load(&self, defs: &mut DefinitionRegistry, path: &Path) -> Result<DefinitionId, LoadError> {
        let key = self.key_for(path);
        if let Some(id) = defs.by_key(&key) {
            return Ok(id);
        }

        let source = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut header = script::parse_header(&key, &source)?;
        for entry in &mut header.implements {
            if let DeclaredInterface::Reference(reference) = entry {
                anchor_reference(&key, path, reference);
            }
        }
        if let Some(base) = &mut header.base {
            anchor_reference(&key, path, base);
        }
        tracing::debug!(
            %key,
            implements = header.implements.len(),
            has_base = header.base.is_some(),
            "loaded script"
        );

        Ok(defs.register(
            DefinitionBuilder::new(key)
                .source(source)
                .declared(header.implements)
                .base(header.base),
        ))
    }
}

/// Rewrite a reference written relative to the declaring script so it
/// resolves from the project root. `res://` and absolute paths are kept.
fn anchor_reference(key: &str, script: &Path, reference: &mut ScriptRef) {
    let ScriptRef::Path(target) = reference else {
        return;
    };
    if target.starts_with(RESOURCE_PREFIX) || Path::new(target.as_str()).is_absolute() {
        return;
    }
    let anchored = match key.strip_prefix(RESOURCE_PREFIX) {
        Some(relative) => match relative.rsplit_once('/') {
            Some((dir, _)) => format!("{RESOURCE_PREFIX}{dir}/{target}"),
            None => format!("{RESOURCE_PREFIX}{target}"),
        },
        None => match script.parent() {
            Some(dir) => dir.join(target.as_str()).display().to_string(),
            None => return,
        },
    };
    *target = anchored;
}
