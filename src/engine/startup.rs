// src/engine/startup.rs
//! The eager validation pass.
//!
//! Scans the configured roots, loads every script, and checks each one that
//! declares interfaces with missing members made fatal, so incomplete
//! implementations stop the program at startup instead of on first use.

use std::path::PathBuf;

use rustc_hash::FxHashSet;

use crate::engine::{CheckOptions, Engine, OnMissingMember, Value};
use crate::errors::EngineError;
use crate::scan::Scanner;

/// Outcome of a completed startup pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    /// Distinct scripts discovered
    pub scanned: usize,
    /// Scripts declaring at least one interface
    pub implementers: usize,
    /// (implementer, interface) pairs checked, stopping at an implementer's
    /// first failure
    pub pairs_checked: usize,
    /// Implementers answering `false` from an earlier cached failure. Only
    /// the first failing check raises, so these pass through silently.
    pub cached_failures: Vec<String>,
}

impl Engine {
    /// Run the startup pass unless the engine validates at runtime.
    pub fn startup(&mut self) -> Result<Option<StartupReport>, EngineError> {
        if self.config.runtime_validation {
            tracing::debug!("runtime validation enabled, skipping startup pass");
            return Ok(None);
        }
        self.validate_all().map(Some)
    }

    /// Validate every script under `validate_dirs`.
    pub fn validate_all(&mut self) -> Result<StartupReport, EngineError> {
        let roots = self.config.root_dirs(self.loader.project_root());
        self.validate_roots(&roots)
    }

    /// Validate every script under `roots`; the first incomplete
    /// implementation is returned as an error.
    #[tracing::instrument(skip(self))]
    pub fn validate_roots(&mut self, roots: &[PathBuf]) -> Result<StartupReport, EngineError> {
        let options = CheckOptions::new(self.config.strict_validation, OnMissingMember::RaiseFatal);
        let mut report = StartupReport::default();
        // Overlapping roots list the same script more than once.
        let mut seen = FxHashSet::default();

        for path in self.discover(roots) {
            let def = self.load(&path)?;
            if !seen.insert(def) {
                continue;
            }
            report.scanned += 1;
            if self.definitions.get(def).implements.is_empty() {
                continue;
            }
            let declared = self.declared_interfaces(def)?;
            if declared.is_empty() {
                continue;
            }
            report.implementers += 1;
            let value = Value::Definition(def);
            for &interface in declared.iter() {
                report.pairs_checked += 1;
                if !self.implements_with(&value, interface, options)? {
                    report.cached_failures.push(self.display_name(def, false));
                    break;
                }
            }
        }
        tracing::debug!(?report, "startup pass complete");
        Ok(report)
    }

    /// Script files under `roots`.
    pub fn discover(&mut self, roots: &[PathBuf]) -> Vec<PathBuf> {
        self.stats.scans += 1;
        let scanner = Scanner::new(self.fs.as_ref(), self.loader.extension());
        scanner.scan_all(roots, self.config.recursive)
    }
}
