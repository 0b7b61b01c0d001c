// src/engine/orchestrator.rs
//! The public checks: `implements` and `implementations`.
//!
//! Note the asymmetry, which existing callers rely on:
//! - an interface the value does not declare is *not applicable*, so the
//!   answer is `false` and nothing is ever raised, whatever the options say;
//! - a declared interface whose members are missing is a *broken
//!   implementation*, which `OnMissingMember::RaiseFatal` turns into an error.
//!
//! Strictness controls what happens once an interface is claimed, not
//! whether it has to be claimed.

use std::borrow::Cow;

use crate::engine::{Engine, Value};
use crate::errors::EngineError;
use crate::identity::DefinitionId;

/// What a failed member check does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnMissingMember {
    /// Answer `false`
    #[default]
    ReturnFalse,
    /// Return an error naming the implementer, member and interface
    RaiseFatal,
}

/// Options for one `implements` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Check members, not just the declaration
    pub validate: bool,
    pub on_missing_member: OnMissingMember,
}

impl CheckOptions {
    pub fn new(validate: bool, on_missing_member: OnMissingMember) -> Self {
        Self {
            validate,
            on_missing_member,
        }
    }
}

/// One interface or a list of them
#[derive(Debug, Clone)]
pub struct Interfaces<'a>(Cow<'a, [DefinitionId]>);

impl Interfaces<'_> {
    pub fn as_slice(&self) -> &[DefinitionId] {
        &self.0
    }
}

impl From<DefinitionId> for Interfaces<'static> {
    fn from(id: DefinitionId) -> Self {
        Interfaces(Cow::Owned(vec![id]))
    }
}

impl From<Vec<DefinitionId>> for Interfaces<'static> {
    fn from(ids: Vec<DefinitionId>) -> Self {
        Interfaces(Cow::Owned(ids))
    }
}

impl<'a> From<&'a [DefinitionId]> for Interfaces<'a> {
    fn from(ids: &'a [DefinitionId]) -> Self {
        Interfaces(Cow::Borrowed(ids))
    }
}

impl<'a> From<&'a Vec<DefinitionId>> for Interfaces<'a> {
    fn from(ids: &'a Vec<DefinitionId>) -> Self {
        Interfaces(Cow::Borrowed(ids.as_slice()))
    }
}

impl<'a, const N: usize> From<&'a [DefinitionId; N]> for Interfaces<'a> {
    fn from(ids: &'a [DefinitionId; N]) -> Self {
        Interfaces(Cow::Borrowed(ids.as_slice()))
    }
}

impl Engine {
    /// Options used when a caller does not pass any: `validate` follows
    /// `strict_validation`, and missing members are fatal under
    /// `runtime_validation` (there was no startup pass to catch them).
    pub fn default_options(&self) -> CheckOptions {
        CheckOptions {
            validate: self.config.strict_validation,
            on_missing_member: if self.config.runtime_validation {
                OnMissingMember::RaiseFatal
            } else {
                OnMissingMember::ReturnFalse
            },
        }
    }

    /// Whether `value` implements every interface in `interfaces`, using
    /// the configured defaults.
    pub fn implements<'a>(
        &mut self,
        value: &Value,
        interfaces: impl Into<Interfaces<'a>>,
    ) -> Result<bool, EngineError> {
        let options = self.default_options();
        self.implements_with(value, interfaces, options)
    }

    /// Whether `value` implements every interface in `interfaces`.
    ///
    /// Errors only for unresolvable values, configuration mistakes in the
    /// implements list, and (with `RaiseFatal`) missing members of a
    /// declared interface.
    pub fn implements_with<'a>(
        &mut self,
        value: &Value,
        interfaces: impl Into<Interfaces<'a>>,
        options: CheckOptions,
    ) -> Result<bool, EngineError> {
        let interfaces = interfaces.into();
        let def = self.resolve(value)?;
        let declared = self.declared_interfaces(def)?;
        if declared.is_empty() {
            tracing::trace!(%def, "declares no interfaces");
            return Ok(false);
        }

        for &interface in interfaces.as_slice() {
            if !declared.contains(&interface) {
                // Not applicable, never an error.
                tracing::trace!(%def, %interface, "interface not declared");
                return Ok(false);
            }
            // Without validation the declaration confirmed above is enough,
            // even when missing members would be fatal.
            if options.validate && !self.conforms(def, interface, options.on_missing_member)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The values implementing `interfaces`, in their original order.
    /// Declarations alone decide.
    pub fn implementations<'v, 'a>(
        &mut self,
        values: &'v [Value],
        interfaces: impl Into<Interfaces<'a>>,
    ) -> Result<Vec<&'v Value>, EngineError> {
        self.implementations_with(values, interfaces, false)
    }

    /// Like `implementations`, optionally checking members too.
    pub fn implementations_with<'v, 'a>(
        &mut self,
        values: &'v [Value],
        interfaces: impl Into<Interfaces<'a>>,
        validate: bool,
    ) -> Result<Vec<&'v Value>, EngineError> {
        let interfaces = interfaces.into();
        let options = CheckOptions {
            validate,
            ..self.default_options()
        };

        let mut matching = Vec::new();
        for value in values {
            if self.implements_with(value, interfaces.as_slice(), options)? {
                matching.push(value);
            }
        }
        Ok(matching)
    }
}
