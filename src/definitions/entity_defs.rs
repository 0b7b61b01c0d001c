// src/definitions/entity_defs.rs
//! Definition structs for script source units.
//!
//! A `Definition` is the canonical identity of one script. Member lists are
//! computed from the source on first inspection and then kept; a script's
//! members are assumed not to change while the engine is alive.

use std::cell::OnceCell;

use crate::identity::{DefinitionId, MemberKind};
use crate::script;

/// Reference from one script to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptRef {
    /// Already registered definition
    Definition(DefinitionId),
    /// Resource path as written in source, e.g. "res://interfaces/can_heal.gd"
    Path(String),
}

/// One entry of a script's `implements` constant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredInterface {
    /// Direct reference (`preload("res://...")`)
    Reference(ScriptRef),
    /// Public class name, resolved through the name registry
    Name(String),
}

/// Names of the members a script exposes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSet {
    pub methods: Vec<String>,
    pub events: Vec<String>,
    pub fields: Vec<String>,
}

impl MemberSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self, kind: MemberKind) -> &[String] {
        match kind {
            MemberKind::Method => &self.methods,
            MemberKind::Event => &self.events,
            MemberKind::Field => &self.fields,
        }
    }

    pub fn contains(&self, kind: MemberKind, name: &str) -> bool {
        self.names(kind).iter().any(|n| n == name)
    }

    pub fn insert(&mut self, kind: MemberKind, name: impl Into<String>) {
        let name = name.into();
        if self.contains(kind, &name) {
            return;
        }
        match kind {
            MemberKind::Method => self.methods.push(name),
            MemberKind::Event => self.events.push(name),
            MemberKind::Field => self.fields.push(name),
        }
    }

    /// Add every member of `other` not already present.
    pub fn merge(&mut self, other: &MemberSet) {
        for kind in MemberKind::CHECK_ORDER {
            for name in other.names(kind) {
                self.insert(kind, name.as_str());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.methods.len() + self.events.len() + self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A script definition
#[derive(Debug, Clone)]
pub struct Definition {
    pub id: DefinitionId,
    /// Path-like key ("res://items/potion.gd"), unique per registry
    pub key: String,
    /// Public name declared by the host, bypassing source scanning
    pub public_name: Option<String>,
    /// Source text; `None` for placeholders with no content
    pub source: Option<String>,
    pub implements: Vec<DeclaredInterface>,
    /// Script this one extends, if it extends another script
    pub base: Option<ScriptRef>,
    /// Registered in the name registry without a marker comment
    pub named_interface: bool,
    members: OnceCell<MemberSet>,
    host_members: bool,
}

impl Definition {
    /// Whether the definition has content to inspect: non-blank source
    /// text, or member lists supplied by the host.
    pub fn has_source(&self) -> bool {
        self.host_members || self.source_text().is_some()
    }

    /// Source text, if present and not blank.
    pub fn source_text(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Whether the definition opts into lookup by public name.
    pub fn opts_into_names(&self) -> bool {
        self.named_interface || self.source_text().is_some_and(script::has_interface_marker)
    }

    /// Members declared by this script itself (base scripts excluded).
    pub fn own_members(&self) -> &MemberSet {
        self.members.get_or_init(|| match &self.source {
            Some(source) => script::parse_members(source),
            None => MemberSet::default(),
        })
    }
}

/// Describes a definition registered directly by a host rather than loaded
/// from a file.
#[derive(Debug, Clone, Default)]
pub struct DefinitionBuilder {
    key: String,
    public_name: Option<String>,
    named_interface: bool,
    source: Option<String>,
    implements: Vec<DeclaredInterface>,
    base: Option<ScriptRef>,
    members: Option<MemberSet>,
}

impl DefinitionBuilder {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Public name used in diagnostics instead of scanning the source.
    pub fn public_name(mut self, name: impl Into<String>) -> Self {
        self.public_name = Some(name.into());
        self
    }

    /// Public name that is also recorded in the name registry.
    pub fn named_interface(mut self, name: impl Into<String>) -> Self {
        self.public_name = Some(name.into());
        self.named_interface = true;
        self
    }

    /// Source text. Members are parsed from it unless given explicitly.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn implements(mut self, interface: DefinitionId) -> Self {
        self.implements
            .push(DeclaredInterface::Reference(ScriptRef::Definition(interface)));
        self
    }

    pub fn implements_name(mut self, name: impl Into<String>) -> Self {
        self.implements.push(DeclaredInterface::Name(name.into()));
        self
    }

    pub fn declared(mut self, entries: Vec<DeclaredInterface>) -> Self {
        self.implements = entries;
        self
    }

    pub fn extends(mut self, base: DefinitionId) -> Self {
        self.base = Some(ScriptRef::Definition(base));
        self
    }

    pub fn base(mut self, base: Option<ScriptRef>) -> Self {
        self.base = base;
        self
    }

    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.members_mut().insert(MemberKind::Method, name);
        self
    }

    pub fn event(mut self, name: impl Into<String>) -> Self {
        self.members_mut().insert(MemberKind::Event, name);
        self
    }

    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.members_mut().insert(MemberKind::Field, name);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn members_mut(&mut self) -> &mut MemberSet {
        self.members.get_or_insert_with(MemberSet::default)
    }

    pub(crate) fn build(self, id: DefinitionId) -> Definition {
        let members = OnceCell::new();
        let host_members = self.members.is_some();
        if let Some(explicit) = self.members {
            let _ = members.set(explicit);
        }
        Definition {
            id,
            key: self.key,
            public_name: self.public_name,
            source: self.source,
            implements: self.implements,
            base: self.base,
            named_interface: self.named_interface,
            members,
            host_members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_parsed_lazily_from_source() {
        let def = DefinitionBuilder::new("res://potion.gd")
            .source("func heal(amount):\n\tpass\nsignal healed\nvar charges = 3\n")
            .build(DefinitionId::new(0));

        let members = def.own_members();
        assert_eq!(members.methods, vec!["heal"]);
        assert_eq!(members.events, vec!["healed"]);
        assert_eq!(members.fields, vec!["charges"]);
    }

    #[test]
    fn explicit_members_win_over_source() {
        let def = DefinitionBuilder::new("res://potion.gd")
            .source("func heal():\n\tpass\n")
            .method("drink")
            .build(DefinitionId::new(0));

        assert_eq!(def.own_members().methods, vec!["drink"]);
    }

    #[test]
    fn blank_source_counts_as_no_source() {
        let def = DefinitionBuilder::new("res://empty.gd")
            .source("  \n\n")
            .build(DefinitionId::new(0));
        assert!(!def.has_source());

        let placeholder = DefinitionBuilder::new("res://placeholder.gd").build(DefinitionId::new(1));
        assert!(!placeholder.has_source());
        assert!(placeholder.own_members().is_empty());

        let host = DefinitionBuilder::new("res://host.gd")
            .event("ready")
            .build(DefinitionId::new(2));
        assert!(host.has_source());
        assert!(host.source_text().is_none());
    }

    #[test]
    fn marker_or_flag_opts_into_names() {
        let marked = DefinitionBuilder::new("res://can_heal.gd")
            .source("# @interface\nclass_name CanHeal\n")
            .build(DefinitionId::new(0));
        let flagged = DefinitionBuilder::new("res://can_drink.gd")
            .named_interface("CanDrink")
            .build(DefinitionId::new(1));
        let plain = DefinitionBuilder::new("res://rock.gd")
            .source("class_name Rock\n")
            .build(DefinitionId::new(2));

        assert!(marked.opts_into_names());
        assert!(flagged.opts_into_names());
        assert!(!plain.opts_into_names());
    }

    #[test]
    fn member_set_merge_skips_duplicates() {
        let mut a = MemberSet::new();
        a.insert(MemberKind::Method, "heal");
        let mut b = MemberSet::new();
        b.insert(MemberKind::Method, "heal");
        b.insert(MemberKind::Event, "healed");

        a.merge(&b);
        assert_eq!(a.len(), 2);
        assert!(a.contains(MemberKind::Event, "healed"));
    }
}
