// src/identity.rs
//
// First-class identity for script definitions.

use std::fmt;

/// Identity for a definition (one script source unit).
///
/// Every cache in the engine is keyed by this id, never by the definition's
/// contents. Two definitions with identical source are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefinitionId(u32);

impl DefinitionId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a member an interface can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Event,
    Method,
    Field,
}

impl MemberKind {
    /// Order in which required members are compared.
    pub const CHECK_ORDER: [MemberKind; 3] =
        [MemberKind::Event, MemberKind::Method, MemberKind::Field];

    pub fn name(self) -> &'static str {
        match self {
            MemberKind::Event => "event",
            MemberKind::Method => "method",
            MemberKind::Field => "field",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
