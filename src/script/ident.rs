// src/script/ident.rs
//! Best-effort recovery of a script's public class name.
//!
//! Used for diagnostics and as the name registry key, never for deciding
//! conformance.

use std::sync::LazyLock;

use regex::Regex;

static CLASS_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:@\w+\s+)*class_name\s+([A-Za-z_][A-Za-z0-9_]*)")
        .expect("class_name pattern is valid")
});

static INTERFACE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*#\s*@interface\b").expect("marker pattern is valid"));

/// The name declared with `class_name`, if any.
pub fn class_name(source: &str) -> Option<&str> {
    CLASS_NAME
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether the script opts into name-based lookup with a `# @interface`
/// comment.
pub fn has_interface_marker(source: &str) -> bool {
    INTERFACE_MARKER.is_match(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_class_name() {
        assert_eq!(class_name("extends Node\nclass_name CanHeal\n"), Some("CanHeal"));
        assert_eq!(class_name("@tool class_name Editor extends Node\n"), Some("Editor"));
    }

    #[test]
    fn ignores_indented_or_commented_names() {
        assert_eq!(class_name("# class_name Old\n"), None);
        assert_eq!(class_name("class Inner:\n\tclass_name Nope\n"), None);
    }

    #[test]
    fn detects_marker_comment() {
        assert!(has_interface_marker("# @interface\nclass_name CanHeal\n"));
        assert!(has_interface_marker("class_name CanHeal\n  #@interface\n"));
        assert!(!has_interface_marker("class_name CanHeal # @interface\n"));
        assert!(!has_interface_marker("# @interfaces\n"));
    }
}
