// src/script/mod.rs
//! Text scanning of script source units.
//!
//! This is not a full parser. It recovers just what the engine needs:
//! the `implements` constant and the base script at load time, and the
//! top-level member names on first inspection.

pub mod ident;

use std::sync::LazyLock;

use miette::NamedSource;
use regex::Regex;

use crate::definitions::{DeclaredInterface, MemberSet, ScriptRef};
use crate::errors::LoadError;
use crate::identity::MemberKind;

pub use ident::{class_name, has_interface_marker};

static IMPLEMENTS_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^const\s+implements\b[^=\n]*=\s*\[").expect("implements pattern is valid")
});

static EXTENDS_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(?:@\w+\s+)*extends\s+(?:preload\s*\(\s*)?["']([^"']+)["']"#)
        .expect("extends pattern is valid")
});

static SCRIPT_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:preload|load)\s*\(\s*["']([^"']+)["']\s*\)$"#)
        .expect("reference pattern is valid")
});

static QUOTED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^&?(?:"([^"]*)"|'([^']*)')$"#).expect("name pattern is valid")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").expect("identifier pattern is valid"));

/// Declarations read from a script when it is loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptHeader {
    pub implements: Vec<DeclaredInterface>,
    pub base: Option<ScriptRef>,
}

/// Read the `implements` constant and the base script of `source`.
///
/// `key` names the script in diagnostics.
pub fn parse_header(key: &str, source: &str) -> Result<ScriptHeader, LoadError> {
    let implements = match IMPLEMENTS_START.find(source) {
        Some(found) => parse_implements(key, source, found.start(), found.end())?,
        None => Vec::new(),
    };
    let base = EXTENDS_SCRIPT
        .captures(source)
        .map(|caps| ScriptRef::Path(caps[1].to_string()));
    Ok(ScriptHeader { implements, base })
}

/// A raw list entry with its byte offset in the source
struct RawEntry<'a> {
    text: &'a str,
    offset: usize,
}

fn parse_implements(
    key: &str,
    source: &str,
    decl_start: usize,
    list_start: usize,
) -> Result<Vec<DeclaredInterface>, LoadError> {
    let Some(entries) = split_list(source, list_start) else {
        return Err(LoadError::UnterminatedImplements {
            key: key.to_string(),
            src: NamedSource::new(key, source.to_string()),
            span: (decl_start, list_start - decl_start).into(),
        });
    };

    let mut declared = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(caps) = SCRIPT_REFERENCE.captures(entry.text) {
            declared.push(DeclaredInterface::Reference(ScriptRef::Path(
                caps[1].to_string(),
            )));
        } else if let Some(caps) = QUOTED_NAME.captures(entry.text) {
            let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            declared.push(DeclaredInterface::Name(name.to_string()));
        } else {
            return Err(LoadError::InvalidImplementsEntry {
                key: key.to_string(),
                entry: entry.text.to_string(),
                src: NamedSource::new(key, source.to_string()),
                span: (entry.offset, entry.text.len()).into(),
            });
        }
    }
    Ok(declared)
}

/// Split the list body starting at `start` (just after `[`) into entries.
///
/// Commas inside strings or brackets do not split, `#` comments run to the
/// end of the line, and empty entries (a trailing comma) are dropped.
/// Returns `None` when the closing `]` is missing.
fn split_list(source: &str, start: usize) -> Option<Vec<RawEntry<'_>>> {
    let bytes = source.as_bytes();
    let mut entries = Vec::new();
    // Byte range of the current entry's significant text
    let mut span: Option<(usize, usize)> = None;
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut comment = false;
    let mut pos = start;

    while pos < bytes.len() {
        let b = bytes[pos];
        let mut significant = true;
        if comment {
            comment = b != b'\n';
            significant = false;
        } else if let Some(q) = quote {
            if b == b'\\' {
                pos += 1;
            } else if b == q {
                quote = None;
            }
        } else {
            match b {
                b'"' | b'\'' => quote = Some(b),
                b'#' => {
                    comment = true;
                    significant = false;
                }
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b'}' => depth = depth.saturating_sub(1),
                b']' if depth == 0 => {
                    push_entry(source, span.take(), &mut entries);
                    return Some(entries);
                }
                b']' => depth -= 1,
                b',' if depth == 0 => {
                    push_entry(source, span.take(), &mut entries);
                    significant = false;
                }
                _ if b.is_ascii_whitespace() => significant = false,
                _ => {}
            }
        }
        if significant {
            let end = (pos + 1).min(bytes.len());
            span = Some(span.map_or((pos, end), |(from, _)| (from, end)));
        }
        pos += 1;
    }
    None
}

fn push_entry<'a>(source: &'a str, span: Option<(usize, usize)>, entries: &mut Vec<RawEntry<'a>>) {
    if let Some((from, to)) = span {
        entries.push(RawEntry {
            text: &source[from..to],
            offset: from,
        });
    }
}

/// Collect the member names a script declares at top level.
///
/// Only unindented declarations count; anything indented belongs to a
/// function body or an inner class. Leading annotations such as `@export`
/// or `@export_range(0, 10)` are skipped.
pub fn parse_members(source: &str) -> MemberSet {
    let mut members = MemberSet::new();
    for line in source.lines() {
        if line.starts_with(char::is_whitespace) || line.starts_with('#') {
            continue;
        }
        let decl = skip_annotations(line);
        if let Some(rest) = decl
            .strip_prefix("static func ")
            .or_else(|| decl.strip_prefix("func "))
        {
            push_identifier(&mut members, MemberKind::Method, rest);
        } else if let Some(rest) = decl.strip_prefix("signal ") {
            push_identifier(&mut members, MemberKind::Event, rest);
        } else if let Some(rest) = decl
            .strip_prefix("static var ")
            .or_else(|| decl.strip_prefix("var "))
        {
            push_identifier(&mut members, MemberKind::Field, rest);
        }
    }
    members
}

fn push_identifier(members: &mut MemberSet, kind: MemberKind, rest: &str) {
    if let Some(name) = IDENTIFIER.find(rest.trim_start()) {
        members.insert(kind, name.as_str());
    }
}

/// Drop leading `@annotation` and `@annotation(args)` tokens.
fn skip_annotations(mut line: &str) -> &str {
    while let Some(rest) = line.strip_prefix('@') {
        let name_len = IDENTIFIER.find(rest).map_or(0, |m| m.end());
        let mut rest = &rest[name_len..];
        if rest.starts_with('(') {
            let mut depth = 0usize;
            let mut end = rest.len();
            for (i, c) in rest.char_indices() {
                match c {
                    '(' => depth += 1,
                    ')' => {
                        depth -= 1;
                        if depth == 0 {
                            end = i + 1;
                            break;
                        }
                    }
                    _ => {}
                }
            }
            rest = &rest[end..];
        }
        line = rest.trim_start();
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[DeclaredInterface]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match e {
                DeclaredInterface::Reference(ScriptRef::Path(p)) => format!("ref:{p}"),
                DeclaredInterface::Reference(ScriptRef::Definition(id)) => format!("id:{id}"),
                DeclaredInterface::Name(n) => format!("name:{n}"),
            })
            .collect()
    }

    #[test]
    fn header_without_implements_is_empty() {
        let header = parse_header("res://rock.gd", "extends Node\nfunc roll():\n\tpass\n").unwrap();
        assert!(header.implements.is_empty());
        assert_eq!(header.base, None);
    }

    #[test]
    fn header_reads_references_and_names() {
        let source = r#"extends Node
const implements = [preload("res://interfaces/can_heal.gd"), "CanDrink", &'Stackable']
"#;
        let header = parse_header("res://potion.gd", source).unwrap();
        assert_eq!(
            names(&header.implements),
            vec![
                "ref:res://interfaces/can_heal.gd",
                "name:CanDrink",
                "name:Stackable"
            ]
        );
    }

    #[test]
    fn header_reads_multiline_typed_list_with_comments() {
        let source = r#"const implements: Array[Script] = [
	# healing
	preload("res://can_heal.gd"),
	load("res://can_drink.gd"), # drinking
]
"#;
        let header = parse_header("res://potion.gd", source).unwrap();
        assert_eq!(
            names(&header.implements),
            vec!["ref:res://can_heal.gd", "ref:res://can_drink.gd"]
        );
    }

    #[test]
    fn empty_list_is_allowed() {
        let header = parse_header("res://a.gd", "const implements = []\n").unwrap();
        assert!(header.implements.is_empty());
    }

    #[test]
    fn bare_identifier_is_rejected_with_span() {
        let source = "const implements = [CanHeal]\n";
        let err = parse_header("res://potion.gd", source).unwrap_err();
        match err {
            LoadError::InvalidImplementsEntry { entry, span, .. } => {
                assert_eq!(entry, "CanHeal");
                assert_eq!(span.offset(), 20);
                assert_eq!(span.len(), 7);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unterminated_list_is_rejected() {
        let err = parse_header("res://a.gd", "const implements = [\"A\",\n").unwrap_err();
        assert!(matches!(err, LoadError::UnterminatedImplements { .. }));
    }

    #[test]
    fn header_reads_script_base() {
        let header = parse_header("res://b.gd", "extends \"res://base.gd\"\n").unwrap();
        assert_eq!(header.base, Some(ScriptRef::Path("res://base.gd".to_string())));

        let header = parse_header("res://b.gd", "@tool\nextends preload(\"res://base.gd\")\n").unwrap();
        assert_eq!(header.base, Some(ScriptRef::Path("res://base.gd".to_string())));
    }

    #[test]
    fn members_only_count_top_level_declarations() {
        let source = r#"class_name Potion
extends Node

signal healed(amount)
signal emptied
@export var charges := 3
@export_range(0, 10) var potency = 1
@onready
var label = null

static func create():
	var local = 1
	return null

func heal(target):
	var amount = potency
	healed.emit(amount)

class Inner:
	func hidden():
		pass
"#;
        let members = parse_members(source);
        assert_eq!(members.events, vec!["healed", "emptied"]);
        assert_eq!(members.methods, vec!["create", "heal"]);
        assert_eq!(members.fields, vec!["charges", "potency", "label"]);
    }

    #[test]
    fn commented_declarations_are_ignored() {
        let members = parse_members("# func old():\n#signal gone\nfunc new():\n\tpass\n");
        assert_eq!(members.methods, vec!["new"]);
        assert!(members.events.is_empty());
    }

    #[test]
    fn static_vars_are_fields() {
        let members = parse_members("static var count = 0\n@export static var label := \"\"\n");
        assert_eq!(members.fields, vec!["count", "label"]);
    }
}
