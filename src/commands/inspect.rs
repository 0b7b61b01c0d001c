// src/commands/inspect.rs

use std::path::Path;
use std::process::ExitCode;

use super::common::{TermColors, open_engine, render_error};
use crate::cli::{ColorMode, expand_paths};
use crate::engine::{Engine, OnMissingMember};
use crate::errors::EngineError;
use crate::identity::{DefinitionId, MemberKind};
use crate::util::plural;

/// Print declarations, members and lenient conformance for each script
/// matched by `patterns`.
pub fn inspect_files(root: Option<&Path>, patterns: &[String], color_mode: ColorMode) -> ExitCode {
    let Ok(mut engine) = open_engine(root, color_mode) else {
        return ExitCode::FAILURE;
    };
    let colors = TermColors::with_mode(color_mode);

    let files = match expand_paths(patterns, &engine.config().script_extension) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if files.is_empty() {
        eprintln!(
            "error: no .{} files found",
            engine.config().script_extension.trim_start_matches('.')
        );
        return ExitCode::FAILURE;
    }

    let mut had_error = false;
    for (i, path) in files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let result = engine
            .load(path)
            .and_then(|def| inspect_definition(&mut engine, def, &colors));
        if let Err(err) = result {
            eprintln!("// {}", path.display());
            render_error(&err, color_mode);
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn inspect_definition(
    engine: &mut Engine,
    def: DefinitionId,
    colors: &TermColors,
) -> Result<(), EngineError> {
    let key = engine.definitions().get(def).key.clone();
    let name = engine.display_name(def, false);
    println!("{key}");
    println!("  name: {name}");

    let members = engine.members_of(def)?;
    let counts: Vec<String> = MemberKind::CHECK_ORDER
        .iter()
        .map(|&kind| plural(members.names(kind).len(), kind.name()))
        .collect();
    println!("  members: {}", counts.join(", "));

    let interfaces = engine.declared_interfaces(def)?;
    if interfaces.is_empty() {
        println!("  implements: none");
        return Ok(());
    }
    println!("  implements:");
    for &interface in interfaces.iter() {
        let interface_name = engine.display_name(interface, false);
        let (color, verdict) = if engine.conforms(def, interface, OnMissingMember::ReturnFalse)? {
            (colors.green(), "conforms")
        } else {
            (colors.red(), "incomplete")
        };
        println!(
            "    {} {}{}{}",
            interface_name,
            color,
            verdict,
            colors.reset()
        );
    }
    Ok(())
}
