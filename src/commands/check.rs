// src/commands/check.rs

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use super::common::{TermColors, open_engine, render_error};
use crate::cli::ColorMode;
use crate::config::resolve_dir;
use crate::util::{format_duration, plural};

/// Run the startup validation pass over `roots`, or over `validate_dirs`
/// when none are given.
pub fn check_project(root: Option<&Path>, roots: &[String], color_mode: ColorMode) -> ExitCode {
    let Ok(mut engine) = open_engine(root, color_mode) else {
        return ExitCode::FAILURE;
    };
    let colors = TermColors::with_mode(color_mode);

    let dirs: Vec<PathBuf> = if roots.is_empty() {
        engine.config().root_dirs(engine.project_root())
    } else {
        roots
            .iter()
            .map(|dir| resolve_dir(engine.project_root(), dir))
            .collect()
    };

    let start = Instant::now();
    let result = engine.validate_roots(&dirs);
    let elapsed = format_duration(start.elapsed());

    match result {
        Ok(report) => {
            for name in &report.cached_failures {
                println!(
                    "{}warning{}: {} failed an earlier lenient check",
                    colors.yellow(),
                    colors.reset(),
                    name
                );
            }
            println!(
                "{}ok{}: {} scanned, {} checked against {} {}({}){}",
                colors.green(),
                colors.reset(),
                plural(report.scanned, "script"),
                plural(report.implementers, "implementer"),
                plural(report.pairs_checked, "interface"),
                colors.dim(),
                elapsed,
                colors.reset()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            render_error(&err, color_mode);
            eprintln!(
                "{}check failed{} {}({}){}",
                colors.red(),
                colors.reset(),
                colors.dim(),
                elapsed,
                colors.reset()
            );
            ExitCode::FAILURE
        }
    }
}
