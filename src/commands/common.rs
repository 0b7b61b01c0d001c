// src/commands/common.rs
//! Shared utilities for CLI commands.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use miette::Diagnostic;

use crate::cli::ColorMode;
use crate::engine::Engine;
use crate::errors::render_to_stderr;

/// Project root from `--root`, or the current directory.
pub fn project_root(root: Option<&Path>) -> PathBuf {
    root.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Open an engine for the project, rendering a config error on failure.
///
/// Returns `Err(())` if the config could not be loaded (the diagnostic is
/// rendered to stderr before returning).
pub fn open_engine(root: Option<&Path>, color_mode: ColorMode) -> Result<Engine, ()> {
    let root = project_root(root);
    Engine::open(&root).map_err(|err| render_error(&err, color_mode))
}

/// Render a diagnostic to stderr.
pub fn render_error(err: &dyn Diagnostic, color_mode: ColorMode) {
    render_to_stderr(err, stderr_supports_color(color_mode));
}

fn stderr_supports_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Auto => std::io::stderr().is_terminal(),
        ColorMode::Always => true,
        ColorMode::Never => false,
    }
}

/// Check if stdout supports color output.
pub fn stdout_supports_color() -> bool {
    std::io::stdout().is_terminal()
}

/// ANSI color codes for terminal output.
pub struct TermColors {
    use_color: bool,
}

impl TermColors {
    /// Create a new TermColors with explicit color mode.
    pub fn with_mode(mode: ColorMode) -> Self {
        let use_color = match mode {
            ColorMode::Auto => stdout_supports_color(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        };
        Self { use_color }
    }

    /// Green text (for success).
    pub fn green(&self) -> &'static str {
        if self.use_color { "\x1b[32m" } else { "" }
    }

    /// Red text (for errors/failures).
    pub fn red(&self) -> &'static str {
        if self.use_color { "\x1b[31m" } else { "" }
    }

    /// Yellow text (for warnings).
    pub fn yellow(&self) -> &'static str {
        if self.use_color { "\x1b[33m" } else { "" }
    }

    /// Dim/gray text (for secondary info like timing).
    pub fn dim(&self) -> &'static str {
        if self.use_color { "\x1b[90m" } else { "" }
    }

    /// Reset to default colors.
    pub fn reset(&self) -> &'static str {
        if self.use_color { "\x1b[0m" } else { "" }
    }
}
