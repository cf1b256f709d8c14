//! Terminal detection for output decisions.

use std::io::IsTerminal;

use passo_core::Theme;

/// Output mode determines how results are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON output only
    Json,
    /// Plain text, stable for logs and scripts
    #[default]
    Plain,
    /// Human-friendly tables with colors (TTY only)
    Pretty,
}

impl OutputMode {
    /// Resolve output mode from flags and environment.
    ///
    /// `--json` wins, `TERM=dumb` forces plain, and pretty output needs a TTY.
    pub fn resolve(json_flag: bool, is_tty: bool, term_is_dumb: bool) -> Self {
        if json_flag {
            return Self::Json;
        }
        if term_is_dumb || !is_tty {
            return Self::Plain;
        }
        Self::Pretty
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Terminal and preference context for rendering.
#[derive(Debug, Clone)]
pub struct UiContext {
    pub mode: OutputMode,
    /// Whether stdout gets ANSI colors
    pub color: bool,
    /// Whether stderr gets ANSI colors
    pub color_stderr: bool,
    pub quiet: bool,
    pub theme: Theme,
}

impl UiContext {
    pub fn from_env(json_flag: bool, quiet: bool, theme: Theme) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color = std::env::var_os("NO_COLOR").is_some() || term_is_dumb;

        Self {
            mode: OutputMode::resolve(json_flag, is_tty, term_is_dumb),
            color: is_tty && !no_color,
            color_stderr: std::io::stderr().is_terminal() && !no_color,
            quiet,
            theme,
        }
    }

    /// Context for messages printed before preferences can be read.
    pub fn fallback() -> Self {
        Self::from_env(false, false, Theme::default())
    }
}
