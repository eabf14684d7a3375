//! Output formatting utilities
//!
//! Status lines, colors and the upload spinner. Data output (tables, trees)
//! is written by the shell to its own writer.

mod formatter;
mod progress;

use std::io::IsTerminal;

use sl_core::ColorMode;
use sl_core::config::Defaults;

pub use formatter::Formatter;
pub use progress::ProgressBar;

/// Output configuration derived from CLI flags and config defaults
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Disable colored output
    pub no_color: bool,
    /// Disable the upload spinner
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}

impl OutputConfig {
    /// Combine command-line flags with the configured defaults
    ///
    /// A flag always wins; `color = "auto"` disables colors when stderr is
    /// not a terminal.
    pub fn resolve(no_color: bool, no_progress: bool, quiet: bool, defaults: &Defaults) -> Self {
        let no_color = no_color
            || match defaults.color {
                ColorMode::Always => false,
                ColorMode::Never => true,
                ColorMode::Auto => !std::io::stderr().is_terminal(),
            };

        Self {
            no_color,
            no_progress: no_progress || !defaults.progress,
            quiet,
        }
    }
}
