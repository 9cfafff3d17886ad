//! Terminal output utilities
//!
//! Diagnostics always go to stderr: stdout may be carrying the rendered graph.

use console::style;

/// Leveled logging collaborator handed to the pipeline
pub trait Logger {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Logger printing styled, level-prefixed lines to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalLogger {
    verbose: bool,
}

impl TerminalLogger {
    /// Debug messages are only shown when `verbose` is set
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Logger for TerminalLogger {
    fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("{}: {}", style("debug").dim(), message);
        }
    }

    fn info(&self, message: &str) {
        eprintln!("{}: {}", style("info").blue().bold(), message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{}: {}", style("warning").yellow().bold(), message);
    }
}

/// Disable colored output on both stdout and stderr
pub fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}
