//! Error types and helpers for user-friendly error messages
//!
//! Every failure in a run surfaces as a [`VizError`]. Variants carry enough
//! context to name the offending line, file, or template, and most of them
//! come with an actionable hint that is shown below the error.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Phase of template processing that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePhase {
    Parse,
    Execute,
}

impl fmt::Display for TemplatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplatePhase::Parse => write!(f, "parse"),
            TemplatePhase::Execute => write!(f, "execute"),
        }
    }
}

/// Errors produced while building or rendering a module graph
#[derive(Error, Debug)]
pub enum VizError {
    /// A line did not split into exactly two space-separated nodes
    #[error("line {line_number} must be formatted as 'module requirement': {line}")]
    InputShape { line_number: usize, line: String },

    /// Opening, reading, creating or writing a stream failed
    #[error("failed to {operation}{}", display_path(.path))]
    Stream {
        operation: String,
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// Requested output format is not one of the known tags
    #[error("unsupported output format: '{tag}'")]
    UnsupportedFormat { tag: String },

    /// Template could not be parsed or executed
    #[error("failed to {phase} template '{name}': {message}")]
    Template {
        name: String,
        phase: TemplatePhase,
        message: String,
    },

    /// Configuration file errors
    #[error("configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" '{}'", path.display()),
        None => String::new(),
    }
}

impl VizError {
    /// Create an input-shape error for a 1-based line number
    pub fn input_shape(line_number: usize, line: impl Into<String>) -> Self {
        Self::InputShape {
            line_number,
            line: line.into(),
        }
    }

    /// Create a stream error for an operation on an optional path
    pub fn stream(operation: impl Into<String>, path: Option<&Path>, source: io::Error) -> Self {
        Self::Stream {
            operation: operation.into(),
            path: path.map(Path::to_path_buf),
            source,
        }
    }

    /// Create an unsupported-format error
    pub fn unsupported_format(tag: impl Into<String>) -> Self {
        Self::UnsupportedFormat { tag: tag.into() }
    }

    /// Create a template error
    pub fn template(
        name: impl Into<String>,
        phase: TemplatePhase,
        message: impl Into<String>,
    ) -> Self {
        Self::Template {
            name: name.into(),
            phase,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with an underlying cause
    pub fn config_error_with_source(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Hint shown below the error, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            VizError::InputShape { .. } => Some(hints::input_shape()),
            VizError::UnsupportedFormat { .. } => Some(hints::unsupported_format()),
            VizError::Template { .. } => Some(hints::template()),
            VizError::Config { .. } => Some(hints::config()),
            VizError::Stream { .. } => None,
        }
    }

    /// Display error with its causes and hint on stderr
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            eprintln!("  {} {}", style("caused by:").dim(), err);
            cause = err.source();
        }

        if let Some(hint) = self.hint() {
            eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
        }

        eprintln!();
    }
}

/// Helper trait for turning I/O results into stream errors
pub trait IoResultExt<T> {
    /// Attach the failed operation and the path it was applied to
    fn with_operation(self, operation: &str, path: Option<&Path>) -> Result<T, VizError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_operation(self, operation: &str, path: Option<&Path>) -> Result<T, VizError> {
        self.map_err(|e| VizError::stream(operation, path, e))
    }
}

/// Common error hints
pub mod hints {
    /// Hint for malformed input lines
    pub fn input_shape() -> &'static str {
        "Each line must hold exactly two nodes separated by a single space:\n\
         • <module> <requirement>, e.g. 'example.com/app golang.org/x/text@v0.3.0'\n\
         • The output of 'go mod graph' has this shape"
    }

    /// Hint for unknown output formats
    pub fn unsupported_format() -> &'static str {
        "Supported output formats are 'dot' and 'html'."
    }

    /// Hint for template failures
    pub fn template() -> &'static str {
        "Check the template for unbalanced {{#section}}/{{/section}} tags\n\
         and for names that are not part of the graph context:\n\
         root, edges, nodes, selected, unselected, graph_json"
    }

    /// Hint for configuration file problems
    pub fn config() -> &'static str {
        "modviz.toml is invalid. Supported sections:\n\
         • [output] format = \"dot\" | \"html\"\n\
         • [templates] dot = \"path\", html = \"path\""
    }
}
