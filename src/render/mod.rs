//! Graph rendering
//!
//! Each output format is rendered by substituting graph data into a text
//! template. The default templates ship in `templates/`; any other template
//! text can be supplied when the renderer is constructed.

pub mod context;
pub mod template;

use std::fmt;

use clap::ValueEnum;

use crate::error::VizError;
use crate::graph::Graph;

pub use template::{Escape, Template};

const DOT_TEMPLATE: &str = include_str!("../../templates/graph.dot.tmpl");
const HTML_TEMPLATE: &str = include_str!("../../templates/graph.html.tmpl");

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Graphviz DOT (default)
    #[default]
    Dot,
    /// Standalone interactive HTML page
    Html,
}

impl OutputFormat {
    /// Resolve a format tag such as "dot" or "html"
    pub fn from_tag(tag: &str) -> Result<Self, VizError> {
        match tag {
            "dot" => Ok(Self::Dot),
            "html" => Ok(Self::Html),
            other => Err(VizError::unsupported_format(other)),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Html => "html",
        }
    }

    /// Escaping applied to substituted values
    pub fn escape(self) -> Escape {
        match self {
            Self::Dot => Escape::Dot,
            Self::Html => Escape::Html,
        }
    }

    /// The built-in template for this format
    pub fn default_template(self) -> (&'static str, &'static str) {
        match self {
            Self::Dot => ("graph.dot.tmpl", DOT_TEMPLATE),
            Self::Html => ("graph.html.tmpl", HTML_TEMPLATE),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Serializes a completed graph into text
pub trait Renderer {
    fn render(&self, graph: &Graph) -> Result<String, VizError>;
}

/// Renderer backed by a parsed template
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    format: OutputFormat,
    template: Template,
}

impl TemplateRenderer {
    /// Renderer using the built-in template for `format`
    pub fn for_format(format: OutputFormat) -> Result<Self, VizError> {
        let (name, source) = format.default_template();
        Self::with_template(format, name, source)
    }

    /// Renderer using the given template text
    pub fn with_template(format: OutputFormat, name: &str, source: &str) -> Result<Self, VizError> {
        Ok(Self {
            format,
            template: Template::parse(name, source)?,
        })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, graph: &Graph) -> Result<String, VizError> {
        let context = context::build(graph, self.template.name())?;
        self.template.render(&context, self.format.escape())
    }
}
