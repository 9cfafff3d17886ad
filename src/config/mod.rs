//! Runtime settings
//!
//! Settings are merged from, in order of precedence: command-line flags
//! (and their environment variables), the configuration file, and defaults.

pub mod modviz_toml;
pub mod validation;

use std::path::PathBuf;

pub use modviz_toml::ModvizConfig;

use crate::error::{IoResultExt, VizError};
use crate::render::{OutputFormat, TemplateRenderer};

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub template: Option<PathBuf>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Input file; stdin when unset
    pub input: Option<PathBuf>,

    /// Output file; stdout when unset
    pub output: Option<PathBuf>,

    pub format: OutputFormat,

    /// Custom template for `format`; the built-in one when unset
    pub template: Option<PathBuf>,
}

impl Settings {
    /// Merge command-line overrides with an optional configuration file
    pub fn resolve(overrides: Overrides, file: Option<&ModvizConfig>) -> Result<Self, VizError> {
        let file_format = match file {
            Some(config) => config.format()?,
            None => None,
        };
        let format = overrides.format.or(file_format).unwrap_or_default();

        let template = overrides
            .template
            .or_else(|| file.and_then(|config| config.template_path(format)));

        Ok(Self {
            input: overrides.input,
            output: overrides.output,
            format,
            template,
        })
    }

    /// Build the renderer these settings ask for
    pub fn renderer(&self) -> Result<TemplateRenderer, VizError> {
        match &self.template {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_operation("read template", Some(path.as_path()))?;
                let name = path.display().to_string();
                TemplateRenderer::with_template(self.format, &name, &source)
            }
            None => TemplateRenderer::for_format(self.format),
        }
    }
}
