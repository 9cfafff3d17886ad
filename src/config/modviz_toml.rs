//! modviz.toml configuration parsing
//!
//! All sections are optional:
//!
//! ```toml
//! [output]
//! format = "html"
//!
//! [templates]
//! dot = "templates/custom.dot.tmpl"
//! html = "templates/custom.html.tmpl"
//! ```
//!
//! Relative template paths are resolved against the directory holding the
//! configuration file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use super::validation;
use crate::error::VizError;
use crate::render::OutputFormat;

/// Root configuration from modviz.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModvizConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Custom templates per format
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Directory of the file this was loaded from
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// `[output]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Format tag: "dot" or "html"
    pub format: Option<String>,
}

/// `[templates]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    pub dot: Option<PathBuf>,
    pub html: Option<PathBuf>,
}

impl ModvizConfig {
    /// Default configuration file name
    pub const FILE_NAME: &'static str = "modviz.toml";

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, VizError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))
            .map_err(|e| VizError::config_error_with_source(format!("cannot load {}", path.display()), e))?;

        let mut config = Self::parse(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Load `modviz.toml` from `dir` if the file exists
    pub fn discover(dir: &Path) -> Result<Option<Self>, VizError> {
        let path = dir.join(Self::FILE_NAME);
        if path.is_file() {
            Self::load_from_path(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, VizError> {
        let config: Self = toml::from_str(content)
            .context("Failed to parse modviz.toml")
            .map_err(|e| VizError::config_error_with_source("invalid TOML", e))?;

        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Output format named in the file, if any
    pub fn format(&self) -> Result<Option<OutputFormat>, VizError> {
        self.output
            .format
            .as_deref()
            .map(OutputFormat::from_tag)
            .transpose()
    }

    /// Template path configured for `format`, resolved against the file's directory
    pub fn template_path(&self, format: OutputFormat) -> Option<PathBuf> {
        let path = match format {
            OutputFormat::Dot => self.templates.dot.as_ref(),
            OutputFormat::Html => self.templates.html.as_ref(),
        }?;

        match &self.base_dir {
            Some(base) if path.is_relative() => Some(base.join(path)),
            _ => Some(path.clone()),
        }
    }
}
