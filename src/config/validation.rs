//! Configuration validation
//!
//! Problems in modviz.toml are reported before any input is read.

use std::path::Path;

use super::ModvizConfig;
use crate::error::VizError;
use crate::render::OutputFormat;

/// Validate the entire modviz configuration
pub fn validate_config(config: &ModvizConfig) -> Result<(), VizError> {
    if let Some(tag) = config.output.format.as_deref() {
        OutputFormat::from_tag(tag)?;
    }

    validate_template_path("dot", config.templates.dot.as_deref())?;
    validate_template_path("html", config.templates.html.as_deref())?;

    Ok(())
}

fn validate_template_path(key: &str, path: Option<&Path>) -> Result<(), VizError> {
    match path {
        Some(path) if path.as_os_str().is_empty() => Err(VizError::config_error(format!(
            "[templates] {} must not be an empty path",
            key
        ))),
        _ => Ok(()),
    }
}
