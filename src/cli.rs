//! CLI argument parsing using clap derive macros

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ModvizConfig, Overrides, Settings};
use crate::error::VizError;
use crate::render::OutputFormat;
use crate::utils::{terminal, Logger};
use crate::visualizer::Visualizer;

/// modviz - Go module dependency visualizer
///
/// Reads `go mod graph` output and renders it as a Graphviz DOT document or a
/// standalone interactive HTML page. Superseded module versions are marked.
#[derive(Parser, Debug)]
#[command(name = "modviz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to input file. Reads from stdin if unset
    #[arg(short, long, env = "MODVIZ_INPUT")]
    pub input: Option<PathBuf>,

    /// Path to output file. Writes to stdout if unset
    #[arg(short, long, env = "MODVIZ_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format [default: dot]
    #[arg(short, long, value_enum, env = "MODVIZ_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Configuration file (defaults to ./modviz.toml when present)
    #[arg(short, long, env = "MODVIZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Custom template for the selected output format
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Execute the visualization described by the arguments
    pub fn execute(self, logger: &dyn Logger) -> Result<(), VizError> {
        if self.no_color {
            terminal::disable_colors();
        }

        let file = self.load_config()?;
        if let Some(path) = &self.config {
            logger.debug(&format!("Using configuration {}", path.display()));
        }

        let overrides = Overrides {
            input: self.input,
            output: self.output,
            format: self.format,
            template: self.template,
        };
        let settings = Settings::resolve(overrides, file.as_ref())?;
        let renderer = settings.renderer()?;

        Visualizer::new(&settings, renderer, logger).visualize()
    }

    /// Explicit `--config` must exist; otherwise `modviz.toml` is picked up if present
    fn load_config(&self) -> Result<Option<ModvizConfig>, VizError> {
        match &self.config {
            Some(path) => ModvizConfig::load_from_path(path).map(Some),
            None => {
                let cwd = std::env::current_dir()
                    .map_err(|e| VizError::config_error_with_source("cannot determine current directory", e.into()))?;
                ModvizConfig::discover(&cwd)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "modviz", "--input", "in.txt", "-o", "out.html", "--format", "html", "-v",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("in.txt")));
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
        assert_eq!(cli.format, Some(OutputFormat::Html));
        assert!(cli.verbose);
        assert!(!cli.no_color);
    }

    #[test]
    fn test_unknown_format_rejected_by_parser() {
        let err = Cli::try_parse_from(["modviz", "--format", "svg"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
