//! Visualization pipeline
//!
//! ```text
//! input lines -> Graph -> Renderer -> output text
//! ```
//!
//! The output sink is only opened once rendering succeeded, so a failed run
//! leaves an existing output file untouched.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{IoResultExt, VizError};
use crate::graph::Graph;
use crate::render::{Renderer, TemplateRenderer};
use crate::utils::Logger;

/// Turns module requirement lines into a rendered graph
pub struct Visualizer<'a> {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    renderer: TemplateRenderer,
    logger: &'a dyn Logger,
}

impl<'a> Visualizer<'a> {
    pub fn new(settings: &Settings, renderer: TemplateRenderer, logger: &'a dyn Logger) -> Self {
        Self {
            input: settings.input.clone(),
            output: settings.output.clone(),
            renderer,
            logger,
        }
    }

    /// Run the whole pipeline against the configured input and output
    pub fn visualize(&self) -> Result<(), VizError> {
        self.logger.info("Starting visualization");

        let rendered = match &self.input {
            Some(path) => {
                let file = File::open(path).with_operation("open input file", Some(path.as_path()))?;
                self.process(BufReader::new(file))?
            }
            None => self.process(io::stdin().lock())?,
        };

        self.logger.info("Writing output");
        match &self.output {
            Some(path) => {
                let file = File::create(path).with_operation("create output file", Some(path.as_path()))?;
                write_output(file, &rendered, Some(path.as_path()))
            }
            None => write_output(io::stdout().lock(), &rendered, None),
        }
    }

    /// Build the graph from `reader` and render it
    pub fn process<R: BufRead>(&self, reader: R) -> Result<String, VizError> {
        self.logger.info("Building graph");
        let graph = Graph::from_reader(reader)?;

        let stats = graph.stats();
        self.logger.debug(&format!(
            "{} edges, {} nodes, {} module paths, {} unselected versions",
            stats.edge_count, stats.node_count, stats.path_count, stats.unselected_count
        ));
        if graph.is_empty() {
            self.logger.warn("Input contained no dependencies");
        } else if graph.root().is_none() {
            self.logger.warn("Input contained no root module (a node without '@version')");
        }

        self.logger
            .info(&format!("Rendering {} output", self.renderer.format()));
        self.renderer.render(&graph)
    }
}

fn write_output<W: Write>(mut sink: W, rendered: &str, path: Option<&Path>) -> Result<(), VizError> {
    sink.write_all(rendered.as_bytes())
        .and_then(|()| sink.flush())
        .with_operation("write output", path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingLogger {
        lines: RefCell<Vec<String>>,
    }

    impl Logger for RecordingLogger {
        fn debug(&self, message: &str) {
            self.lines.borrow_mut().push(format!("debug {}", message));
        }

        fn info(&self, message: &str) {
            self.lines.borrow_mut().push(format!("info {}", message));
        }

        fn warn(&self, message: &str) {
            self.lines.borrow_mut().push(format!("warn {}", message));
        }
    }

    fn settings(input: Option<PathBuf>, output: Option<PathBuf>, format: OutputFormat) -> Settings {
        Settings {
            input,
            output,
            format,
            template: None,
        }
    }

    #[test]
    fn test_process_renders_dot() {
        let logger = RecordingLogger::default();
        let renderer = TemplateRenderer::for_format(OutputFormat::Dot).unwrap();
        let visualizer = Visualizer::new(&settings(None, None, OutputFormat::Dot), renderer, &logger);

        let output = visualizer
            .process("app a@v1.0.0\na@v1.0.0 b@v1.0.0\n".as_bytes())
            .unwrap();

        assert!(output.contains("\"app\" -> \"a@v1.0.0\";"));
        let lines = logger.lines.borrow();
        assert!(lines.contains(&"info Building graph".to_string()));
        assert!(lines.contains(&"debug 2 edges, 3 nodes, 2 module paths, 0 unselected versions".to_string()));
        assert!(lines.contains(&"info Rendering dot output".to_string()));
        assert!(!lines.iter().any(|line| line.starts_with("warn")));
    }

    #[test]
    fn test_process_warns_without_root() {
        let logger = RecordingLogger::default();
        let renderer = TemplateRenderer::for_format(OutputFormat::Dot).unwrap();
        let visualizer = Visualizer::new(&settings(None, None, OutputFormat::Dot), renderer, &logger);

        visualizer.process("a@v1.0.0 b@v1.0.0\n".as_bytes()).unwrap();

        assert!(logger
            .lines
            .borrow()
            .iter()
            .any(|line| line.starts_with("warn Input contained no root module")));
    }

    #[test]
    fn test_visualize_file_to_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("graph.txt");
        let output = dir.path().join("graph.html");
        fs::write(&input, "app a@v1.0.0\napp a@v1.1.0\n").unwrap();

        let logger = RecordingLogger::default();
        let renderer = TemplateRenderer::for_format(OutputFormat::Html).unwrap();
        let visualizer = Visualizer::new(
            &settings(Some(input), Some(output.clone()), OutputFormat::Html),
            renderer,
            &logger,
        );
        visualizer.visualize().unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"unselected\":[\"a@v1.0.0\"]"));
        assert_eq!(
            logger.lines.borrow().first().map(String::as_str),
            Some("info Starting visualization")
        );
    }

    #[test]
    fn test_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let logger = RecordingLogger::default();
        let renderer = TemplateRenderer::for_format(OutputFormat::Dot).unwrap();
        let visualizer = Visualizer::new(
            &settings(Some(dir.path().join("missing.txt")), None, OutputFormat::Dot),
            renderer,
            &logger,
        );

        let err = visualizer.visualize().unwrap_err();
        assert!(err.to_string().starts_with("failed to open input file"));
    }

    #[test]
    fn test_malformed_input_leaves_output_untouched() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("graph.txt");
        let output = dir.path().join("graph.dot");
        fs::write(&input, "app a@v1.0.0\nnot-a-pair\n").unwrap();
        fs::write(&output, "previous").unwrap();

        let logger = RecordingLogger::default();
        let renderer = TemplateRenderer::for_format(OutputFormat::Dot).unwrap();
        let visualizer = Visualizer::new(
            &settings(Some(input), Some(output.clone()), OutputFormat::Dot),
            renderer,
            &logger,
        );

        let err = visualizer.visualize().unwrap_err();
        assert!(matches!(err, VizError::InputShape { line_number: 2, .. }));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }
}
