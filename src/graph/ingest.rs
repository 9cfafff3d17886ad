//! Building a graph from `module requirement` lines

use std::io::BufRead;

use super::Graph;
use crate::error::{IoResultExt, VizError};

impl Graph {
    /// Build a graph from newline-delimited `module requirement` pairs.
    ///
    /// Blank lines are skipped. Any other line must split on a single space
    /// into exactly two non-empty nodes.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, VizError> {
        let mut graph = Graph::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line.with_operation("read input", None)?;
            if line.is_empty() {
                continue;
            }

            let (module, requirement) = parse_line(index + 1, &line)?;
            graph.add_node(module);
            graph.add_node(requirement);
            graph.add_edge(module, requirement);
        }

        Ok(graph)
    }
}

/// Split a line into its module and requirement nodes
///
/// Both nodes must be non-empty, so a leading or trailing space is an error
/// even though it still yields exactly two space-separated fields.
pub fn parse_line(line_number: usize, line: &str) -> Result<(&str, &str), VizError> {
    let mut parts = line.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(module), Some(requirement), None) if !module.is_empty() && !requirement.is_empty() => {
            Ok((module, requirement))
        }
        _ => Err(VizError::input_shape(line_number, line)),
    }
}
