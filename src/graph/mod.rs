//! Module dependency graph
//!
//! The graph records every `module -> requirement` edge in the order it was
//! seen and, per module path, which version is selected (the highest seen)
//! and which versions were superseded along the way.

pub mod ingest;
pub mod node;

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::version;

pub use node::NodeId;

/// A requirement edge: `src` requires `dst`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub src: String,
    pub dst: String,
}

/// Dependency graph with version selection state
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// The module being visualized (the last unversioned node seen)
    root: Option<String>,

    /// Edges in insertion order, duplicates included
    edges: Vec<Edge>,

    /// Module path -> latest version seen
    selected: BTreeMap<String, String>,

    /// `path@version` nodes superseded by a newer version of the same path
    unselected: BTreeSet<String>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph
    ///
    /// An unversioned node becomes the root (replacing any previous root).
    /// A versioned node takes part in version selection for its path.
    pub fn add_node(&mut self, node: &str) {
        let NodeId { path, version } = NodeId::parse(node);
        let Some(version) = version else {
            self.root = Some(node.to_string());
            return;
        };

        let Some(latest) = self.selected.get_mut(path) else {
            // First version of this path is necessarily the latest so far
            self.selected.insert(path.to_string(), version.to_string());
            return;
        };

        if latest.as_str() == version {
            return;
        }

        if version::compare(version, latest) == Ordering::Greater {
            let previous = std::mem::replace(latest, version.to_string());
            self.unselected.insert(node::versioned(path, &previous));
        } else {
            self.unselected.insert(node.to_string());
        }
    }

    /// Add an edge from `src` to `dst`
    pub fn add_edge(&mut self, src: &str, dst: &str) {
        self.edges.push(Edge {
            src: src.to_string(),
            dst: dst.to_string(),
        });
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Selected version per module path
    pub fn selected(&self) -> &BTreeMap<String, String> {
        &self.selected
    }

    /// Superseded `path@version` nodes
    pub fn unselected(&self) -> &BTreeSet<String> {
        &self.unselected
    }

    pub fn is_unselected(&self, node: &str) -> bool {
        self.unselected.contains(node)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.edges.is_empty()
    }

    /// Distinct nodes in first-appearance order, root first
    pub fn nodes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let endpoints = self
            .edges
            .iter()
            .flat_map(|edge| [edge.src.as_str(), edge.dst.as_str()]);

        self.root()
            .into_iter()
            .chain(endpoints)
            .filter(|node| seen.insert(*node))
            .collect()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            edge_count: self.edges.len(),
            node_count: self.nodes().len(),
            path_count: self.selected.len(),
            unselected_count: self.unselected.len(),
        }
    }
}

/// Statistics about a module graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    /// Number of edges, duplicates included
    pub edge_count: usize,

    /// Number of distinct nodes
    pub node_count: usize,

    /// Number of distinct versioned module paths
    pub path_count: usize,

    /// Number of superseded versions
    pub unselected_count: usize,
}
