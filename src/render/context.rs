//! Template context built from a graph

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use crate::error::{TemplatePhase, VizError};
use crate::graph::{Graph, NodeId};

/// A node as seen by templates
#[derive(Debug, Serialize)]
struct NodeView<'a> {
    id: &'a str,
    path: &'a str,
    version: Option<&'a str>,
    unselected: bool,
    root: bool,
}

impl<'a> NodeView<'a> {
    fn new(graph: &Graph, id: &'a str) -> Self {
        let NodeId { path, version } = NodeId::parse(id);
        Self {
            id,
            path,
            version,
            unselected: graph.is_unselected(id),
            root: graph.root() == Some(id),
        }
    }
}

#[derive(Debug, Serialize)]
struct EdgeView<'a> {
    src: NodeView<'a>,
    dst: NodeView<'a>,
}

#[derive(Debug, Serialize)]
struct SelectedView<'a> {
    path: &'a str,
    version: &'a str,
}

/// Raw graph data for client-side scripts
#[derive(Debug, Serialize)]
struct GraphData<'a> {
    root: Option<&'a str>,
    edges: Vec<[&'a str; 2]>,
    selected: &'a BTreeMap<String, String>,
    unselected: &'a BTreeSet<String>,
}

#[derive(Debug, Serialize)]
struct TemplateContext<'a> {
    root: Option<&'a str>,
    edges: Vec<EdgeView<'a>>,
    nodes: Vec<NodeView<'a>>,
    selected: Vec<SelectedView<'a>>,
    unselected: Vec<&'a str>,
    graph_json: String,
}

/// Build the JSON context every template renders from
pub fn build(graph: &Graph, template_name: &str) -> Result<Value, VizError> {
    let to_error = |e: serde_json::Error| {
        VizError::template(template_name, TemplatePhase::Execute, e.to_string())
    };

    let data = GraphData {
        root: graph.root(),
        edges: graph
            .edges()
            .iter()
            .map(|edge| [edge.src.as_str(), edge.dst.as_str()])
            .collect(),
        selected: graph.selected(),
        unselected: graph.unselected(),
    };
    // Keep "</script>" and friends from terminating an embedding script element
    let graph_json = serde_json::to_string(&data)
        .map_err(to_error)?
        .replace('<', "\\u003c");

    let context = TemplateContext {
        root: graph.root(),
        edges: graph
            .edges()
            .iter()
            .map(|edge| EdgeView {
                src: NodeView::new(graph, &edge.src),
                dst: NodeView::new(graph, &edge.dst),
            })
            .collect(),
        nodes: graph
            .nodes()
            .into_iter()
            .map(|id| NodeView::new(graph, id))
            .collect(),
        selected: graph
            .selected()
            .iter()
            .map(|(path, version)| SelectedView { path, version })
            .collect(),
        unselected: graph.unselected().iter().map(String::as_str).collect(),
        graph_json,
    };

    serde_json::to_value(&context).map_err(to_error)
}
