//! The contract with the raster layout engine.
//!
//! Layout and rasterization live outside this crate. A [`DiagramRenderer`]
//! receives a [`RenderView`] of the graph and a [`LayoutDirection`] and
//! returns image bytes. [`to_dot`] produces the Graphviz source such an
//! engine consumes.

use crate::error::RenderError;
use crate::graph::{Graph, NodeKind, Point};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    Vertical,
    Horizontal,
    #[default]
    Auto,
}

impl LayoutDirection {
    /// Graphviz `rankdir`. `Auto` lays out top to bottom.
    pub fn rankdir(self) -> &'static str {
        match self {
            LayoutDirection::Vertical | LayoutDirection::Auto => "TB",
            LayoutDirection::Horizontal => "LR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub shape: &'static str,
    pub fill: &'static str,
    pub stroke: &'static str,
}

/// Shape and colors per node type. Subprocesses are drawn like processes.
pub fn node_style(kind: NodeKind) -> NodeStyle {
    let (shape, fill, stroke) = match kind {
        NodeKind::Start => ("ellipse", "#90EE90", "#228B22"),
        NodeKind::End => ("ellipse", "#FFB6C1", "#DC143C"),
        NodeKind::Process | NodeKind::Subprocess => ("box", "#87CEEB", "#4682B4"),
        NodeKind::Decision => ("diamond", "#FFD700", "#FF8C00"),
        NodeKind::Data => ("parallelogram", "#DDA0DD", "#9370DB"),
    };
    NodeStyle {
        shape,
        fill,
        stroke,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    pub position: Option<Point>,
    pub style: NodeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEdge {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// A read-only snapshot of what a renderer needs from a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderView {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderView {
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .map(|n| {
                let kind = n.kind_or_default();
                RenderNode {
                    id: n.id().to_string(),
                    kind,
                    label: n.label.clone(),
                    position: n.position,
                    style: node_style(kind),
                }
            })
            .collect();
        let edges = graph
            .edges()
            .iter()
            .map(|e| RenderEdge {
                source: e.source().to_string(),
                target: e.target().to_string(),
                label: e.label_str().to_string(),
            })
            .collect();
        Self { nodes, edges }
    }
}

/// Graph in, image bytes out.
pub trait DiagramRenderer: Send + Sync {
    fn render(&self, view: &RenderView, direction: LayoutDirection) -> Result<Vec<u8>, RenderError>;
}

/// Returns the DOT source itself as the "image". Useful where no layout
/// engine is linked: the output can be piped to `dot -Tpng`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

impl DiagramRenderer for DotRenderer {
    fn render(&self, view: &RenderView, direction: LayoutDirection) -> Result<Vec<u8>, RenderError> {
        let dot = to_dot(view, direction).map_err(|e| RenderError::Backend(e.to_string()))?;
        Ok(dot.into_bytes())
    }
}

pub const DEFAULT_DPI: u32 = 150;

/// Graphviz source for `view`.
pub fn to_dot(view: &RenderView, direction: LayoutDirection) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "digraph flowchart {{")?;
    writeln!(
        out,
        "    graph [dpi=\"{}\", rankdir=\"{}\", bgcolor=\"white\", splines=\"ortho\"];",
        DEFAULT_DPI,
        direction.rankdir()
    )?;
    for node in &view.nodes {
        writeln!(
            out,
            "    \"{}\" [label=\"{}\", shape=\"{}\", style=\"filled\", fillcolor=\"{}\", color=\"{}\"];",
            escape(&node.id),
            escape(&node.label),
            node.style.shape,
            node.style.fill,
            node.style.stroke
        )?;
    }
    for edge in &view.edges {
        writeln!(
            out,
            "    \"{}\" -> \"{}\" [label=\"{}\"];",
            escape(&edge.source),
            escape(&edge.target),
            escape(&edge.label)
        )?;
    }
    writeln!(out, "}}")?;
    Ok(out)
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    #[test]
    fn dot_uses_style_table_and_escapes_labels() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("a", NodeKind::Start, "say \"hi\"")).unwrap();
        graph.add_node(Node::new("b", NodeKind::Decision, "x?")).unwrap();
        graph.add_edge(Edge::labeled("a", "b", "go")).unwrap();

        let dot = to_dot(&RenderView::from_graph(&graph), LayoutDirection::Horizontal).unwrap();
        assert!(dot.contains("rankdir=\"LR\""));
        assert!(dot.contains("\"a\" [label=\"say \\\"hi\\\"\", shape=\"ellipse\""));
        assert!(dot.contains("shape=\"diamond\", style=\"filled\", fillcolor=\"#FFD700\""));
        assert!(dot.contains("\"a\" -> \"b\" [label=\"go\"];"));
    }

    #[test]
    fn auto_layout_is_vertical() {
        assert_eq!(LayoutDirection::Auto.rankdir(), "TB");
        assert_eq!(LayoutDirection::Horizontal.rankdir(), "LR");
    }
}
