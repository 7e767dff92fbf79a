//! Natural-language descriptions of a graph.
//!
//! [`DescriptionRenderer`] builds a [`DescriptionContext`] and hands it to a
//! [`DescriptionTemplate`]. When no template is configured or the template
//! fails, a fixed Russian description is assembled instead.

mod jinja;

pub use jinja::JinjaTemplate;

use crate::error::TemplateError;
use crate::graph::{Graph, NodeKind};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Renders a description from a prepared context.
pub trait DescriptionTemplate: Send + Sync {
    fn render(&self, context: &DescriptionContext) -> Result<String, TemplateError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSummary {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// What a template sees. Untyped nodes count as `process` and nodes without
/// a level as level 0. Node lists are ordered by level, ties kept in graph
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionContext {
    pub nodes: Vec<NodeSummary>,
    pub edges: Vec<EdgeSummary>,
    pub start_nodes: Vec<NodeSummary>,
    pub end_nodes: Vec<NodeSummary>,
    pub decision_nodes: Vec<NodeSummary>,
    pub process_nodes: Vec<NodeSummary>,
    pub num_nodes: usize,
    pub num_edges: usize,
    pub has_branches: bool,
}

impl DescriptionContext {
    pub fn from_graph(graph: &Graph) -> Self {
        let mut nodes: Vec<NodeSummary> = graph
            .nodes()
            .map(|n| NodeSummary {
                id: n.id().to_string(),
                kind: n.kind_or_default(),
                label: n.label.clone(),
                level: n.level.unwrap_or(0),
            })
            .collect();
        nodes.sort_by_key(|n| n.level);

        let edges: Vec<EdgeSummary> = graph
            .edges()
            .iter()
            .map(|e| EdgeSummary {
                source: e.source().to_string(),
                target: e.target().to_string(),
                label: e.label_str().to_string(),
            })
            .collect();

        let of_kind = |kind: NodeKind| -> Vec<NodeSummary> {
            nodes.iter().filter(|n| n.kind == kind).cloned().collect()
        };
        let start_nodes = of_kind(NodeKind::Start);
        let end_nodes = of_kind(NodeKind::End);
        let decision_nodes = of_kind(NodeKind::Decision);
        let process_nodes = of_kind(NodeKind::Process);

        Self {
            num_nodes: nodes.len(),
            num_edges: edges.len(),
            has_branches: !decision_nodes.is_empty(),
            nodes,
            edges,
            start_nodes,
            end_nodes,
            decision_nodes,
            process_nodes,
        }
    }
}

#[derive(Clone, Default)]
pub struct DescriptionRenderer {
    template: Option<Arc<dyn DescriptionTemplate>>,
}

impl DescriptionRenderer {
    /// A renderer that always uses the built-in description.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: Arc<dyn DescriptionTemplate>) -> Self {
        Self {
            template: Some(template),
        }
    }

    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }

    pub fn describe(&self, graph: &Graph) -> String {
        let context = DescriptionContext::from_graph(graph);
        if let Some(template) = &self.template {
            match template.render(&context) {
                Ok(text) => {
                    debug!("rendered description from template");
                    return text;
                }
                Err(e) => warn!(error = %e, "template rendering failed, using fallback"),
            }
        }
        fallback_description(&context)
    }
}

/// The built-in description: how the algorithm starts, one sentence per
/// process or decision node in level order, how it ends, and a note when it
/// branches. Nodes with empty labels are skipped.
pub fn fallback_description(context: &DescriptionContext) -> String {
    let mut parts = Vec::new();

    if let Some(start) = context.start_nodes.first() {
        parts.push(if start.label.is_empty() {
            "Алгоритм начинается.".to_string()
        } else {
            format!("Алгоритм начинается: {}.", start.label)
        });
    }

    for node in context.nodes.iter().filter(|n| !n.label.is_empty()) {
        match node.kind {
            NodeKind::Process => parts.push(format!("Выполняется: {}.", node.label)),
            NodeKind::Decision => parts.push(format!("Проверяется условие: {}.", node.label)),
            _ => {}
        }
    }

    if let Some(end) = context.end_nodes.first() {
        parts.push(if end.label.is_empty() {
            "Алгоритм завершается.".to_string()
        } else {
            format!("Алгоритм завершается: {}.", end.label)
        });
    }

    if context.has_branches {
        parts.push("Алгоритм содержит ветвления и условные переходы.".to_string());
    }

    parts.join(" ")
}
