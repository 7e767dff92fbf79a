//! Normalizes node types and enriches a graph with structural attributes.
//!
//! Stages run in a fixed order over an owned graph:
//!
//! 1. each node is retyped from its label by [`lexicon::SHAPE_KEYWORDS`],
//! 2. any node with more than one outgoing edge becomes a decision,
//! 3. levels and in/out-degrees are recorded on every node,
//! 4. the two edges of a two-way decision are tagged `true` and `false`.

pub mod lexicon;

use crate::analysis::{has_cycle, level_positions};
use crate::graph::{Condition, Graph, NodeKind};
use lexicon::SHAPE_KEYWORDS;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Overall control-flow shape of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowType {
    Sequential,
    Branching,
    Cyclic,
}

impl FlowType {
    pub fn as_str(self) -> &'static str {
        match self {
            FlowType::Sequential => "sequential",
            FlowType::Branching => "branching",
            FlowType::Cyclic => "cyclic",
        }
    }
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The enriched graph together with its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub graph: Graph,
    pub flow_type: FlowType,
    /// `nodes + edges + 2 * decisions`
    pub complexity: usize,
}

impl Interpretation {
    /// A one-paragraph Russian summary: the flow type, then one phrase per
    /// start, end, decision and process node in level order.
    pub fn narrate(&self) -> String {
        let mut parts = vec![
            match self.flow_type {
                FlowType::Sequential => "Алгоритм выполняется последовательно.",
                FlowType::Branching => "Алгоритм содержит ветвления и условия.",
                FlowType::Cyclic => "Алгоритм содержит циклы.",
            }
            .to_string(),
        ];

        let mut nodes: Vec<_> = self.graph.nodes().collect();
        nodes.sort_by_key(|n| n.level.unwrap_or(0));
        for node in nodes {
            let prefix = match node.kind_or_default() {
                NodeKind::Start => "Начало",
                NodeKind::End => "Конец",
                NodeKind::Decision => "Проверка условия",
                NodeKind::Process => "Выполнение",
                NodeKind::Data | NodeKind::Subprocess => continue,
            };
            parts.push(format!("{}: {}", prefix, node.label));
        }

        parts.join(" ")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticInterpreter;

impl SemanticInterpreter {
    pub fn new() -> Self {
        Self
    }

    pub fn interpret(&self, mut graph: Graph) -> Interpretation {
        debug!(nodes = graph.node_count(), "interpreting graph");

        classify_node_types(&mut graph);
        record_structure(&mut graph);
        tag_decision_edges(&mut graph);

        let flow_type = flow_type(&graph);
        let complexity = complexity(&graph);
        info!(%flow_type, complexity, "graph interpretation complete");

        Interpretation {
            graph,
            flow_type,
            complexity,
        }
    }
}

fn classify_node_types(graph: &mut Graph) {
    let branching: Vec<bool> = graph
        .nodes()
        .map(|n| graph.out_degree(n.id()) > 1)
        .collect();

    for (node, branches) in graph.nodes_mut().zip(branching) {
        if let Some(kind) = SHAPE_KEYWORDS.classify(&node.label) {
            debug!(node = node.id(), %kind, "classified from label");
            node.kind = Some(kind);
        }
        if branches && !node.is(NodeKind::Decision) {
            debug!(node = node.id(), "classified as decision from branching");
            node.kind = Some(NodeKind::Decision);
        }
    }
}

fn record_structure(graph: &mut Graph) {
    let levels = level_positions(graph);
    let degrees: Vec<(usize, usize)> = graph
        .nodes()
        .map(|n| (graph.in_degree(n.id()), graph.out_degree(n.id())))
        .collect();

    for ((node, level), (in_degree, out_degree)) in graph.nodes_mut().zip(levels).zip(degrees) {
        node.level = Some(level);
        node.in_degree = Some(in_degree);
        node.out_degree = Some(out_degree);
    }
}

fn tag_decision_edges(graph: &mut Graph) {
    let two_way: Vec<(usize, usize)> = graph
        .nodes()
        .filter(|n| n.is(NodeKind::Decision))
        .filter_map(|n| match graph.outgoing_edges(n.id()) {
            &[first, second] => Some((first, second)),
            _ => None,
        })
        .collect();

    for (first, second) in two_way {
        if let Some(edge) = graph.edge_mut(first) {
            edge.condition = Some(Condition::True);
        }
        if let Some(edge) = graph.edge_mut(second) {
            edge.condition = Some(Condition::False);
        }
    }
}

fn flow_type(graph: &Graph) -> FlowType {
    if has_cycle(graph) {
        FlowType::Cyclic
    } else if graph.nodes().any(|n| graph.out_degree(n.id()) > 1) {
        FlowType::Branching
    } else {
        FlowType::Sequential
    }
}

fn complexity(graph: &Graph) -> usize {
    graph.node_count() + graph.edge_count() + 2 * graph.count_kind(NodeKind::Decision)
}
