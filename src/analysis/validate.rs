use super::is_weakly_connected;
use crate::graph::{Graph, NodeKind};
use std::fmt;

/// An advisory finding about a graph's shape. Violations never stop a
/// pipeline; they are reported alongside its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    NoNodes,
    NotConnected,
    NoStart,
    MultipleStarts(Vec<String>),
    NoEnd,
    Untyped(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NoNodes => write!(f, "Graph has no nodes"),
            Violation::NotConnected => write!(f, "Graph is not connected"),
            Violation::NoStart => write!(f, "Graph has no start node"),
            Violation::MultipleStarts(ids) => {
                let quoted: Vec<String> = ids.iter().map(|id| format!("'{}'", id)).collect();
                write!(f, "Graph has multiple start nodes: [{}]", quoted.join(", "))
            }
            Violation::NoEnd => write!(f, "Graph has no end node"),
            Violation::Untyped(id) => write!(f, "Node {} has no type attribute", id),
        }
    }
}

/// Checks the flowchart conventions: at least one node, weak connectivity,
/// exactly one start, at least one end, every node typed.
pub fn validate(graph: &Graph) -> Vec<Violation> {
    let mut violations = Vec::new();

    if graph.is_empty() {
        violations.push(Violation::NoNodes);
    } else if !is_weakly_connected(graph) {
        violations.push(Violation::NotConnected);
    }

    let starts: Vec<String> = graph
        .nodes()
        .filter(|n| n.is(NodeKind::Start))
        .map(|n| n.id().to_string())
        .collect();
    match starts.len() {
        0 => violations.push(Violation::NoStart),
        1 => {}
        _ => violations.push(Violation::MultipleStarts(starts)),
    }

    if graph.count_kind(NodeKind::End) == 0 {
        violations.push(Violation::NoEnd);
    }

    violations.extend(
        graph
            .nodes()
            .filter(|n| n.kind.is_none())
            .map(|n| Violation::Untyped(n.id().to_string())),
    );

    violations
}

pub fn is_valid(graph: &Graph) -> bool {
    validate(graph).is_empty()
}
