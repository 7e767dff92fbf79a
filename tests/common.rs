//! Common test utilities for building graphs and detector output.
use zukei::prelude::*;

/// The three-sentence description used across the parser, codegen and
/// pipeline tests.
#[allow(dead_code)]
pub const BRANCHING_TEXT: &str = "Начало. Если A то B иначе C. Конец.";

/// A diamond: `a(start) -> b, a -> c, b -> d(end), c -> d`.
#[allow(dead_code)]
pub fn diamond() -> Graph {
    let mut graph = Graph::new();
    graph.add_node(Node::new("a", NodeKind::Start, "Начало")).unwrap();
    graph.add_node(Node::new("b", NodeKind::Process, "Шаг B")).unwrap();
    graph.add_node(Node::new("c", NodeKind::Process, "Шаг C")).unwrap();
    graph.add_node(Node::new("d", NodeKind::End, "Конец")).unwrap();
    for (source, target) in [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")] {
        graph.connect(source, target).unwrap();
    }
    graph
}

/// A linear chain of `(id, kind, label)` nodes connected in order.
#[allow(dead_code)]
pub fn chain(nodes: &[(&str, NodeKind, &str)]) -> Graph {
    let mut graph = Graph::new();
    for &(id, kind, label) in nodes {
        graph.add_node(Node::new(id, kind, label)).unwrap();
    }
    for pair in nodes.windows(2) {
        graph.connect(pair[0].0, pair[1].0).unwrap();
    }
    graph
}

/// A 120x40 box centered on `(cx, cy)` with confidence 0.9.
#[allow(dead_code)]
pub fn bbox(cx: f64, cy: f64, kind: NodeKind) -> BoundingBox {
    BoundingBox::new(cx - 60.0, cy - 20.0, cx + 60.0, cy + 20.0, 0.9, kind)
}

#[allow(dead_code)]
pub fn texts(entries: &[(usize, &str)]) -> RecognizedTexts {
    entries
        .iter()
        .map(|&(index, text)| (index, RecognizedText::from(text)))
        .collect()
}

/// Ids of the targets of the edges leaving `id`.
#[allow(dead_code)]
pub fn targets(graph: &Graph, id: &str) -> Vec<String> {
    graph
        .successors(id)
        .into_iter()
        .map(String::from)
        .collect()
}
