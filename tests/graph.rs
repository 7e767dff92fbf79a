//! Tests for the flow-graph model and its neutral form.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use zukei::graph::NeutralNode;
use zukei::prelude::*;

#[test]
fn test_insertion_order_is_kept() {
    let graph = diamond();
    let ids: Vec<&str> = graph.nodes().map(Node::id).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
    assert_eq!(targets(&graph, "a"), vec!["b", "c"]);
    assert_eq!(graph.predecessors("d"), vec!["b", "c"]);
}

#[test]
fn test_duplicate_node_is_rejected() {
    let mut graph = diamond();
    let err = graph
        .add_node(Node::new("a", NodeKind::Process, "again"))
        .unwrap_err();
    assert_eq!(err, GraphError::DuplicateNode("a".to_string()));
    assert_eq!(graph.node_count(), 4);
}

#[test]
fn test_dangling_edge_is_rejected() {
    let mut graph = diamond();
    let err = graph.connect("a", "missing").unwrap_err();
    assert_eq!(
        err,
        GraphError::DanglingEdge {
            source_id: "a".to_string(),
            target_id: "missing".to_string(),
        }
    );
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn test_parallel_edges_count_separately() {
    let mut graph = diamond();
    graph.connect("b", "d").unwrap();
    assert_eq!(graph.out_degree("b"), 2);
    assert_eq!(graph.in_degree("d"), 3);
    assert_eq!(graph.successors("b"), vec!["d", "d"]);
}

#[test]
fn test_neutral_round_trip_keeps_unknown_attributes() {
    let mut graph = Graph::new();
    let mut start = Node::new("s", NodeKind::Start, "Начало").with_position(Point::new(10.0, 20.5));
    start.extra.insert("color".to_string(), json!("green"));
    graph.add_node(start).unwrap();
    graph.add_node(Node::untyped("x", "что-то")).unwrap();
    let mut edge = Edge::labeled("s", "x", "Да");
    edge.condition = Some(Condition::True);
    edge.extra.insert("weight".to_string(), json!(2));
    graph.add_edge(edge).unwrap();

    let json = graph.to_neutral().to_json_pretty().unwrap();
    let restored = Graph::from_neutral(NeutralGraph::from_json(&json).unwrap()).unwrap();

    assert_eq!(restored, graph);
    assert_eq!(restored.node("s").unwrap().extra["color"], json!("green"));
    assert_eq!(restored.node("x").unwrap().kind, None);
}

#[test]
fn test_graph_serializes_as_neutral_form() {
    let graph = chain(&[("s", NodeKind::Start, "Начало"), ("e", NodeKind::End, "Конец")]);
    let value = serde_json::to_value(&graph).unwrap();
    assert_eq!(
        value,
        json!({
            "nodes": [
                {"id": "s", "type": "start", "label": "Начало"},
                {"id": "e", "type": "end", "label": "Конец"}
            ],
            "edges": [{"source": "s", "target": "e"}]
        })
    );

    let parsed: Graph = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, graph);
}

#[test]
fn test_invalid_type_attribute_is_reported() {
    let neutral = NeutralGraph {
        nodes: vec![NeutralNode {
            id: "n".to_string(),
            attrs: json!({"type": "cloud"}).as_object().unwrap().clone(),
        }],
        edges: vec![],
    };
    let err = Graph::from_neutral(neutral).unwrap_err();
    assert!(matches!(err, GraphError::InvalidAttribute { ref key, .. } if key == "type"));
}

#[test]
fn test_neutral_edge_to_unknown_node_fails() {
    let json = r#"{"nodes": [{"id": "a"}], "edges": [{"source": "a", "target": "b"}]}"#;
    let err = Graph::from_neutral(NeutralGraph::from_json(json).unwrap()).unwrap_err();
    assert!(matches!(err, GraphError::DanglingEdge { .. }));
}

#[test]
fn test_every_graph_error_has_a_source() {
    let mut graph = diamond();
    let neutral = NeutralGraph {
        nodes: vec![NeutralNode {
            id: "n".to_string(),
            attrs: json!({"type": "cloud"}).as_object().unwrap().clone(),
        }],
        edges: vec![],
    };
    let errors = [
        graph.add_node(Node::new("a", NodeKind::Process, "")).unwrap_err(),
        graph.connect("a", "missing").unwrap_err(),
        Graph::from_neutral(neutral).unwrap_err(),
    ];

    // Adding a variant breaks this match until an operation produces it.
    let names: Vec<&str> = errors
        .iter()
        .map(|err| match err {
            GraphError::DuplicateNode(_) => "duplicate",
            GraphError::DanglingEdge { .. } => "dangling",
            GraphError::InvalidAttribute { .. } => "attribute",
        })
        .collect();
    assert_eq!(names, vec!["duplicate", "dangling", "attribute"]);
}

#[test]
fn test_merge_replaces_attributes_and_keeps_edges() {
    let first = chain(&[("a", NodeKind::Start, "Начало"), ("b", NodeKind::Process, "старое")]);
    let second = chain(&[("b", NodeKind::Decision, "новое"), ("c", NodeKind::End, "Конец")]);

    let merged = first.merge(second).unwrap();

    let ids: Vec<&str> = merged.nodes().map(Node::id).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    let b = merged.node("b").unwrap();
    assert_eq!(b.label, "новое");
    assert_eq!(b.kind, Some(NodeKind::Decision));
    assert_eq!(merged.edge_count(), 2);
    assert_eq!(targets(&merged, "b"), vec!["c"]);
}
