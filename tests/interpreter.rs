//! Tests for semantic interpretation of flow graphs.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use zukei::prelude::*;

#[test]
fn test_two_node_loop_is_cyclic() {
    let mut graph = Graph::new();
    graph.add_node(Node::new("a", NodeKind::Process, "x")).unwrap();
    graph.add_node(Node::new("b", NodeKind::Process, "y")).unwrap();
    graph.connect("a", "b").unwrap();
    graph.connect("b", "a").unwrap();

    let interpretation = SemanticInterpreter::new().interpret(graph);
    assert_eq!(interpretation.flow_type, FlowType::Cyclic);
    assert_eq!(interpretation.complexity, 4);
}

#[test]
fn test_chain_is_sequential() {
    let graph = chain(&[
        ("s", NodeKind::Start, "Начало"),
        ("p", NodeKind::Process, "Шаг"),
        ("e", NodeKind::End, "Конец"),
    ]);
    let interpretation = SemanticInterpreter::new().interpret(graph);
    assert_eq!(interpretation.flow_type, FlowType::Sequential);
    assert_eq!(interpretation.complexity, 5);
    assert_eq!(
        interpretation.narrate(),
        "Алгоритм выполняется последовательно. Начало: Начало Выполнение: Шаг Конец: Конец"
    );
}

#[test]
fn test_branching_node_becomes_decision() {
    let mut graph = Graph::new();
    graph
        .add_node(Node::new("p", NodeKind::Process, "Обработка заказа"))
        .unwrap();
    graph.add_node(Node::new("a", NodeKind::Process, "a")).unwrap();
    graph.add_node(Node::new("b", NodeKind::Process, "b")).unwrap();
    graph.connect("p", "a").unwrap();
    graph.connect("p", "b").unwrap();

    let interpretation = SemanticInterpreter::new().interpret(graph);
    let graph = &interpretation.graph;
    assert!(graph.node("p").unwrap().is(NodeKind::Decision));
    assert_eq!(interpretation.flow_type, FlowType::Branching);
    assert_eq!(interpretation.complexity, 3 + 2 + 2);

    let conditions: Vec<Option<Condition>> = graph.edges().iter().map(|e| e.condition).collect();
    assert_eq!(conditions, vec![Some(Condition::True), Some(Condition::False)]);
}

#[test]
fn test_three_way_decision_is_not_tagged() {
    let mut graph = Graph::new();
    graph.add_node(Node::new("d", NodeKind::Decision, "выбор")).unwrap();
    for id in ["a", "b", "c"] {
        graph.add_node(Node::new(id, NodeKind::Process, id)).unwrap();
        graph.connect("d", id).unwrap();
    }
    let interpretation = SemanticInterpreter::new().interpret(graph);
    assert!(
        interpretation
            .graph
            .edges()
            .iter()
            .all(|e| e.condition.is_none())
    );
}

#[test]
fn test_labels_retype_nodes() {
    let graph = chain(&[
        ("s", NodeKind::Process, "Начало работы"),
        ("i", NodeKind::Process, "Ввод данных"),
        ("q", NodeKind::Process, "Если готово"),
        ("e", NodeKind::Process, "Конец работы"),
    ]);
    let interpretation = SemanticInterpreter::new().interpret(graph);
    let kinds: Vec<Option<NodeKind>> = interpretation.graph.nodes().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            Some(NodeKind::Start),
            Some(NodeKind::Data),
            Some(NodeKind::Decision),
            Some(NodeKind::End),
        ]
    );
}

#[test]
fn test_structure_is_recorded_on_nodes() {
    let interpretation = SemanticInterpreter::new().interpret(diamond());
    let graph = &interpretation.graph;

    let a = graph.node("a").unwrap();
    assert_eq!((a.level, a.in_degree, a.out_degree), (Some(0), Some(0), Some(2)));
    let d = graph.node("d").unwrap();
    assert_eq!((d.level, d.in_degree, d.out_degree), (Some(2), Some(2), Some(0)));

    // The start node branches, so it is retyped.
    assert!(a.is(NodeKind::Decision));
    assert_eq!(interpretation.flow_type, FlowType::Branching);
}

#[test]
fn test_untyped_nodes_get_a_type() {
    let mut graph = Graph::new();
    graph.add_node(Node::untyped("n", "Конец")).unwrap();
    let interpretation = SemanticInterpreter::new().interpret(graph);
    assert_eq!(interpretation.graph.node("n").unwrap().kind, Some(NodeKind::End));
}

#[test]
fn test_narrate_skips_data_nodes() {
    let graph = chain(&[
        ("s", NodeKind::Start, "Начало"),
        ("i", NodeKind::Data, "Ввод"),
        ("e", NodeKind::End, "Конец"),
    ]);
    let text = SemanticInterpreter::new().interpret(graph).narrate();
    assert!(!text.contains("Ввод"));
    assert!(text.ends_with("Конец: Конец"));
}
