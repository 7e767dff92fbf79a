//! Tests for turning process descriptions into graphs.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use zukei::parser::{BranchLabels, ConditionMatch, extract_steps};
use zukei::prelude::*;

fn parser() -> TextParser {
    TextParser::builder().build().unwrap()
}

fn edge_labels(graph: &Graph) -> Vec<(String, String, String)> {
    graph
        .edges()
        .iter()
        .map(|e| {
            (
                e.source().to_string(),
                e.target().to_string(),
                e.label_str().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_if_then_else_builds_decision_with_two_branches() {
    let graph = parser().parse(BRANCHING_TEXT).unwrap();

    assert_eq!(graph.node_count(), 5);
    let kinds: Vec<NodeKind> = graph.nodes().map(Node::kind_or_default).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Start,
            NodeKind::Decision,
            NodeKind::Process,
            NodeKind::Process,
            NodeKind::End,
        ]
    );
    assert_eq!(graph.node("node_1").unwrap().label, "A");
    assert_eq!(graph.node("node_2").unwrap().label, "B");
    assert_eq!(graph.node("node_3").unwrap().label, "C");
    assert_eq!(
        edge_labels(&graph),
        vec![
            ("node_0".to_string(), "node_1".to_string(), String::new()),
            ("node_1".to_string(), "node_2".to_string(), "Да".to_string()),
            ("node_1".to_string(), "node_3".to_string(), "Нет".to_string()),
        ]
    );
}

#[test]
fn test_sentence_after_decision_is_not_linked_to_it() {
    let graph = parser().parse(BRANCHING_TEXT).unwrap();
    assert_eq!(targets(&graph, "node_1"), vec!["node_2", "node_3"]);
    assert_eq!(graph.in_degree("node_4"), 0);
}

#[test]
fn test_english_condition_with_custom_labels() {
    let parser = TextParser::builder()
        .branch_labels(BranchLabels {
            positive: "yes".to_string(),
            negative: "no".to_string(),
        })
        .build()
        .unwrap();
    let graph = parser.parse("Start. If ready then go else wait. Finish.").unwrap();

    assert_eq!(graph.node("node_1").unwrap().label, "ready");
    assert_eq!(graph.node("node_2").unwrap().label, "go");
    assert_eq!(graph.node("node_3").unwrap().label, "wait");
    let labels: Vec<&str> = graph.edges().iter().map(|e| e.label_str()).collect();
    assert_eq!(labels, vec!["", "yes", "no"]);
    assert!(graph.node("node_4").unwrap().is(NodeKind::End));
}

#[test]
fn test_check_sentence_gets_default_branches() {
    let graph = parser().parse("Начало. Проверить баланс. Конец.").unwrap();

    let nodes: Vec<(NodeKind, &str)> = graph
        .nodes()
        .map(|n| (n.kind_or_default(), n.label.as_str()))
        .collect();
    assert_eq!(
        nodes,
        vec![
            (NodeKind::Start, "Начало"),
            (NodeKind::Decision, "баланс"),
            (NodeKind::Process, "Да"),
            (NodeKind::Process, "Нет"),
            (NodeKind::End, "Конец"),
        ]
    );
    assert_eq!(
        edge_labels(&graph),
        vec![
            ("node_0".to_string(), "node_1".to_string(), String::new()),
            ("node_1".to_string(), "node_2".to_string(), "Да".to_string()),
            ("node_1".to_string(), "node_3".to_string(), "Нет".to_string()),
        ]
    );
    assert_eq!(graph.in_degree("node_4"), 0);
}

#[test]
fn test_condition_subject_uses_configured_labels() {
    let parser = TextParser::builder()
        .branch_labels(BranchLabels {
            positive: "yes".to_string(),
            negative: "no".to_string(),
        })
        .build()
        .unwrap();
    let graph = parser.parse("Start. Condition: ready. Finish.").unwrap();

    assert_eq!(graph.node("node_1").unwrap().label, "ready");
    assert_eq!(graph.node("node_2").unwrap().label, "yes");
    assert_eq!(graph.node("node_3").unwrap().label, "no");
    assert_eq!(targets(&graph, "node_1"), vec!["node_2", "node_3"]);
}

#[test]
fn test_unmatched_condition_stays_in_chain() {
    let graph = parser().parse("Начало. Если баланс положительный. Конец.").unwrap();
    let decision = graph.node("node_1").unwrap();
    assert!(decision.is(NodeKind::Decision));
    assert_eq!(targets(&graph, "node_1"), vec!["node_2"]);
}

#[test]
fn test_plain_sentences_form_a_chain() {
    let graph = parser()
        .parse("Начало. Открыть файл. Прочитать строки. Конец.")
        .unwrap();
    assert_eq!(graph.node_count(), 4);
    assert_eq!(topological_sort(&graph).unwrap().len(), 4);
    assert_eq!(graph.edge_count(), 3);
    assert!(validate(&graph).is_empty());
}

#[test]
fn test_single_plain_sentence_falls_back() {
    let text = "Просто какой-то текст без ключевых слов";
    let graph = parser().parse(text).unwrap();

    let labels: Vec<&str> = graph.nodes().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["Начало", text, "Конец"]);
    assert_eq!(targets(&graph, "node_0"), vec!["node_1"]);
    assert_eq!(targets(&graph, "node_1"), vec!["node_2"]);
}

#[test]
fn test_fallback_label_is_truncated() {
    let text = "ы".repeat(150);
    let graph = parser().parse(&text).unwrap();
    assert_eq!(graph.node("node_1").unwrap().label.chars().count(), 100);
}

#[test]
fn test_empty_text_falls_back() {
    let graph = parser().parse("  ").unwrap();
    assert_eq!(graph.node_count(), 3);
    assert!(graph.node("node_0").unwrap().is(NodeKind::Start));
}

#[test]
fn test_input_too_long() {
    let parser = TextParser::builder().max_input_length(10).build().unwrap();
    let err = parser.parse("Начало. Конец.").unwrap_err();
    assert_eq!(
        err,
        ParseError::InputTooLong {
            length: 14,
            limit: 10
        }
    );
}

#[test]
fn test_custom_condition_template() {
    let parser = TextParser::builder()
        .with_condition_template(r"when\s+(.+)$")
        .build()
        .unwrap();
    assert_eq!(
        parser.match_condition("when the door opens"),
        Some(ConditionMatch::Subject("the door opens".to_string()))
    );
    assert_eq!(parser.match_condition("nothing to see"), None);
}

#[test]
fn test_invalid_custom_template_fails_build() {
    let err = TextParser::builder()
        .with_condition_template(r"when\s+(.+")
        .build()
        .unwrap_err();
    assert!(matches!(err, ParseError::InvalidTemplate { .. }));
}

#[test]
fn test_parse_structured() {
    let neutral = parser().parse_structured(BRANCHING_TEXT).unwrap();
    assert_eq!(neutral.nodes.len(), 5);
    assert_eq!(neutral.edges.len(), 3);
    assert_eq!(neutral.nodes[1].attrs["type"], "decision");
}

#[test]
fn test_extract_numbered_steps() {
    let steps = extract_steps("Шаг 1: открыть файл. Шаг 2: прочитать данные.");
    assert_eq!(steps, vec!["открыть файл", "прочитать данные"]);
}

#[test]
fn test_extract_steps_falls_back_to_sentences() {
    assert_eq!(extract_steps("Одно. Два!"), vec!["Одно", "Два"]);
}
