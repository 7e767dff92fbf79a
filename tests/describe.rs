//! Tests for natural-language descriptions.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use zukei::describe::DescriptionContext;
use zukei::error::TemplateError;
use zukei::prelude::*;

struct EdgeCount;

impl DescriptionTemplate for EdgeCount {
    fn render(&self, context: &DescriptionContext) -> std::result::Result<String, TemplateError> {
        Ok(format!("{} edges", context.num_edges))
    }
}

#[test]
fn test_fallback_description() {
    let text = DescriptionRenderer::new().describe(&diamond());
    assert_eq!(
        text,
        "Алгоритм начинается: Начало. Выполняется: Шаг B. Выполняется: Шаг C. \
         Алгоритм завершается: Конец."
    );
}

#[test]
fn test_fallback_mentions_branches_in_level_order() {
    // Inserted out of flow order: s -> d -> p -> e.
    let mut graph = Graph::new();
    graph.add_node(Node::new("s", NodeKind::Start, "Начало")).unwrap();
    graph.add_node(Node::new("p", NodeKind::Process, "Списать деньги")).unwrap();
    graph.add_node(Node::new("d", NodeKind::Decision, "баланс")).unwrap();
    graph.add_node(Node::new("e", NodeKind::End, "Конец")).unwrap();
    for (source, target) in [("s", "d"), ("d", "p"), ("p", "e")] {
        graph.connect(source, target).unwrap();
    }
    let interpretation = SemanticInterpreter::new().interpret(graph);
    let text = DescriptionRenderer::new().describe(&interpretation.graph);
    assert_eq!(
        text,
        "Алгоритм начинается: Начало. Проверяется условие: баланс. Выполняется: Списать деньги. \
         Алгоритм завершается: Конец. Алгоритм содержит ветвления и условные переходы."
    );
}

#[test]
fn test_fallback_skips_empty_labels() {
    let graph = chain(&[
        ("s", NodeKind::Start, ""),
        ("p", NodeKind::Process, ""),
        ("e", NodeKind::End, ""),
    ]);
    assert_eq!(
        DescriptionRenderer::new().describe(&graph),
        "Алгоритм начинается. Алгоритм завершается."
    );
}

#[test]
fn test_custom_template_is_used() {
    let renderer = DescriptionRenderer::with_template(Arc::new(EdgeCount));
    assert!(renderer.has_template());
    assert_eq!(renderer.describe(&diamond()), "4 edges");
}

#[test]
fn test_jinja_template() {
    let template = JinjaTemplate::from_string(
        "{{ num_nodes }} nodes{% for node in start_nodes %}, starts at {{ node.label }}{% endfor %}",
    )
    .unwrap();
    let renderer = DescriptionRenderer::with_template(Arc::new(template));
    assert_eq!(renderer.describe(&diamond()), "4 nodes, starts at Начало");
}

#[test]
fn test_jinja_sees_node_type() {
    let template =
        JinjaTemplate::from_string("{% for node in nodes %}{{ node.type }} {% endfor %}").unwrap();
    let renderer = DescriptionRenderer::with_template(Arc::new(template));
    assert_eq!(renderer.describe(&diamond()), "start process process end ");
}

#[test]
fn test_broken_template_is_rejected_on_load() {
    let err = JinjaTemplate::from_string("{% for %}").unwrap_err();
    assert!(matches!(err, TemplateError::Render(_)));

    let err = JinjaTemplate::from_file("/nonexistent/description.j2").unwrap_err();
    assert!(matches!(err, TemplateError::Load { .. }));
}

#[test]
fn test_failing_template_falls_back() {
    let template = JinjaTemplate::from_string("{{ missing_function() }}").unwrap();
    let renderer = DescriptionRenderer::with_template(Arc::new(template));
    assert_eq!(
        renderer.describe(&diamond()),
        DescriptionRenderer::new().describe(&diamond())
    );
}
