//! Tests for PlantUML and Mermaid generation.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use zukei::codegen::MarkupWriter;
use zukei::codegen::{MermaidWriter, PlantUmlWriter};
use zukei::error::GenerationError;
use zukei::prelude::*;

fn branching_graph() -> Graph {
    TextParser::builder()
        .build()
        .unwrap()
        .parse(BRANCHING_TEXT)
        .unwrap()
}

#[test]
fn test_plantuml_single_decision() {
    let code = CodeGenerator::new().generate(&branching_graph(), Dialect::PlantUml);
    let expected = "\
@startuml
skinparam defaultTextAlignment center
skinparam backgroundColor white

start
if (A) then (да)
:B;
:C;
stop
else (нет)
endif

@enduml";
    assert_eq!(code, expected);

    let count = |prefix: &str| code.lines().filter(|l| l.starts_with(prefix)).count();
    assert_eq!(count("if ("), 1);
    assert_eq!(count("else"), 1);
    assert_eq!(count("endif"), 1);
}

#[test]
fn test_plantuml_start_label_and_single_branch() {
    let graph = chain(&[
        ("s", NodeKind::Start, "Запуск"),
        ("d", NodeKind::Decision, "Готово"),
        ("e", NodeKind::End, "Конец"),
    ]);
    let code = CodeGenerator::new().generate(&graph, Dialect::PlantUml);
    let body: Vec<&str> = code.lines().skip(4).collect();
    assert_eq!(
        body,
        vec![
            "start",
            ":Запуск;",
            "if (Готово) then (yes)",
            "stop",
            "endif",
            "",
            "@enduml"
        ]
    );
}

#[test]
fn test_mermaid_output() {
    let mut graph = Graph::new();
    graph.add_node(Node::new("s", NodeKind::Start, "Начало")).unwrap();
    graph.add_node(Node::new("d", NodeKind::Decision, "Готово")).unwrap();
    graph.add_node(Node::new("p", NodeKind::Process, "Шаг")).unwrap();
    graph.add_node(Node::new("i", NodeKind::Data, "Ввод")).unwrap();
    graph.connect("s", "d").unwrap();
    graph.add_edge(Edge::labeled("d", "p", "Да")).unwrap();
    graph.connect("p", "i").unwrap();

    let code = CodeGenerator::new().generate(&graph, Dialect::Mermaid);
    let expected = "\
flowchart TD

    n0([Начало])
    n1{{Готово}}
    n2[Шаг]
    n3[/Ввод/]

    n0 --> n1
    n1 -->|Да| n2
    n2 --> n3

    style n0 fill:#90EE90,stroke:#228B22
    style n1 fill:#FFD700,stroke:#FF8C00
    style n2 fill:#87CEEB,stroke:#4682B4
    style n3 fill:#DDA0DD,stroke:#9370DB";
    assert_eq!(code, expected);
}

#[test]
fn test_multiline_label_becomes_comment() {
    let graph = chain(&[("x", NodeKind::Process, "две\nстроки")]);
    let generator = CodeGenerator::new();
    assert_eq!(
        generator.generate(&graph, Dialect::PlantUml),
        "' Error generating plantuml code: Label of node 'x' spans several lines"
    );
    assert_eq!(
        generator.generate(&graph, Dialect::Mermaid),
        "%% Error generating mermaid code: Label of node 'x' spans several lines"
    );
}

#[test]
fn test_writer_reports_error_directly() {
    let graph = chain(&[("x", NodeKind::Process, "a\r\nb")]);
    let mut out = String::new();
    let err = MermaidWriter.write(&graph, &mut out).unwrap_err();
    assert_eq!(
        err,
        GenerationError::MultilineLabel {
            node_id: "x".to_string()
        }
    );
    assert_eq!(PlantUmlWriter.dialect(), Dialect::PlantUml);
}

#[test]
fn test_unknown_dialect_name() {
    let generator = CodeGenerator::new();
    let graph = diamond();
    assert_eq!(
        generator.generate_named(&graph, "graphviz"),
        "# Error generating graphviz code: Unsupported format: graphviz"
    );
    assert_eq!(
        generator.generate_named(&graph, "mermaid"),
        generator.generate(&graph, Dialect::Mermaid)
    );
    assert_eq!("plantuml".parse::<Dialect>(), Ok(Dialect::PlantUml));
}

#[test]
fn test_generate_both() {
    let code = CodeGenerator::new().generate_both(&diamond());
    assert!(code.plantuml.starts_with("@startuml"));
    assert!(code.mermaid.starts_with("flowchart TD"));
    assert!(!code.plantuml.contains("endif"));
}
