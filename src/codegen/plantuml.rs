use super::{Dialect, MarkupWriter, single_line_label};
use crate::error::GenerationError;
use crate::graph::{Graph, NodeKind};
use itertools::Itertools;
use std::fmt::Write;

/// PlantUML activity syntax.
///
/// Nodes are emitted in insertion order. Branch structure is approximated:
/// at most one `else` line is emitted after all nodes, for the first edge
/// leaving a decision whose label reads as a negative answer, and a single
/// `endif` closes every decision. Graphs with several decisions therefore
/// produce markup whose nesting does not reflect their branches.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantUmlWriter;

impl MarkupWriter for PlantUmlWriter {
    fn dialect(&self) -> Dialect {
        Dialect::PlantUml
    }

    fn write(&self, graph: &Graph, out: &mut String) -> Result<(), GenerationError> {
        writeln!(out, "@startuml")?;
        writeln!(out, "skinparam defaultTextAlignment center")?;
        writeln!(out, "skinparam backgroundColor white")?;
        writeln!(out)?;

        for node in graph.nodes() {
            let label = single_line_label(node)?;
            match node.kind_or_default() {
                NodeKind::Start => {
                    writeln!(out, "start")?;
                    let lower = label.to_lowercase();
                    if !label.is_empty() && lower != "начало" && lower != "start" {
                        writeln!(out, ":{};", label)?;
                    }
                }
                NodeKind::End => writeln!(out, "stop")?,
                NodeKind::Decision => {
                    let successors = graph.successors(node.id()).into_iter().unique().count();
                    let answer = if successors >= 2 { "да" } else { "yes" };
                    writeln!(out, "if ({}) then ({})", label, answer)?;
                }
                _ => writeln!(out, ":{};", label)?,
            }
        }

        if let Some(answer) = negative_answer(graph) {
            writeln!(out, "else ({})", answer)?;
        }
        if graph.count_kind(NodeKind::Decision) > 0 {
            writeln!(out, "endif")?;
        }

        writeln!(out)?;
        writeln!(out, "@enduml")?;
        Ok(())
    }
}

fn negative_answer(graph: &Graph) -> Option<&'static str> {
    graph
        .edges()
        .iter()
        .filter(|e| graph.node(e.source()).is_some_and(|n| n.is(NodeKind::Decision)))
        .find_map(|e| {
            let label = e.label_str().to_lowercase();
            if label.contains("нет") {
                Some("нет")
            } else if label.contains("no") {
                Some("no")
            } else {
                None
            }
        })
}
