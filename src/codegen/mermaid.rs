use super::{Dialect, MarkupWriter, single_line_label};
use crate::error::GenerationError;
use crate::graph::{Graph, NodeKind};
use ahash::AHashMap;
use std::fmt::Write;

/// Mermaid flowchart syntax, top-down. Nodes get short ids `n0, n1, ...` in
/// insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidWriter;

/// Fill and stroke colors per node type.
fn style(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Start => ("#90EE90", "#228B22"),
        NodeKind::End => ("#FFB6C1", "#DC143C"),
        NodeKind::Decision => ("#FFD700", "#FF8C00"),
        NodeKind::Process => ("#87CEEB", "#4682B4"),
        NodeKind::Data => ("#DDA0DD", "#9370DB"),
        NodeKind::Subprocess => ("#E0E0E0", "#696969"),
    }
}

impl MarkupWriter for MermaidWriter {
    fn dialect(&self) -> Dialect {
        Dialect::Mermaid
    }

    fn write(&self, graph: &Graph, out: &mut String) -> Result<(), GenerationError> {
        writeln!(out, "flowchart TD")?;
        writeln!(out)?;

        let mut short_ids: AHashMap<&str, String> = AHashMap::new();
        for (index, node) in graph.nodes().enumerate() {
            let id = format!("n{}", index);
            let label = single_line_label(node)?;
            match node.kind_or_default() {
                NodeKind::Start | NodeKind::End => writeln!(out, "    {}([{}])", id, label)?,
                NodeKind::Decision => writeln!(out, "    {}{{{{{}}}}}", id, label)?,
                NodeKind::Process => writeln!(out, "    {}[{}]", id, label)?,
                NodeKind::Data => writeln!(out, "    {}[/{}/]", id, label)?,
                NodeKind::Subprocess => writeln!(out, "    {}[[{}]]", id, label)?,
            }
            short_ids.insert(node.id(), id);
        }
        writeln!(out)?;

        for edge in graph.edges() {
            let (Some(source), Some(target)) =
                (short_ids.get(edge.source()), short_ids.get(edge.target()))
            else {
                continue;
            };
            match edge.label.as_deref().filter(|l| !l.is_empty()) {
                Some(label) => writeln!(out, "    {} -->|{}| {}", source, label, target)?,
                None => writeln!(out, "    {} --> {}", source, target)?,
            }
        }
        writeln!(out)?;

        for (index, node) in graph.nodes().enumerate() {
            let (fill, stroke) = style(node.kind_or_default());
            writeln!(out, "    style n{} fill:{},stroke:{}", index, fill, stroke)?;
        }
        Ok(())
    }
}
