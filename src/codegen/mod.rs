//! Turns a graph back into textual diagram markup.
//!
//! Two dialects are supported, each with its own writer and no shared
//! intermediate form: PlantUML activity diagrams (block structured) and
//! Mermaid flowcharts (node/edge declarations). Generation never fails from
//! the caller's point of view: any error is rendered as a comment line in
//! the requested dialect.

mod mermaid;
mod plantuml;

pub use mermaid::MermaidWriter;
pub use plantuml::PlantUmlWriter;

use crate::error::GenerationError;
use crate::graph::{Graph, Node};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    PlantUml,
    Mermaid,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::PlantUml, Dialect::Mermaid];

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::PlantUml => "plantuml",
            Dialect::Mermaid => "mermaid",
        }
    }

    /// Line comment marker of the dialect.
    pub fn comment(self) -> &'static str {
        match self {
            Dialect::PlantUml => "'",
            Dialect::Mermaid => "%%",
        }
    }

    fn writer(self) -> &'static dyn MarkupWriter {
        match self {
            Dialect::PlantUml => &PlantUmlWriter,
            Dialect::Mermaid => &MermaidWriter,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| GenerationError::UnsupportedDialect(s.to_string()))
    }
}

/// Writes one dialect. Output is a sequence of `\n`-terminated lines.
pub trait MarkupWriter: Send + Sync {
    fn dialect(&self) -> Dialect;
    fn write(&self, graph: &Graph, out: &mut String) -> Result<(), GenerationError>;
}

/// Markup in both dialects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub plantuml: String,
    pub mermaid: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGenerator;

impl CodeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Markup for `graph`, lines joined by `\n` with no trailing newline.
    pub fn generate(&self, graph: &Graph, dialect: Dialect) -> String {
        debug!(%dialect, nodes = graph.node_count(), "generating markup");
        let mut out = String::new();
        match dialect.writer().write(graph, &mut out) {
            Ok(()) => {
                out.pop();
                info!(%dialect, "generated markup");
                out
            }
            Err(e) => {
                warn!(%dialect, error = %e, "markup generation failed");
                format!("{} Error generating {} code: {}", dialect.comment(), dialect, e)
            }
        }
    }

    /// Like [`generate`](Self::generate) with the dialect given by name. An
    /// unknown name yields a `#` comment.
    pub fn generate_named(&self, graph: &Graph, name: &str) -> String {
        match name.parse::<Dialect>() {
            Ok(dialect) => self.generate(graph, dialect),
            Err(e) => {
                warn!(dialect = name, "unsupported markup dialect");
                format!("# Error generating {} code: {}", name, e)
            }
        }
    }

    pub fn generate_both(&self, graph: &Graph) -> GeneratedCode {
        GeneratedCode {
            plantuml: self.generate(graph, Dialect::PlantUml),
            mermaid: self.generate(graph, Dialect::Mermaid),
        }
    }
}

/// Both dialects are line oriented; a line break inside a label would end
/// the declaration early.
fn single_line_label(node: &Node) -> Result<&str, GenerationError> {
    if node.label.contains(['\n', '\r']) {
        return Err(GenerationError::MultilineLabel {
            node_id: node.id().to_string(),
        });
    }
    Ok(&node.label)
}
