//! # Zukei - Flowchart Graph Translation
//!
//! **Zukei** translates between three representations of a process:
//! detected diagram elements (bounding boxes plus recognized text), free-form
//! process descriptions, and textual diagram markup. A directed flow graph is
//! the canonical intermediate form that every stage reads and writes.
//!
//! ## Core Workflow
//!
//! 1.  **Build a graph**: from detector output with `spatial::GraphConstructor`,
//!     or from text with `parser::TextParser`.
//! 2.  **Interpret**: `interpreter::SemanticInterpreter` retypes nodes from their
//!     labels and branching, records levels and degrees, and classifies the flow.
//! 3.  **Emit**: `codegen::CodeGenerator` writes PlantUML or Mermaid,
//!     `describe::DescriptionRenderer` writes a prose summary, and a
//!     `render::DiagramRenderer` turns the graph into an image.
//!
//! `pipeline::Pipeline` wires these stages together the same way for every
//! request.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zukei::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let parser = TextParser::builder().build()?;
//!     let graph = parser.parse("Начало. Если баланс положительный то списать иначе отказать. Конец.")?;
//!
//!     let interpretation = SemanticInterpreter::new().interpret(graph);
//!     println!("Flow type: {}", interpretation.flow_type);
//!
//!     let code = CodeGenerator::new().generate(&interpretation.graph, Dialect::Mermaid);
//!     println!("{}", code);
//!
//!     for violation in validate(&interpretation.graph) {
//!         println!("warning: {}", violation);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod codegen;
pub mod config;
pub mod data;
pub mod describe;
pub mod error;
pub mod graph;
pub mod interpreter;
pub mod keywords;
pub mod parser;
pub mod pipeline;
pub mod prelude;
pub mod render;
pub mod spatial;
