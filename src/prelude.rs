//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the zukei crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use zukei::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let data = DetectionData::from_file("path/to/detections.json")?;
//! let pipeline = Pipeline::builder(Settings::default()).build()?;
//!
//! let report = pipeline.analyze_data(&data)?;
//! println!("{}", report.description);
//! println!("{}", CodeGenerator::new().generate(&report.graph, Dialect::PlantUml));
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{Condition, Edge, Graph, NeutralGraph, Node, NodeKind, Point, Rect};

// Stages
pub use crate::codegen::{CodeGenerator, Dialect};
pub use crate::describe::{DescriptionRenderer, DescriptionTemplate, JinjaTemplate};
pub use crate::interpreter::{FlowType, Interpretation, SemanticInterpreter};
pub use crate::parser::TextParser;
pub use crate::render::{DiagramRenderer, DotRenderer, LayoutDirection, RenderView};
pub use crate::spatial::{BoundingBox, GraphConstructor, OcrResult, RecognizedText, RecognizedTexts};

// Analysis
pub use crate::analysis::{Violation, compute_levels, simple_cycles, topological_sort, validate};

// Pipeline, configuration and input data
pub use crate::config::Settings;
pub use crate::data::DetectionData;
pub use crate::pipeline::{GenerateRequest, OutputFormat, Pipeline};

// Error types
pub use crate::error::{ConstructionError, GraphError, ParseError, PipelineError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
