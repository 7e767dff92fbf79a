//! End-to-end request handling.
//!
//! A [`Pipeline`] owns one instance of every stage, built once from
//! [`Settings`] and reused read-only across requests:
//!
//! - **analyze**: detected boxes and text -> spatial construction with flow
//!   analysis -> interpretation -> description -> advisory validation.
//! - **generate**: free text -> normalization -> parsing -> optional image
//!   -> optional markup -> description.

use crate::analysis::{Violation, validate};
use crate::codegen::{CodeGenerator, Dialect};
use crate::config::Settings;
use crate::data::DetectionData;
use crate::describe::{DescriptionRenderer, DescriptionTemplate, JinjaTemplate};
use crate::error::PipelineError;
use crate::graph::Graph;
use crate::interpreter::{FlowType, SemanticInterpreter};
use crate::parser::{TextParser, normalize};
use crate::render::{DiagramRenderer, LayoutDirection, RenderView};
use crate::spatial::{BoundingBox, GraphConstructor, RecognizedText, RecognizedTexts};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Which artifacts a generate request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Image,
    Code,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn wants_image(self) -> bool {
        matches!(self, OutputFormat::Image | OutputFormat::Both)
    }

    pub fn wants_code(self) -> bool {
        matches!(self, OutputFormat::Code | OutputFormat::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub description: String,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default)]
    pub layout: LayoutDirection,
}

impl GenerateRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            output_format: OutputFormat::default(),
            dialect: Dialect::default(),
            layout: LayoutDirection::default(),
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_layout(mut self, layout: LayoutDirection) -> Self {
        self.layout = layout;
        self
    }
}

/// One input box with the text recognized inside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedElement {
    pub id: usize,
    pub bbox: BoundingBox,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub graph: Graph,
    pub flow_type: FlowType,
    pub complexity: usize,
    pub description: String,
    pub violations: Vec<Violation>,
    pub detected_elements: Vec<DetectedElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub graph: Graph,
    pub description: String,
    pub diagram_code: Option<String>,
    pub diagram_image: Option<Vec<u8>>,
}

pub struct Pipeline {
    settings: Settings,
    constructor: GraphConstructor,
    parser: TextParser,
    interpreter: SemanticInterpreter,
    generator: CodeGenerator,
    describer: DescriptionRenderer,
    renderer: Option<Arc<dyn DiagramRenderer>>,
}

pub struct PipelineBuilder {
    settings: Settings,
    renderer: Option<Arc<dyn DiagramRenderer>>,
    template: Option<Arc<dyn DescriptionTemplate>>,
}

impl PipelineBuilder {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            renderer: None,
            template: None,
        }
    }

    pub fn with_renderer(mut self, renderer: impl DiagramRenderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Overrides any template named in the settings.
    pub fn with_template(mut self, template: impl DescriptionTemplate + 'static) -> Self {
        self.template = Some(Arc::new(template));
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let constructor = GraphConstructor::builder()
            .with_settings(&self.settings.spatial)
            .build();
        let parser = TextParser::builder()
            .with_settings(&self.settings.parser)
            .build()?;

        let template = match (self.template, &self.settings.description_template) {
            (Some(template), _) => Some(template),
            (None, Some(path)) => {
                let template: Arc<dyn DescriptionTemplate> = Arc::new(JinjaTemplate::from_file(path)?);
                Some(template)
            }
            (None, None) => None,
        };
        let describer = match template {
            Some(template) => DescriptionRenderer::with_template(template),
            None => DescriptionRenderer::new(),
        };

        info!(
            renderer = self.renderer.is_some(),
            template = describer.has_template(),
            "pipeline ready"
        );
        Ok(Pipeline {
            settings: self.settings,
            constructor,
            parser,
            interpreter: SemanticInterpreter::new(),
            generator: CodeGenerator::new(),
            describer,
            renderer: self.renderer,
        })
    }
}

impl Pipeline {
    pub fn builder(settings: Settings) -> PipelineBuilder {
        PipelineBuilder::new(settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// A request using the configured output defaults.
    pub fn request(&self, description: impl Into<String>) -> GenerateRequest {
        let output = &self.settings.output;
        GenerateRequest::new(description)
            .with_output_format(output.format)
            .with_dialect(output.dialect)
            .with_layout(output.layout)
    }

    pub fn analyze(
        &self,
        boxes: &[BoundingBox],
        texts: &RecognizedTexts,
    ) -> Result<AnalysisReport, PipelineError> {
        debug!(boxes = boxes.len(), texts = texts.len(), "analyze request");

        let graph = self.constructor.construct_with_flow_analysis(boxes, texts)?;
        let interpretation = self.interpreter.interpret(graph);
        let description = self.describer.describe(&interpretation.graph);
        let violations = validate(&interpretation.graph);
        for violation in &violations {
            debug!(%violation, "validation");
        }

        let detected_elements = boxes
            .iter()
            .enumerate()
            .map(|(id, bbox)| DetectedElement {
                id,
                bbox: *bbox,
                text: texts
                    .get(&id)
                    .map(RecognizedText::text)
                    .unwrap_or("")
                    .to_string(),
            })
            .collect();

        info!(
            flow_type = %interpretation.flow_type,
            violations = violations.len(),
            "analysis complete"
        );
        Ok(AnalysisReport {
            graph: interpretation.graph,
            flow_type: interpretation.flow_type,
            complexity: interpretation.complexity,
            description,
            violations,
            detected_elements,
        })
    }

    pub fn analyze_data(&self, data: &DetectionData) -> Result<AnalysisReport, PipelineError> {
        self.analyze(&data.boxes, &data.texts)
    }

    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerationReport, PipelineError> {
        let length = request.description.chars().count();
        let minimum = self.settings.parser.min_request_length;
        if length < minimum {
            return Err(PipelineError::DescriptionTooShort { length, minimum });
        }
        debug!(
            format = ?request.output_format,
            dialect = %request.dialect,
            "generate request"
        );

        let text = normalize(&request.description);
        let graph = self.parser.parse(&text)?;

        let diagram_image = if request.output_format.wants_image() {
            let renderer = self
                .renderer
                .as_ref()
                .ok_or(PipelineError::RendererNotConfigured)?;
            let image = renderer.render(&RenderView::from_graph(&graph), request.layout)?;
            info!(bytes = image.len(), "rendered diagram image");
            Some(image)
        } else {
            None
        };

        let diagram_code = request
            .output_format
            .wants_code()
            .then(|| self.generator.generate(&graph, request.dialect));

        let description = self.describer.describe(&graph);

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "generation complete"
        );
        Ok(GenerationReport {
            graph,
            description,
            diagram_code,
            diagram_image,
        })
    }
}
