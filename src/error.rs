use thiserror::Error;

/// Violations of the graph invariants: unique node ids and edges whose
/// endpoints exist.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' already exists in the graph")]
    DuplicateNode(String),

    #[error("Edge '{source_id}' -> '{target_id}' references a node that is not in the graph")]
    DanglingEdge { source_id: String, target_id: String },

    #[error("Attribute '{key}' of '{owner}' is invalid: {message}")]
    InvalidAttribute {
        owner: String,
        key: String,
        message: String,
    },
}

/// Fatal errors raised while building a graph from detected diagram elements.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("Failed to construct graph: bounding box {index} is invalid: {reason}")]
    InvalidBoundingBox { index: usize, reason: String },

    #[error(
        "Failed to construct graph: bounding box {index} has confidence {confidence}, expected a value in 0..=1"
    )]
    ConfidenceOutOfRange { index: usize, confidence: f64 },

    #[error("Failed to construct graph: {0}")]
    Graph(#[from] GraphError),
}

impl ConstructionError {
    /// Structured detail for the transport layer.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        match self {
            ConstructionError::InvalidBoundingBox { index, reason } => vec![
                ("bbox_index", index.to_string()),
                ("reason", reason.clone()),
            ],
            ConstructionError::ConfidenceOutOfRange { index, confidence } => vec![
                ("bbox_index", index.to_string()),
                ("confidence", confidence.to_string()),
            ],
            ConstructionError::Graph(e) => vec![("graph_error", e.to_string())],
        }
    }
}

/// Fatal errors raised while parsing a process description into a graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Failed to parse text: input has {length} characters, the limit is {limit}")]
    InputTooLong { length: usize, limit: usize },

    #[error("Failed to parse text: condition template '{pattern}' is invalid: {message}")]
    InvalidTemplate { pattern: String, message: String },

    #[error(
        "Failed to parse text: condition template '{pattern}' has {groups} capture groups, expected 1 or 3"
    )]
    TemplateGroups { pattern: String, groups: usize },

    #[error("Failed to parse text: {0}")]
    Graph(#[from] GraphError),
}

impl ParseError {
    /// Structured detail for the transport layer.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        match self {
            ParseError::InputTooLong { length, limit } => vec![
                ("length", length.to_string()),
                ("limit", limit.to_string()),
            ],
            ParseError::InvalidTemplate { pattern, message } => vec![
                ("pattern", pattern.clone()),
                ("message", message.clone()),
            ],
            ParseError::TemplateGroups { pattern, groups } => vec![
                ("pattern", pattern.clone()),
                ("groups", groups.to_string()),
            ],
            ParseError::Graph(e) => vec![("graph_error", e.to_string())],
        }
    }
}

/// Errors inside a markup generator. These never leave the generator: they
/// are turned into a comment in the requested dialect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Unsupported format: {0}")]
    UnsupportedDialect(String),

    #[error("Label of node '{node_id}' spans several lines")]
    MultilineLabel { node_id: String },

    #[error("Formatting failed")]
    Format(#[from] std::fmt::Error),
}

/// Errors from the description template collaborator. The renderer falls
/// back to its built-in description when one occurs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Could not read template '{path}': {message}")]
    Load { path: String, message: String },

    #[error("Template rendering failed: {0}")]
    Render(String),
}

/// Errors from the raster rendering collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Failed to render graph: {0}")]
    Backend(String),

    #[error("Renderer returned no image data")]
    EmptyOutput,
}

/// Errors while loading settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Could not read settings file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse settings: {0}")]
    Parse(String),
}

/// Everything that can stop a pipeline run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Description has {length} characters, at least {minimum} are required")]
    DescriptionTooShort { length: usize, minimum: usize },

    #[error("An image was requested but no renderer is configured")]
    RendererNotConfigured,
}

impl PipelineError {
    /// Structured detail for the transport layer.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        match self {
            PipelineError::Construction(e) => e.details(),
            PipelineError::Parse(e) => e.details(),
            PipelineError::DescriptionTooShort { length, minimum } => vec![
                ("length", length.to_string()),
                ("minimum", minimum.to_string()),
            ],
            other => vec![("error", other.to_string())],
        }
    }
}
