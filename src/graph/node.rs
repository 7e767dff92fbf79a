use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The role a node plays in a flowchart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    End,
    Process,
    Decision,
    Data,
    Subprocess,
}

impl NodeKind {
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Start,
        NodeKind::End,
        NodeKind::Process,
        NodeKind::Decision,
        NodeKind::Data,
        NodeKind::Subprocess,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Process => "process",
            NodeKind::Decision => "decision",
            NodeKind::Data => "data",
            NodeKind::Subprocess => "subprocess",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown node type '{}'", s))
    }
}

/// A point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, stored as its two corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A single flowchart element.
///
/// `kind` is optional so that graphs read from external sources can carry
/// untyped nodes; validation reports them instead of rejecting the graph.
/// `level`, `in_degree` and `out_degree` are filled in by the semantic
/// interpreter. Any attribute the crate does not interpret lives in `extra`
/// and is preserved verbatim. The id is fixed at construction since the
/// owning graph indexes nodes by it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    pub kind: Option<NodeKind>,
    pub label: String,
    pub position: Option<Point>,
    pub bbox: Option<Rect>,
    pub confidence: Option<f64>,
    pub level: Option<usize>,
    pub in_degree: Option<usize>,
    pub out_degree: Option<usize>,
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: Some(kind),
            label: label.into(),
            position: None,
            bbox: None,
            confidence: None,
            level: None,
            in_degree: None,
            out_degree: None,
            extra: Map::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// A node with no type assigned.
    pub fn untyped(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: None,
            ..Self::new(id, NodeKind::Process, label)
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_bbox(mut self, bbox: Rect) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// The node's type, treating untyped nodes as `process`.
    pub fn kind_or_default(&self) -> NodeKind {
        self.kind.unwrap_or(NodeKind::Process)
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind == Some(kind)
    }
}
