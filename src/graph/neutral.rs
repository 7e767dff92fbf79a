//! The neutral interchange form of a graph.
//!
//! `{nodes: [{id, ...attrs}], edges: [{source, target, ...attrs}]}`. Keys the
//! crate understands are mapped onto typed fields; every other key is carried
//! through `extra` untouched so that a round trip is lossless.

use super::{Condition, Edge, Graph, Node, NodeKind, Point, Rect};
use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeutralGraph {
    #[serde(default)]
    pub nodes: Vec<NeutralNode>,
    #[serde(default)]
    pub edges: Vec<NeutralEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralNode {
    pub id: String,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralEdge {
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl NeutralGraph {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&Node> for NeutralNode {
    fn from(node: &Node) -> Self {
        let mut attrs = node.extra.clone();
        if let Some(kind) = node.kind {
            attrs.insert("type".to_string(), json!(kind.as_str()));
        }
        attrs.insert("label".to_string(), json!(node.label));
        if let Some(p) = node.position {
            attrs.insert("position".to_string(), json!([p.x, p.y]));
        }
        if let Some(r) = node.bbox {
            attrs.insert("bbox".to_string(), json!([r.x1, r.y1, r.x2, r.y2]));
        }
        if let Some(confidence) = node.confidence {
            attrs.insert("confidence".to_string(), json!(confidence));
        }
        if let Some(level) = node.level {
            attrs.insert("level".to_string(), json!(level));
        }
        if let Some(degree) = node.in_degree {
            attrs.insert("in_degree".to_string(), json!(degree));
        }
        if let Some(degree) = node.out_degree {
            attrs.insert("out_degree".to_string(), json!(degree));
        }
        Self {
            id: node.id().to_string(),
            attrs,
        }
    }
}

impl From<&Edge> for NeutralEdge {
    fn from(edge: &Edge) -> Self {
        let mut attrs = edge.extra.clone();
        if let Some(label) = &edge.label {
            attrs.insert("label".to_string(), json!(label));
        }
        if let Some(condition) = edge.condition {
            attrs.insert("condition".to_string(), json!(condition.as_str()));
        }
        Self {
            source: edge.source().to_string(),
            target: edge.target().to_string(),
            attrs,
        }
    }
}

impl TryFrom<NeutralNode> for Node {
    type Error = GraphError;

    fn try_from(raw: NeutralNode) -> Result<Self, Self::Error> {
        let NeutralNode { id, mut attrs } = raw;
        let mut reader = AttrReader {
            owner: &id,
            attrs: &mut attrs,
        };

        let kind = reader
            .string("type")?
            .map(|s| {
                s.parse::<NodeKind>()
                    .map_err(|message| reader.invalid("type", &message))
            })
            .transpose()?;
        let label = reader.string("label")?.unwrap_or_default();
        let position = reader
            .numbers("position", 2)?
            .map(|v| Point::new(v[0], v[1]));
        let bbox = reader.numbers("bbox", 4)?.map(|v| Rect {
            x1: v[0],
            y1: v[1],
            x2: v[2],
            y2: v[3],
        });
        let confidence = reader.number("confidence")?;
        let level = reader.count("level")?;
        let in_degree = reader.count("in_degree")?;
        let out_degree = reader.count("out_degree")?;

        let mut node = match kind {
            Some(kind) => Node::new(id, kind, label),
            None => Node::untyped(id, label),
        };
        node.position = position;
        node.bbox = bbox;
        node.confidence = confidence;
        node.level = level;
        node.in_degree = in_degree;
        node.out_degree = out_degree;
        node.extra = attrs;
        Ok(node)
    }
}

impl TryFrom<NeutralEdge> for Edge {
    type Error = GraphError;

    fn try_from(raw: NeutralEdge) -> Result<Self, Self::Error> {
        let NeutralEdge {
            source,
            target,
            mut attrs,
        } = raw;
        let owner = format!("{}->{}", source, target);
        let mut reader = AttrReader {
            owner: &owner,
            attrs: &mut attrs,
        };

        let label = reader.string("label")?;
        let condition = match reader.string("condition")?.as_deref() {
            None => None,
            Some("true") => Some(Condition::True),
            Some("false") => Some(Condition::False),
            Some(other) => {
                return Err(reader.invalid(
                    "condition",
                    &format!("expected 'true' or 'false', found '{}'", other),
                ));
            }
        };

        let mut edge = Edge::new(source, target);
        edge.label = label;
        edge.condition = condition;
        edge.extra = attrs;
        Ok(edge)
    }
}

impl From<&Graph> for NeutralGraph {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().map(NeutralNode::from).collect(),
            edges: graph.edges().iter().map(NeutralEdge::from).collect(),
        }
    }
}

impl From<Graph> for NeutralGraph {
    fn from(graph: Graph) -> Self {
        NeutralGraph::from(&graph)
    }
}

impl TryFrom<NeutralGraph> for Graph {
    type Error = GraphError;

    fn try_from(raw: NeutralGraph) -> Result<Self, Self::Error> {
        let mut graph = Graph::new();
        for node in raw.nodes {
            graph.add_node(Node::try_from(node)?)?;
        }
        for edge in raw.edges {
            graph.add_edge(Edge::try_from(edge)?)?;
        }
        Ok(graph)
    }
}

/// Removes typed keys from an attribute map, leaving the opaque remainder.
struct AttrReader<'a> {
    owner: &'a str,
    attrs: &'a mut Map<String, Value>,
}

impl AttrReader<'_> {
    fn invalid(&self, key: &str, message: &str) -> GraphError {
        GraphError::InvalidAttribute {
            owner: self.owner.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    fn string(&mut self, key: &str) -> Result<Option<String>, GraphError> {
        match self.attrs.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.invalid(key, &format!("expected a string, found {}", other))),
        }
    }

    fn number(&mut self, key: &str) -> Result<Option<f64>, GraphError> {
        match self.attrs.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.invalid(key, &format!("expected a number, found {}", value))),
        }
    }

    fn count(&mut self, key: &str) -> Result<Option<usize>, GraphError> {
        match self.attrs.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(|n| Some(n as usize)).ok_or_else(|| {
                self.invalid(
                    key,
                    &format!("expected a non-negative integer, found {}", value),
                )
            }),
        }
    }

    fn numbers(&mut self, key: &str, len: usize) -> Result<Option<Vec<f64>>, GraphError> {
        let value = match self.attrs.remove(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(value) => value,
        };
        let numbers: Option<Vec<f64>> = value
            .as_array()
            .filter(|items| items.len() == len)
            .and_then(|items| items.iter().map(Value::as_f64).collect());
        numbers.map(Some).ok_or_else(|| {
            self.invalid(
                key,
                &format!("expected an array of {} numbers, found {}", len, value),
            )
        })
    }
}
