use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which branch of a decision an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    True,
    False,
}

impl Condition {
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::True => "true",
            Condition::False => "false",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed connection between two nodes.
///
/// Endpoints are fixed at construction; label and condition may be edited
/// in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: String,
    target: String,
    pub label: Option<String>,
    pub condition: Option<Condition>,
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: None,
            condition: None,
            extra: Map::new(),
        }
    }

    pub fn labeled(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(source, target)
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The label, or an empty string when the edge has none.
    pub fn label_str(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}
