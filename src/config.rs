//! Runtime settings.
//!
//! Every field has a default, so a settings file only needs the keys it
//! changes:
//!
//! ```json
//! { "spatial": { "vertical_threshold": 40.0 }, "output": { "dialect": "mermaid" } }
//! ```

use crate::codegen::Dialect;
use crate::error::ConfigError;
use crate::parser::{BranchLabels, DEFAULT_MAX_INPUT_LENGTH};
use crate::pipeline::OutputFormat;
use crate::render::LayoutDirection;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub spatial: SpatialSettings,
    pub parser: ParserSettings,
    pub output: OutputSettings,
    /// Jinja template for descriptions; the built-in description is used
    /// when unset.
    pub description_template: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialSettings {
    pub vertical_threshold: f64,
    pub horizontal_threshold: f64,
}

impl Default for SpatialSettings {
    fn default() -> Self {
        Self {
            vertical_threshold: 50.0,
            horizontal_threshold: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Longest accepted description, in characters.
    pub max_input_length: usize,
    /// Shortest description a generate request accepts, in characters.
    pub min_request_length: usize,
    pub branch_labels: BranchLabels,
    /// Extra condition patterns tried after the built-in ones.
    pub condition_templates: Vec<String>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            min_request_length: 10,
            branch_labels: BranchLabels::default(),
            condition_templates: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dialect: Dialect,
    pub layout: LayoutDirection,
    pub format: OutputFormat,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}
