use super::{DescriptionContext, DescriptionTemplate};
use crate::error::TemplateError;
use minijinja::Environment;
use std::fs;
use std::path::Path;

/// A Jinja template rendered with minijinja. Block tags swallow the newline
/// that follows them and the indentation that precedes them.
#[derive(Debug, Clone)]
pub struct JinjaTemplate {
    source: String,
}

impl JinjaTemplate {
    /// Checks the syntax up front so that a broken template is reported when
    /// it is loaded rather than on every render.
    pub fn from_string(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let env = environment();
        env.template_from_str(&source)
            .map_err(|e| TemplateError::Render(e.to_string()))?;
        Ok(Self { source })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| TemplateError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_string(source)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl DescriptionTemplate for JinjaTemplate {
    fn render(&self, context: &DescriptionContext) -> Result<String, TemplateError> {
        environment()
            .render_str(&self.source, context)
            .map_err(|e| TemplateError::Render(e.to_string()))
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env
}
