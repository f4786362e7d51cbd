use serde::Serialize;

use crate::domain::AppError;
use crate::ports::TemplateRenderer;

/// Renders the template name followed by the context as JSON.
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl TemplateRenderer for JsonRenderer {
    fn render<S: Serialize>(&self, name: &str, context: &S) -> Result<String, AppError> {
        let body = serde_json::to_string(context)
            .map_err(|err| AppError::Template { name: name.to_string(), reason: err.to_string() })?;
        Ok(format!("{}\n{}\n", name, body))
    }
}
