use serde::Serialize;

use crate::domain::AppError;

/// Port for rendering the named text templates used by the generator.
pub trait TemplateRenderer {
    /// Render the template registered under `name` with the given context.
    fn render<S: Serialize>(&self, name: &str, context: &S) -> Result<String, AppError>;
}
