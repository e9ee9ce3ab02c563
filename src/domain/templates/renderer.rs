use serde::Serialize;

use super::TemplateKind;
use crate::domain::error::TemplateError;

/// Trait for rendering artifact templates.
///
/// Keeps the template engine (minijinja) out of the domain layer.
/// Implementations must be pure: the same kind and data always produce the
/// same output.
pub trait TemplateRenderer {
    /// Render the template for `kind` against `data`.
    ///
    /// Fails with [`TemplateError::MissingField`] when the template
    /// references a value `data` does not provide.
    fn render<T: Serialize>(&self, kind: TemplateKind, data: &T) -> Result<String, TemplateError>;
}
