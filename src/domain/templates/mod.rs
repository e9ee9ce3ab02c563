//! Template library contract: artifact kinds, escaping rules, renderer port.

pub mod escape;
mod kind;
mod renderer;

pub use kind::TemplateKind;
pub use renderer::TemplateRenderer;
