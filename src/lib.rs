//! fpmkit: generate an Nginx + PHP-FPM development environment from
//! declarative PHP application descriptors.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    GenerateOptions, GenerateOutcome, InitOutcome, PlanOptions, PlanOutcome, PlannedArtifact,
    ProjectInput, ValidateOutcome, generate_at, init, init_at, plan_at, render_artifacts,
    validate_at,
};
pub use domain::{
    AppError, ApplicationDescriptor, Artifact, ArtifactPath, ComposeManifest, ProjectConfig,
    ProxyConfig, StackSettings, TemplateError, TemplateKind, ValidationError, WriteError,
    WriteReport, compose, validate,
};
