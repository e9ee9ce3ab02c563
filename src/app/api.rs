//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together descriptor
//! loading, context creation and command execution.

use std::path::{Path, PathBuf};

use crate::adapters::{FilesystemArtifactStore, MinijinjaTemplateLibrary};
use crate::app::AppContext;
use crate::app::commands;
use crate::app::config::load_project;
use crate::app::services::plan_artifacts;
use crate::domain::{ApplicationDescriptor, Artifact, StackSettings};

pub use crate::app::commands::generate::{GenerateOptions, GenerateOutcome};
pub use crate::app::commands::init::InitOutcome;
pub use crate::app::commands::plan::{PlanOutcome, PlannedArtifact};
pub use crate::app::commands::validate::ValidateOutcome;
pub use crate::app::services::PlanOptions;
pub use crate::domain::AppError;

/// Where a run's descriptors come from.
#[derive(Debug, Clone, Default)]
pub struct ProjectInput {
    /// Explicit descriptor file; discovered in the working directory when `None`.
    pub config: Option<PathBuf>,
    /// `--app` descriptors; replace the file's `apps` when non-empty.
    pub apps: Vec<ApplicationDescriptor>,
}

impl ProjectInput {
    pub fn from_apps(apps: Vec<ApplicationDescriptor>) -> Self {
        Self { config: None, apps }
    }
}

/// Create an `AppContext` writing into `target`.
fn create_context(
    target: PathBuf,
) -> Result<AppContext<FilesystemArtifactStore, MinijinjaTemplateLibrary>, AppError> {
    let store = FilesystemArtifactStore::new(target);
    let renderer = MinijinjaTemplateLibrary::new()?;
    Ok(AppContext::new(store, renderer))
}

fn target_dir(dir: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(output) => dir.join(output),
        None => dir.to_path_buf(),
    }
}

// =============================================================================
// Init Command API
// =============================================================================

/// Write a starter `fpmkit.yml` in the current directory.
pub fn init() -> Result<InitOutcome, AppError> {
    init_at(std::env::current_dir()?)
}

/// Write a starter `fpmkit.yml` in the specified directory.
pub fn init_at(path: impl Into<PathBuf>) -> Result<InitOutcome, AppError> {
    let store = FilesystemArtifactStore::new(path.into());
    commands::init::execute(&store)
}

// =============================================================================
// Validate / Plan / Generate Command API
// =============================================================================

/// Validate descriptors without rendering anything.
pub fn validate_at(dir: &Path, input: &ProjectInput) -> Result<ValidateOutcome, AppError> {
    let project = load_project(dir, input.config.as_deref(), input.apps.clone())?;
    commands::validate::execute(&project.config)
}

/// Render in memory and report what `generate` would write into `output`
/// (relative to `dir`, defaulting to `dir`).
pub fn plan_at(
    dir: &Path,
    input: &ProjectInput,
    output: Option<&Path>,
    options: PlanOptions,
) -> Result<PlanOutcome, AppError> {
    let project = load_project(dir, input.config.as_deref(), input.apps.clone())?;
    let ctx = create_context(target_dir(dir, output))?;
    commands::plan::execute(&ctx, &project.config, options)
}

/// Run the full pipeline and write the artifacts into `output`
/// (relative to `dir`, defaulting to `dir`).
pub fn generate_at(
    dir: &Path,
    input: &ProjectInput,
    output: Option<&Path>,
    options: GenerateOptions,
) -> Result<GenerateOutcome, AppError> {
    let project = load_project(dir, input.config.as_deref(), input.apps.clone())?;
    let ctx = create_context(target_dir(dir, output))?;
    commands::generate::execute(&ctx, &project.config, options)
}

/// Render every artifact for a descriptor set without touching the filesystem.
pub fn render_artifacts(
    descriptors: &[ApplicationDescriptor],
    settings: &StackSettings,
    options: PlanOptions,
) -> Result<Vec<Artifact>, AppError> {
    let renderer = MinijinjaTemplateLibrary::new()?;
    Ok(plan_artifacts(&renderer, descriptors, settings, options)?.artifacts)
}
