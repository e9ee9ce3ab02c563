//! Plan command: renders in memory and reports what `generate` would write.

use serde::Serialize;

use crate::app::AppContext;
use crate::app::services::{PlanOptions, plan_artifacts};
use crate::domain::{AppError, ProjectConfig, TemplateRenderer};
use crate::ports::ArtifactStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedArtifact {
    pub path: String,
    pub bytes: usize,
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanOutcome {
    pub target: String,
    pub artifacts: Vec<PlannedArtifact>,
    pub directories: Vec<String>,
}

impl PlanOutcome {
    /// Paths that `generate` would refuse to overwrite without `--force`.
    pub fn conflicts(&self) -> Vec<&str> {
        self.artifacts.iter().filter(|a| a.exists).map(|a| a.path.as_str()).collect()
    }
}

pub fn execute<S: ArtifactStore, R: TemplateRenderer>(
    ctx: &AppContext<S, R>,
    project: &ProjectConfig,
    options: PlanOptions,
) -> Result<PlanOutcome, AppError> {
    let plan = plan_artifacts(ctx.renderer(), &project.apps, &project.stack, options)?;

    let artifacts = plan
        .artifacts
        .iter()
        .map(|artifact| PlannedArtifact {
            path: artifact.path.to_string(),
            bytes: artifact.content.len(),
            exists: ctx.store().exists(&artifact.path),
        })
        .collect();

    Ok(PlanOutcome { target: ctx.store().describe(), artifacts, directories: plan.directories })
}
