//! Validate command: checks descriptors and stack settings without rendering.

use crate::domain::{AppError, Composition, ProjectConfig, ResolvedApplication};

#[derive(Debug, Clone)]
pub struct ValidateOutcome {
    pub apps: Vec<ResolvedApplication>,
}

pub fn execute(project: &ProjectConfig) -> Result<ValidateOutcome, AppError> {
    let composition = Composition::build(&project.apps, &project.stack)?;
    Ok(ValidateOutcome { apps: composition.apps })
}
