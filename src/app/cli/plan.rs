use std::path::PathBuf;

use crate::app::api::{PlanOptions, ProjectInput};
use crate::domain::AppError;

pub fn run_plan(
    input: ProjectInput,
    output: Option<PathBuf>,
    starter: bool,
    json: bool,
) -> Result<(), AppError> {
    let options = PlanOptions { starter_page: starter };
    let outcome =
        crate::app::api::plan_at(&super::current_dir()?, &input, output.as_deref(), options)?;

    if json {
        let rendered = serde_json::to_string_pretty(&outcome).map_err(|err| {
            AppError::config_error(format!("Failed to serialize plan: {}", err))
        })?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("Plan for {}:", outcome.target);
    for artifact in &outcome.artifacts {
        let marker = if artifact.exists { "overwrite" } else { "create" };
        println!("  {:<9} {} ({} bytes)", marker, artifact.path, artifact.bytes);
    }
    let conflicts = outcome.conflicts();
    if !conflicts.is_empty() {
        println!("⚠️  {} file(s) exist; `fpmkit generate` needs --force", conflicts.len());
    }
    Ok(())
}
