use std::io::IsTerminal;
use std::path::PathBuf;

use dialoguer::Confirm;

use crate::app::api::{GenerateOptions, GenerateOutcome, ProjectInput};
use crate::domain::{AppError, WriteError};

#[derive(Debug, Clone, Copy)]
pub struct GenerateFlags {
    pub force: bool,
    pub starter: bool,
    pub dry_run: bool,
}

pub fn run_generate(
    input: ProjectInput,
    output: Option<PathBuf>,
    flags: GenerateFlags,
) -> Result<(), AppError> {
    let dir = super::current_dir()?;
    let mut options =
        GenerateOptions { force: flags.force, starter_page: flags.starter, dry_run: flags.dry_run };

    let outcome = match crate::app::api::generate_at(&dir, &input, output.as_deref(), options) {
        Err(AppError::Write(WriteError::ArtifactExists(existing))) if is_interactive() => {
            if !confirm_overwrite(&existing)? {
                return Err(AppError::Cancelled);
            }
            options.force = true;
            crate::app::api::generate_at(&dir, &input, output.as_deref(), options)?
        }
        result => result?,
    };

    print_outcome(&outcome);
    Ok(())
}

fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

fn confirm_overwrite(existing: &[String]) -> Result<bool, AppError> {
    println!("⚠️  These files already exist:");
    for path in existing {
        println!("  • {}", path);
    }
    Confirm::new()
        .with_prompt("Overwrite them?")
        .default(false)
        .interact()
        .map_err(|err| AppError::config_error(format!("Failed to read confirmation: {}", err)))
}

fn print_outcome(outcome: &GenerateOutcome) {
    if outcome.dry_run {
        println!("Dry run for {} (nothing written):", outcome.target);
        for path in &outcome.artifacts {
            let note = if outcome.existing.contains(path) { " (exists)" } else { "" };
            println!("  • {}{}", path, note);
        }
        return;
    }

    println!("✅ Generated {} file(s) in {}", outcome.artifacts.len(), outcome.target);
    for path in &outcome.artifacts {
        println!("  • {}", path);
    }
    println!("  Start the stack with `docker compose up -d --build`.");
}
