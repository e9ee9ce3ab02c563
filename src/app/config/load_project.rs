use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::config::{CONFIG_FILE_NAMES, ConfigFormat, parse_project_config};
use crate::domain::{AppError, ApplicationDescriptor, ProjectConfig};

/// A descriptor set ready for the pipeline, with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub config: ProjectConfig,
    /// The descriptor file that was read, if any.
    pub source: Option<PathBuf>,
}

/// First descriptor file in `dir`, in [`CONFIG_FILE_NAMES`] order.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}

/// Load the project for `dir`.
///
/// `explicit` (relative paths resolve against `dir`) must exist when given;
/// otherwise the first discovered file is used. Non-empty `cli_apps` replace
/// the file's `apps` while its `stack` section still applies.
pub fn load_project(
    dir: &Path,
    explicit: Option<&Path>,
    cli_apps: Vec<ApplicationDescriptor>,
) -> Result<LoadedProject, AppError> {
    let source = match explicit {
        Some(path) => {
            let path = dir.join(path);
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "Descriptor file not found: {}",
                    path.display()
                )));
            }
            Some(path)
        }
        None => discover_config(dir),
    };

    let mut config = match &source {
        Some(path) => read_config(path)?,
        None if cli_apps.is_empty() => return Err(AppError::ConfigNotFound),
        None => ProjectConfig::default(),
    };

    if !cli_apps.is_empty() {
        if !config.apps.is_empty() {
            tracing::info!(
                file_apps = config.apps.len(),
                cli_apps = cli_apps.len(),
                "--app flags replace descriptor file apps"
            );
        }
        config.apps = cli_apps;
    }

    Ok(LoadedProject { config, source })
}

fn read_config(path: &Path) -> Result<ProjectConfig, AppError> {
    tracing::debug!(path = %path.display(), "reading descriptor file");
    let content = fs::read_to_string(path)?;
    let what = path.file_name().and_then(|name| name.to_str()).unwrap_or("descriptor file");
    parse_project_config(&content, ConfigFormat::from_path(path), what)
}
