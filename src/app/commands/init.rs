//! Init command: writes a starter descriptor file.

use crate::adapters::scaffold_assets::{STARTER_CONFIG, starter_config};
use crate::domain::config::CONFIG_FILE_NAMES;
use crate::domain::{AppError, ArtifactPath};
use crate::ports::ArtifactStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    /// Path of the written descriptor file, relative to the target directory.
    pub path: String,
}

/// Write `fpmkit.yml` unless any descriptor file is already present.
pub fn execute<S: ArtifactStore>(store: &S) -> Result<InitOutcome, AppError> {
    for name in CONFIG_FILE_NAMES {
        if store.exists(&ArtifactPath::new(name)?) {
            return Err(AppError::ConfigExists(name.to_string()));
        }
    }

    let path = ArtifactPath::new(STARTER_CONFIG)?;
    store.write(&path, starter_config()?)?;
    tracing::info!(path = %path, target = %store.describe(), "wrote starter descriptor");

    Ok(InitOutcome { path: path.to_string() })
}
