//! Precheck-then-write for an artifact batch.

use crate::domain::{Artifact, FailedArtifact, WriteError, WriteReport};
use crate::ports::ArtifactStore;

/// Paths in `artifacts` that are already occupied in `store`.
pub fn existing_artifacts<S: ArtifactStore + ?Sized>(
    store: &S,
    artifacts: &[Artifact],
) -> Vec<String> {
    artifacts
        .iter()
        .filter(|artifact| store.exists(&artifact.path))
        .map(|artifact| artifact.path.to_string())
        .collect()
}

/// Write a batch of artifacts.
///
/// With `overwrite == false` every target is checked first and the batch is
/// rejected with [`WriteError::ArtifactExists`] before any byte is written.
/// Once writing starts, failures are collected per artifact; files that were
/// written stay on disk and the batch reports [`WriteError::Partial`].
pub fn write_artifacts<S: ArtifactStore + ?Sized>(
    store: &S,
    artifacts: &[Artifact],
    overwrite: bool,
) -> Result<WriteReport, WriteError> {
    if !overwrite {
        let existing = existing_artifacts(store, artifacts);
        if !existing.is_empty() {
            tracing::info!(count = existing.len(), "precheck rejected batch");
            return Err(WriteError::ArtifactExists(existing));
        }
    }

    let mut report = WriteReport::default();
    for artifact in artifacts {
        let path = artifact.path.to_string();
        match store.write(&artifact.path, &artifact.content) {
            Ok(()) => {
                tracing::debug!(artifact = %path, "wrote artifact");
                report.written.push(path);
            }
            Err(err) => {
                tracing::debug!(artifact = %path, error = %err, "failed to write artifact");
                report.failed.push(FailedArtifact { path, reason: err.to_string() });
            }
        }
    }

    if report.is_complete() { Ok(report) } else { Err(WriteError::Partial(report)) }
}

/// Create application directories, recording failures in `report`.
pub fn ensure_directories<S: ArtifactStore + ?Sized>(
    store: &S,
    directories: &[String],
    report: &mut WriteReport,
) {
    for dir in directories {
        if let Err(err) = store.ensure_dir(dir) {
            let path = if dir.is_empty() { ".".to_string() } else { format!("{}/", dir) };
            tracing::debug!(directory = %path, error = %err, "failed to create directory");
            report.failed.push(FailedArtifact { path, reason: err.to_string() });
        }
    }
}
