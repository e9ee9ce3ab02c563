//! Target-directory storage for generated artifacts.

use crate::domain::{AppError, ArtifactPath};

/// Port for writing artifacts into a target directory.
///
/// All paths are relative to the target directory. [`ArtifactPath`] already
/// guarantees they cannot escape it.
pub trait ArtifactStore {
    /// Check whether anything (file, directory, or link) occupies `path`.
    fn exists(&self, path: &ArtifactPath) -> bool;

    /// Write `content` to `path`, creating parent directories as needed.
    ///
    /// The file is flushed and closed before this returns, on success and on error.
    fn write(&self, path: &ArtifactPath, content: &str) -> Result<(), AppError>;

    /// Create a directory (and parents). `""` names the target directory itself.
    fn ensure_dir(&self, path: &str) -> Result<(), AppError>;

    /// Human-readable location of the target directory.
    fn describe(&self) -> String;
}
