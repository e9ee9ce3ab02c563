use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::domain::{AppError, ArtifactPath};
use crate::ports::ArtifactStore;

/// Filesystem-based artifact store rooted at a target directory.
#[derive(Debug, Clone)]
pub struct FilesystemArtifactStore {
    root: PathBuf,
}

impl FilesystemArtifactStore {
    /// Create a store for the given target directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

impl ArtifactStore for FilesystemArtifactStore {
    fn exists(&self, path: &ArtifactPath) -> bool {
        // symlink_metadata so a dangling link still counts as occupied.
        fs::symlink_metadata(self.resolve(path.as_str())).is_ok()
    }

    fn write(&self, path: &ArtifactPath, content: &str) -> Result<(), AppError> {
        let target = self.resolve(path.as_str());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&target)?);
        writer.write_all(content.as_bytes())?;
        let file = writer.into_inner().map_err(|err| err.into_error())?;
        file.sync_all()?;
        Ok(())
    }

    fn ensure_dir(&self, path: &str) -> Result<(), AppError> {
        fs::create_dir_all(self.resolve(path))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
