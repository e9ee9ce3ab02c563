//! In-memory `ArtifactStore` with per-path failure injection.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{AppError, ArtifactPath};
use crate::ports::ArtifactStore;

#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    files: Mutex<BTreeMap<String, String>>,
    dirs: Mutex<BTreeSet<String>>,
    failing: Mutex<BTreeSet<String>>,
    write_attempts: AtomicUsize,
}

#[allow(dead_code)]
impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file without counting it as a write attempt.
    pub fn insert(&self, path: &str, content: &str) {
        self.files.lock().unwrap().insert(path.to_string(), content.to_string());
    }

    /// Make every write or directory creation at `path` fail.
    pub fn fail_on(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_string());
    }

    pub fn read(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.files.lock().unwrap().clone()
    }

    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    fn check_failure(&self, path: &str) -> Result<(), AppError> {
        if self.failing.lock().unwrap().contains(path) {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("injected failure for {}", path),
            )));
        }
        Ok(())
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn exists(&self, path: &ArtifactPath) -> bool {
        self.files.lock().unwrap().contains_key(path.as_str())
            || self.dirs.lock().unwrap().contains(path.as_str())
    }

    fn write(&self, path: &ArtifactPath, content: &str) -> Result<(), AppError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        self.check_failure(path.as_str())?;
        self.files.lock().unwrap().insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn ensure_dir(&self, path: &str) -> Result<(), AppError> {
        self.check_failure(path)?;
        self.dirs.lock().unwrap().insert(path.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
