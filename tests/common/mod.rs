//! Shared testing utilities for fpmkit CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The four files every successful `generate` writes.
#[allow(dead_code)]
pub const CORE_ARTIFACTS: [&str; 4] =
    ["docker-compose.yml", "nginx/conf.d/default.conf", "php/Dockerfile", "php/local.ini"];

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `fpmkit` binary within the work directory.
    pub fn cli(&self) -> Command {
        self.cli_in(self.work_dir())
    }

    /// Build a command for invoking the compiled `fpmkit` binary within a custom directory.
    pub fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("fpmkit").expect("Failed to locate fpmkit binary");
        cmd.current_dir(dir.as_ref()).env_remove("RUST_LOG");
        cmd
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.work_dir.join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
    }

    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Every regular file under the work directory, relative and sorted.
    pub fn files(&self) -> Vec<String> {
        let mut files = Vec::new();
        collect_files(&self.work_dir, &self.work_dir, &mut files);
        files.sort();
        files
    }

    /// Assert that none of the core artifacts exist.
    pub fn assert_no_artifacts(&self) {
        for artifact in CORE_ARTIFACTS {
            assert!(!self.path(artifact).exists(), "{} should not exist", artifact);
        }
    }
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<String>) {
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read directory entry").path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).expect("path under root");
            files.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}
