//! Artifact path catalog and the validated artifact path type.

use std::fmt;

use crate::domain::error::WriteError;
use crate::domain::identifiers::normalize_relative_path;

pub const COMPOSE_FILE: &str = "docker-compose.yml";
pub const PROXY_CONFIG_DIR: &str = "nginx/conf.d";
pub const PROXY_CONFIG_FILE: &str = "nginx/conf.d/default.conf";
pub const IMAGE_BUILD_DIR: &str = "php";
pub const IMAGE_RECIPE_FILE: &str = "php/Dockerfile";
pub const RUNTIME_CONFIG_FILE: &str = "php/local.ini";
pub const STARTER_PAGE_FILE: &str = "index.php";

/// Where the proxy image reads site configs from.
pub const PROXY_CONFIG_MOUNT: &str = "/etc/nginx/conf.d";
/// Where the official PHP images scan for extra ini files.
pub const RUNTIME_CONFIG_MOUNT: &str = "/usr/local/etc/php/conf.d/local.ini";

/// A relative path inside the target directory, `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactPath(String);

impl ArtifactPath {
    pub fn new(path: &str) -> Result<Self, WriteError> {
        match normalize_relative_path(path, false) {
            Ok(normalized) if !normalized.is_empty() => Ok(Self(normalized)),
            _ => Err(WriteError::InvalidArtifactPath(path.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: ArtifactPath,
    pub content: String,
}

impl Artifact {
    pub fn new(path: ArtifactPath, content: String) -> Self {
        Self { path, content }
    }
}
