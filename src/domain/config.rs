//! Descriptor file model and parser (`fpmkit.yml` / `fpmkit.toml`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::descriptor::ApplicationDescriptor;
use crate::domain::stack::StackSettings;

/// File names looked up in the working directory, in priority order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["fpmkit.yml", "fpmkit.yaml", "fpmkit.toml"];

/// Contents of a descriptor file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub stack: StackSettings,
    #[serde(default)]
    pub apps: Vec<ApplicationDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// TOML for `.toml` files, YAML for everything else.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Parse descriptor file content. `what` names the source in error messages.
pub fn parse_project_config(
    content: &str,
    format: ConfigFormat,
    what: &str,
) -> Result<ProjectConfig, AppError> {
    match format {
        ConfigFormat::Yaml => {
            // An empty YAML document deserializes as unit, not as an empty mapping.
            if content.trim().is_empty() {
                return Ok(ProjectConfig::default());
            }
            serde_yaml::from_str(content)
                .map_err(|e| AppError::ParseError { what: what.into(), details: e.to_string() })
        }
        ConfigFormat::Toml => toml::from_str(content)
            .map_err(|e| AppError::ParseError { what: what.into(), details: e.to_string() }),
    }
}
