use std::fmt;

use crate::domain::artifacts::{
    COMPOSE_FILE, IMAGE_RECIPE_FILE, PROXY_CONFIG_FILE, RUNTIME_CONFIG_FILE,
};

/// The artifact kinds the template library can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateKind {
    ProxyServerBlock,
    ImageBuildRecipe,
    RuntimeConfig,
    ComposeManifest,
    /// Opt-in placeholder front controller.
    StarterPage,
}

impl TemplateKind {
    /// The artifacts every generation run produces, in write order.
    pub const CORE: [TemplateKind; 4] = [
        TemplateKind::ComposeManifest,
        TemplateKind::ProxyServerBlock,
        TemplateKind::ImageBuildRecipe,
        TemplateKind::RuntimeConfig,
    ];

    /// Name of the embedded template (relative to the template asset root).
    pub fn template_name(self) -> &'static str {
        match self {
            TemplateKind::ProxyServerBlock => "nginx/default.conf.j2",
            TemplateKind::ImageBuildRecipe => "php/Dockerfile.j2",
            TemplateKind::RuntimeConfig => "php/local.ini.j2",
            TemplateKind::ComposeManifest => "docker-compose.yml.j2",
            TemplateKind::StarterPage => "starter/index.php.j2",
        }
    }

    /// Fixed output path; `None` for per-application artifacts.
    pub fn output_path(self) -> Option<&'static str> {
        match self {
            TemplateKind::ProxyServerBlock => Some(PROXY_CONFIG_FILE),
            TemplateKind::ImageBuildRecipe => Some(IMAGE_RECIPE_FILE),
            TemplateKind::RuntimeConfig => Some(RUNTIME_CONFIG_FILE),
            TemplateKind::ComposeManifest => Some(COMPOSE_FILE),
            TemplateKind::StarterPage => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TemplateKind::ProxyServerBlock => "proxy config",
            TemplateKind::ImageBuildRecipe => "image build recipe",
            TemplateKind::RuntimeConfig => "runtime config",
            TemplateKind::ComposeManifest => "compose manifest",
            TemplateKind::StarterPage => "starter page",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
