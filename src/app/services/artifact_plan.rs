//! Renders a descriptor set into the full in-memory artifact batch.

use std::collections::BTreeSet;

use crate::domain::artifacts::STARTER_PAGE_FILE;
use crate::domain::{
    AppError, ApplicationDescriptor, Artifact, ArtifactPath, Composition, StackSettings,
    TemplateKind, TemplateRenderer,
};

/// Options that change which artifacts a run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Add a placeholder `index.php` in each application's document root.
    pub starter_page: bool,
}

/// Everything a run would write, rendered but not yet on disk.
#[derive(Debug, Clone)]
pub struct ArtifactPlan {
    pub composition: Composition,
    pub artifacts: Vec<Artifact>,
    /// Application directories that must exist for the bind mounts.
    pub directories: Vec<String>,
}

impl ArtifactPlan {
    pub fn paths(&self) -> Vec<&str> {
        self.artifacts.iter().map(|artifact| artifact.path.as_str()).collect()
    }
}

/// Validate, compose, and render every artifact.
///
/// Fails before producing anything on validation or template errors.
pub fn plan_artifacts<R: TemplateRenderer>(
    renderer: &R,
    descriptors: &[ApplicationDescriptor],
    settings: &StackSettings,
    options: PlanOptions,
) -> Result<ArtifactPlan, AppError> {
    let composition = Composition::build(descriptors, settings)?;
    tracing::debug!(apps = composition.apps.len(), "composed descriptor set");

    let mut artifacts = Vec::new();
    for kind in TemplateKind::CORE {
        let content = match kind {
            TemplateKind::ComposeManifest => renderer.render(kind, &composition.manifest)?,
            TemplateKind::ProxyServerBlock => renderer.render(kind, &composition.proxy)?,
            TemplateKind::ImageBuildRecipe => renderer.render(kind, &composition.recipe)?,
            TemplateKind::RuntimeConfig => renderer.render(kind, &composition.runtime)?,
            TemplateKind::StarterPage => continue,
        };
        let Some(path) = kind.output_path() else { continue };
        tracing::debug!(artifact = path, bytes = content.len(), "rendered {}", kind);
        artifacts.push(Artifact::new(ArtifactPath::new(path)?, content));
    }

    let mut directories = Vec::new();
    let mut seen = BTreeSet::new();
    for app in &composition.apps {
        let public_dir = app.public_dir();
        if !seen.insert(public_dir.clone()) {
            continue;
        }

        if options.starter_page {
            let page_path = if public_dir.is_empty() {
                STARTER_PAGE_FILE.to_string()
            } else {
                format!("{}/{}", public_dir, STARTER_PAGE_FILE)
            };
            let content = renderer.render(TemplateKind::StarterPage, app)?;
            artifacts.push(Artifact::new(ArtifactPath::new(&page_path)?, content));
        }
        directories.push(public_dir);
    }

    Ok(ArtifactPlan { composition, artifacts, directories })
}
