//! Generate command: the full validate, compose, render, precheck, write pipeline.

use crate::app::AppContext;
use crate::app::services::{
    PlanOptions, ensure_directories, existing_artifacts, plan_artifacts, write_artifacts,
};
use crate::domain::{AppError, ProjectConfig, TemplateRenderer, WriteError};
use crate::ports::ArtifactStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Overwrite existing targets instead of aborting the batch.
    pub force: bool,
    /// Also write a placeholder `index.php` per document root.
    pub starter_page: bool,
    /// Render and precheck only.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub target: String,
    /// Written paths, or the paths that would be written on a dry run.
    pub artifacts: Vec<String>,
    pub directories: Vec<String>,
    /// Targets that already existed (dry run only).
    pub existing: Vec<String>,
    pub dry_run: bool,
}

pub fn execute<S: ArtifactStore, R: TemplateRenderer>(
    ctx: &AppContext<S, R>,
    project: &ProjectConfig,
    options: GenerateOptions,
) -> Result<GenerateOutcome, AppError> {
    let plan_options = PlanOptions { starter_page: options.starter_page };
    let plan = plan_artifacts(ctx.renderer(), &project.apps, &project.stack, plan_options)?;
    let store = ctx.store();

    if options.dry_run {
        return Ok(GenerateOutcome {
            target: store.describe(),
            artifacts: plan.paths().into_iter().map(String::from).collect(),
            existing: existing_artifacts(store, &plan.artifacts),
            directories: plan.directories,
            dry_run: true,
        });
    }

    let mut report = match write_artifacts(store, &plan.artifacts, options.force) {
        Ok(report) | Err(WriteError::Partial(report)) => report,
        Err(err) => return Err(err.into()),
    };
    ensure_directories(store, &plan.directories, &mut report);

    if !report.is_complete() {
        return Err(WriteError::Partial(report).into());
    }

    tracing::info!(
        written = report.written.len(),
        target = %store.describe(),
        "generation complete"
    );
    Ok(GenerateOutcome {
        target: store.describe(),
        artifacts: report.written,
        directories: plan.directories,
        existing: Vec::new(),
        dry_run: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MinijinjaTemplateLibrary;
    use crate::domain::ValidationError;
    use crate::testing::{DescriptorSetBuilder, MemoryArtifactStore};

    fn context() -> AppContext<MemoryArtifactStore, MinijinjaTemplateLibrary> {
        AppContext::new(MemoryArtifactStore::new(), MinijinjaTemplateLibrary::new().unwrap())
    }

    fn two_apps() -> ProjectConfig {
        ProjectConfig {
            apps: DescriptorSetBuilder::new()
                .app("app1", 8080, "src/app1")
                .app("app2", 8081, "src/app2")
                .build(),
            ..Default::default()
        }
    }

    #[test]
    fn writes_core_artifacts_and_app_directories() {
        let ctx = context();
        let outcome = execute(&ctx, &two_apps(), GenerateOptions::default()).unwrap();

        assert_eq!(outcome.artifacts.len(), 4);
        assert!(ctx.store().has_dir("src/app1"));
        assert!(ctx.store().has_dir("src/app2"));
        let proxy = ctx.store().read("nginx/conf.d/default.conf").unwrap();
        assert_eq!(proxy.matches("server {").count(), 2);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let ctx = context();
        ctx.store().insert("docker-compose.yml", "old\n");
        let options = GenerateOptions { dry_run: true, ..Default::default() };

        let outcome = execute(&ctx, &two_apps(), options).unwrap();

        assert!(outcome.dry_run);
        assert_eq!(outcome.existing, vec!["docker-compose.yml"]);
        assert_eq!(ctx.store().write_attempts(), 0);
        assert!(!ctx.store().has_dir("src/app1"));
    }

    #[test]
    fn existing_target_aborts_before_directories() {
        let ctx = context();
        ctx.store().insert("php/local.ini", "old\n");

        let err = execute(&ctx, &two_apps(), GenerateOptions::default()).unwrap_err();

        assert!(matches!(err, AppError::Write(WriteError::ArtifactExists(_))));
        assert!(!ctx.store().has_dir("src/app1"));
        assert_eq!(ctx.store().read("php/local.ini").as_deref(), Some("old\n"));
    }

    #[test]
    fn force_overwrites() {
        let ctx = context();
        ctx.store().insert("php/local.ini", "old\n");
        let options = GenerateOptions { force: true, ..Default::default() };

        execute(&ctx, &two_apps(), options).unwrap();

        assert!(ctx.store().read("php/local.ini").unwrap().contains("upload_max_filesize"));
    }

    #[test]
    fn directory_failure_is_partial() {
        let ctx = context();
        ctx.store().fail_on("src/app2");

        let err = execute(&ctx, &two_apps(), GenerateOptions::default()).unwrap_err();

        let AppError::Write(WriteError::Partial(report)) = err else { panic!("expected partial") };
        assert_eq!(report.written.len(), 4);
        assert_eq!(report.failed[0].path, "src/app2/");
    }

    #[test]
    fn invalid_descriptors_touch_nothing() {
        let ctx = context();
        let project = ProjectConfig {
            apps: DescriptorSetBuilder::new().app("a", 8080, "a").app("b", 8080, "b").build(),
            ..Default::default()
        };

        let err = execute(&ctx, &project, GenerateOptions::default()).unwrap_err();

        assert!(matches!(
            err,
            AppError::Validation(ValidationError::DuplicatePort { port: 8080, .. })
        ));
        assert_eq!(ctx.store().write_attempts(), 0);
    }
}
