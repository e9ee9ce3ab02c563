pub mod filesystem_artifact_store;
pub mod scaffold_assets;
pub mod template_library;

pub use filesystem_artifact_store::FilesystemArtifactStore;
pub use template_library::MinijinjaTemplateLibrary;
