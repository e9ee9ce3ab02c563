pub mod artifacts;
pub mod compose;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod identifiers;
pub mod stack;
pub mod templates;

pub use artifacts::{Artifact, ArtifactPath};
pub use compose::{ComposeManifest, Composition, ProxyConfig, compose};
pub use config::{ConfigFormat, ProjectConfig};
pub use descriptor::{ApplicationDescriptor, ResolvedApplication, validate};
pub use error::{AppError, FailedArtifact, TemplateError, ValidationError, WriteError, WriteReport};
pub use stack::StackSettings;
pub use templates::{TemplateKind, TemplateRenderer};
