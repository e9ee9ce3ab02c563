pub mod artifact_plan;
pub mod artifact_writer;

pub use artifact_plan::{ArtifactPlan, PlanOptions, plan_artifacts};
pub use artifact_writer::{ensure_directories, existing_artifacts, write_artifacts};
