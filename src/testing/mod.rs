mod descriptor_builder;
mod memory_artifact_store;

pub use descriptor_builder::DescriptorSetBuilder;
pub use memory_artifact_store::MemoryArtifactStore;
