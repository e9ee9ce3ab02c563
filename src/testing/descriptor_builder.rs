//! Builder for descriptor lists in unit tests.

use crate::domain::ApplicationDescriptor;

#[derive(Debug, Default)]
pub struct DescriptorSetBuilder {
    apps: Vec<ApplicationDescriptor>,
}

impl DescriptorSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app(mut self, name: &str, port: u16, path: &str) -> Self {
        self.apps.push(ApplicationDescriptor::new(name, port, path));
        self
    }

    pub fn app_with_root(mut self, name: &str, port: u16, path: &str, root: &str) -> Self {
        self.apps.push(ApplicationDescriptor::new(name, port, path).with_document_root(root));
        self
    }

    #[allow(dead_code)]
    pub fn descriptor(mut self, descriptor: ApplicationDescriptor) -> Self {
        self.apps.push(descriptor);
        self
    }

    pub fn build(self) -> Vec<ApplicationDescriptor> {
        self.apps
    }
}
