use std::collections::{BTreeMap, BTreeSet};

use super::ApplicationDescriptor;
use crate::domain::error::ValidationError;

/// Validate a descriptor set.
///
/// Descriptors are checked in input order and the first violation is
/// returned. Pure; touches nothing outside its arguments.
pub fn validate(descriptors: &[ApplicationDescriptor]) -> Result<(), ValidationError> {
    if descriptors.is_empty() {
        return Err(ValidationError::NoApplications);
    }

    let mut names: BTreeSet<&str> = BTreeSet::new();
    let mut ports: BTreeMap<u16, &str> = BTreeMap::new();

    for descriptor in descriptors {
        descriptor.check()?;

        if !names.insert(descriptor.name.as_str()) {
            return Err(ValidationError::DuplicateName(descriptor.name.clone()));
        }

        if let Some(first) = ports.get(&descriptor.listen_port) {
            return Err(ValidationError::DuplicatePort {
                port: descriptor.listen_port,
                first: (*first).to_string(),
                second: descriptor.name.clone(),
            });
        }
        ports.insert(descriptor.listen_port, descriptor.name.as_str());
    }

    Ok(())
}
