use bridge_core::{Details, ResourceDescriptor};
use serde::{Deserialize, Serialize};

/// Request body for `POST /resource/{namespace}/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub name: String,
    pub resource_type: String,
    pub details: Details,
}

impl RegistrationRecord {
    /// Build the record for a descriptor; missing details serialize as `{}`
    pub fn from_descriptor(descriptor: &ResourceDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            resource_type: descriptor.kind.clone(),
            details: descriptor.details.clone().unwrap_or_default(),
        }
    }
}
