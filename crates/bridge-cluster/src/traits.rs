//! Collaborator traits for the manifest source and the cluster API

use crate::error::Result;
use async_trait::async_trait;
use bridge_core::{ReleaseTarget, ResourceKind};

/// Produces the rendered manifest of a deployed release
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Return the manifest text for `release`
    async fn manifest(&self, release: &ReleaseTarget) -> Result<String>;
}

/// Reads live objects from the cluster
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Fetch one object as JSON text
    async fn get_object(&self, kind: ResourceKind, namespace: &str, name: &str)
        -> Result<String>;
}
