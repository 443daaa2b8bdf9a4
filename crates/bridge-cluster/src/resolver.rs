//! Detail resolution: descriptor in, kind-specific detail mapping out

use crate::error::{ClusterError, Result};
use crate::objects::{
    extract, ConfigMap, Deployment, Ingress, Pod, Secret, Service, StatefulSet,
};
use crate::traits::ClusterApi;
use bridge_core::{Details, ResourceDescriptor, ResourceKind};
use tracing::debug;

/// Reads the live object behind a descriptor and maps it to [`Details`]
pub struct DetailResolver<C> {
    cluster: C,
}

impl<C: ClusterApi> DetailResolver<C> {
    pub fn new(cluster: C) -> Self {
        Self { cluster }
    }

    pub fn cluster(&self) -> &C {
        &self.cluster
    }

    /// Resolve details for `descriptor`.
    ///
    /// An empty descriptor namespace is looked up in `fallback_namespace`.
    /// Unsupported kinds fail before any cluster call.
    pub async fn resolve(
        &self,
        descriptor: &ResourceDescriptor,
        fallback_namespace: &str,
    ) -> Result<Details> {
        let kind = descriptor
            .resource_kind()
            .map_err(|_| ClusterError::UnsupportedKind {
                kind: descriptor.kind.clone(),
            })?;
        let namespace = descriptor.effective_namespace(fallback_namespace);
        let name = descriptor.name.as_str();

        let json = self.cluster.get_object(kind, namespace, name).await?;

        let details = match kind {
            ResourceKind::Pod => extract::<Pod>(&json, namespace, name),
            ResourceKind::Service => extract::<Service>(&json, namespace, name),
            ResourceKind::Ingress => extract::<Ingress>(&json, namespace, name),
            ResourceKind::Deployment => extract::<Deployment>(&json, namespace, name),
            ResourceKind::StatefulSet => extract::<StatefulSet>(&json, namespace, name),
            ResourceKind::ConfigMap => extract::<ConfigMap>(&json, namespace, name),
            ResourceKind::Secret => extract::<Secret>(&json, namespace, name),
        }?;

        debug!(
            "Resolved {} detail(s) for {}",
            details.len(),
            descriptor.identity(fallback_namespace)
        );
        Ok(details)
    }
}
