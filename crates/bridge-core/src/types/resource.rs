//! Resource descriptors discovered in a rendered release manifest

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind-specific runtime details, keyed by detail name
pub type Details = BTreeMap<String, String>;

/// The closed set of Kubernetes kinds whose details can be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Pod,
    Service,
    Ingress,
    Deployment,
    StatefulSet,
    ConfigMap,
    Secret,
}

impl ResourceKind {
    /// All supported kinds, in documentation order
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Pod,
        ResourceKind::Service,
        ResourceKind::Ingress,
        ResourceKind::Deployment,
        ResourceKind::StatefulSet,
        ResourceKind::ConfigMap,
        ResourceKind::Secret,
    ];

    /// Kind name as it appears in manifests
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Pod => "Pod",
            ResourceKind::Service => "Service",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
        }
    }

    /// Fully qualified resource name accepted by `kubectl get`
    pub fn api_resource(&self) -> &'static str {
        match self {
            ResourceKind::Pod => "pods",
            ResourceKind::Service => "services",
            ResourceKind::Ingress => "ingresses.networking.k8s.io",
            ResourceKind::Deployment => "deployments.apps",
            ResourceKind::StatefulSet => "statefulsets.apps",
            ResourceKind::ConfigMap => "configmaps",
            ResourceKind::Secret => "secrets",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let kind = s.trim();
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.as_str() == kind)
            .ok_or_else(|| Error::unsupported_kind(kind))
    }
}

/// One Kubernetes object found in a rendered manifest
///
/// `kind` is kept as the raw manifest string so that unsupported kinds survive
/// parsing and are rejected only when details are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(rename = "bridgeRegister", default)]
    pub register: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
}

impl ResourceDescriptor {
    /// Open a descriptor for the given kind
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Set the object name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the manifest namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Mark the descriptor for registration
    pub fn with_register(mut self, register: bool) -> Self {
        self.register = register;
        self
    }

    /// Attach resolved details
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// Resolve the kind against the supported set
    pub fn resource_kind(&self) -> Result<ResourceKind> {
        self.kind.parse()
    }

    /// Namespace to use for lookups and registration.
    ///
    /// Helm does not render `metadata.namespace` for namespaced objects unless
    /// the chart sets it, so an empty namespace falls back to the release's.
    pub fn effective_namespace<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.namespace.is_empty() {
            fallback
        } else {
            &self.namespace
        }
    }

    /// `Kind namespace/name` label used in logs and error reports
    pub fn identity(&self, fallback_namespace: &str) -> String {
        format!(
            "{} {}/{}",
            self.kind,
            self.effective_namespace(fallback_namespace),
            self.name
        )
    }
}
