//! Live object lookups through `kubectl get -o json`

use crate::command::run_tool;
use crate::error::{ClusterError, Result};
use crate::traits::ClusterApi;
use async_trait::async_trait;
use bridge_core::ResourceKind;
use std::time::Duration;

/// Cluster API backed by the kubectl CLI
///
/// Authentication and context selection are whatever kubectl is configured
/// with (kubeconfig or in-cluster service account).
pub struct KubectlClient {
    binary: String,
    timeout: Duration,
    context: Option<String>,
}

impl KubectlClient {
    /// Create a client using `binary` (name in PATH or absolute path)
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
            context: None,
        }
    }

    /// Use a specific kubeconfig context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn args(&self, kind: ResourceKind, namespace: &str, name: &str) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(context) = &self.context {
            args.push("--context".to_string());
            args.push(context.clone());
        }
        args.extend([
            "get".to_string(),
            kind.api_resource().to_string(),
            name.to_string(),
            "-n".to_string(),
            namespace.to_string(),
            "-o".to_string(),
            "json".to_string(),
            format!("--request-timeout={}s", self.timeout.as_secs().max(1)),
        ]);
        args
    }
}

#[async_trait]
impl ClusterApi for KubectlClient {
    async fn get_object(&self, kind: ResourceKind, namespace: &str, name: &str) -> Result<String> {
        // An empty name would turn `get` into a list call
        if name.is_empty() {
            return Err(ClusterError::lookup(
                kind.as_str(),
                namespace,
                name,
                "resource has no name",
            ));
        }

        run_tool(&self.binary, &self.args(kind, namespace, name), self.timeout)
            .await
            .map_err(|e| ClusterError::lookup(kind.as_str(), namespace, name, e.to_string()))
    }
}
