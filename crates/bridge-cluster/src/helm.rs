//! Manifest acquisition through `helm get manifest`

use crate::command::run_tool;
use crate::error::{ClusterError, Result};
use crate::traits::ManifestSource;
use async_trait::async_trait;
use bridge_core::ReleaseTarget;
use std::time::Duration;
use tracing::debug;

/// Reads release manifests with the Helm CLI
pub struct HelmManifestSource {
    binary: String,
    timeout: Duration,
}

impl HelmManifestSource {
    /// Create a source using `binary` (name in PATH or absolute path)
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    fn args(release: &ReleaseTarget) -> Vec<String> {
        vec![
            "get".to_string(),
            "manifest".to_string(),
            release.name.clone(),
            "-n".to_string(),
            release.namespace.clone(),
        ]
    }
}

#[async_trait]
impl ManifestSource for HelmManifestSource {
    async fn manifest(&self, release: &ReleaseTarget) -> Result<String> {
        let manifest = run_tool(&self.binary, &Self::args(release), self.timeout)
            .await
            .map_err(|e| ClusterError::ManifestUnavailable {
                release: release.name.clone(),
                namespace: release.namespace.clone(),
                message: e.to_string(),
            })?;

        debug!(
            "Fetched manifest for {}/{} ({} bytes)",
            release.namespace,
            release.name,
            manifest.len()
        );
        Ok(manifest)
    }
}
