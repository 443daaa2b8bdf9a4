//! One registration pass over a release: manifest, details, registration
//!
//! Descriptors are processed strictly in manifest order. A failure for one
//! descriptor is logged and recorded in the report; the pass moves on to the
//! next. Only manifest acquisition failures abort the pass.

use crate::client::BridgeApi;
use crate::error::Result;
use crate::registrar::{RegistrationOutcome, Registrar};
use bridge_cluster::{ClusterApi, DetailResolver, ManifestSource};
use bridge_core::{parse_manifest, ReleaseTarget, ResourceDescriptor};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result for one descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryStatus {
    Registered,
    Skipped,
    Failed,
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntryStatus::Registered => "registered",
            EntryStatus::Skipped => "skipped",
            EntryStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub kind: String,
    pub name: String,
    /// Namespace the resource was looked up and registered under
    pub namespace: String,
    pub status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-descriptor outcomes of a registration pass
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationReport {
    pub release: String,
    pub namespace: String,
    pub entries: Vec<ReportEntry>,
}

impl RegistrationReport {
    fn new(release: &ReleaseTarget) -> Self {
        Self {
            release: release.name.clone(),
            namespace: release.namespace.clone(),
            entries: Vec::new(),
        }
    }

    fn push(&mut self, descriptor: &ResourceDescriptor, status: EntryStatus, error: Option<String>) {
        self.entries.push(ReportEntry {
            kind: descriptor.kind.clone(),
            name: descriptor.name.clone(),
            namespace: descriptor.effective_namespace(&self.namespace).to_string(),
            status,
            error,
        });
    }

    fn count(&self, status: EntryStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    pub fn registered(&self) -> usize {
        self.count(EntryStatus::Registered)
    }

    pub fn skipped(&self) -> usize {
        self.count(EntryStatus::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(EntryStatus::Failed)
    }
}

/// Wires a manifest source, detail resolver and registrar together
pub struct RegistrationPass<M, C, B> {
    manifests: M,
    resolver: DetailResolver<C>,
    registrar: Registrar<B>,
}

impl<M, C, B> RegistrationPass<M, C, B>
where
    M: ManifestSource,
    C: ClusterApi,
    B: BridgeApi,
{
    pub fn new(manifests: M, cluster: C, api: B) -> Self {
        Self {
            manifests,
            resolver: DetailResolver::new(cluster),
            registrar: Registrar::new(api),
        }
    }

    /// Run the pass for `release`
    pub async fn run(&self, release: &ReleaseTarget) -> Result<RegistrationReport> {
        let manifest = self.manifests.manifest(release).await?;
        let descriptors = parse_manifest(&manifest);
        info!(
            "Found {} resource(s) in release {}",
            descriptors.len(),
            release.name
        );

        let mut report = RegistrationReport::new(release);
        for descriptor in descriptors {
            self.process(descriptor, &release.namespace, &mut report)
                .await;
        }
        Ok(report)
    }

    async fn process(
        &self,
        mut descriptor: ResourceDescriptor,
        fallback_namespace: &str,
        report: &mut RegistrationReport,
    ) {
        let identity = descriptor.identity(fallback_namespace);

        // Unflagged resources are never looked up
        if !descriptor.register {
            debug!("Skipping {} (not flagged)", identity);
            report.push(&descriptor, EntryStatus::Skipped, None);
            return;
        }

        match self.resolver.resolve(&descriptor, fallback_namespace).await {
            Ok(details) => descriptor.details = Some(details),
            Err(e) => {
                warn!("Skipping {}: {}", identity, e);
                report.push(&descriptor, EntryStatus::Failed, Some(e.to_string()));
                return;
            }
        }

        match self.registrar.register(&descriptor, fallback_namespace).await {
            Ok(RegistrationOutcome::Registered) => {
                info!("Registered {}", identity);
                report.push(&descriptor, EntryStatus::Registered, None);
            }
            Ok(RegistrationOutcome::Skipped) => {
                report.push(&descriptor, EntryStatus::Skipped, None);
            }
            Err(e) => {
                warn!("{}", e);
                report.push(&descriptor, EntryStatus::Failed, Some(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ResourceFields;
    use crate::error::RegistryError;
    use crate::record::RegistrationRecord;
    use async_trait::async_trait;
    use bridge_cluster::ClusterError;
    use bridge_core::ResourceKind;
    use std::sync::Mutex;

    struct StaticManifest(&'static str);

    #[async_trait]
    impl ManifestSource for StaticManifest {
        async fn manifest(&self, _release: &ReleaseTarget) -> bridge_cluster::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingManifest;

    #[async_trait]
    impl ManifestSource for FailingManifest {
        async fn manifest(&self, release: &ReleaseTarget) -> bridge_cluster::Result<String> {
            Err(ClusterError::ManifestUnavailable {
                release: release.name.clone(),
                namespace: release.namespace.clone(),
                message: "release not found".into(),
            })
        }
    }

    /// Every lookup succeeds except objects named `missing`
    #[derive(Default)]
    struct Cluster {
        lookups: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ClusterApi for Cluster {
        async fn get_object(
            &self,
            kind: ResourceKind,
            namespace: &str,
            name: &str,
        ) -> bridge_cluster::Result<String> {
            self.lookups.lock().unwrap().push(format!("{}/{}", namespace, name));
            if name == "missing" {
                return Err(ClusterError::lookup(kind.as_str(), namespace, name, "NotFound"));
            }
            Ok(r#"{"spec":{"clusterIP":"10.0.0.1","ports":[]}}"#.to_string())
        }
    }

    /// Rejects posts for names in `reject`
    #[derive(Default)]
    struct Api {
        reject: Vec<&'static str>,
        posted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BridgeApi for Api {
        async fn register_resource(
            &self,
            namespace: &str,
            name: &str,
            _record: &RegistrationRecord,
        ) -> Result<()> {
            self.posted.lock().unwrap().push(format!("{}/{}", namespace, name));
            if self.reject.iter().any(|r| *r == name) {
                return Err(RegistryError::MalformedResponse {
                    url: format!("http://bridge/resource/{}/{}", namespace, name),
                    message: "rejected".into(),
                });
            }
            Ok(())
        }

        async fn get_resource(&self, _resource: &str) -> Result<ResourceFields> {
            unreachable!()
        }
    }

    fn release() -> ReleaseTarget {
        ReleaseTarget {
            name: "shop".into(),
            namespace: "prod".into(),
        }
    }

    const MANIFEST: &str = "\
kind: Service
name: first
bridgeRegister: true
---
kind: Service
name: second
bridgeRegister: true
---
kind: ConfigMap
name: plain
---
kind: Service
name: missing
bridgeRegister: true
---
kind: CronJob
name: nightly
bridgeRegister: true
";

    #[tokio::test]
    async fn test_failures_do_not_stop_the_pass() {
        let pass = RegistrationPass::new(
            StaticManifest(MANIFEST),
            Cluster::default(),
            Api {
                reject: vec!["first"],
                ..Default::default()
            },
        );

        let report = pass.run(&release()).await.unwrap();
        let statuses: Vec<_> = report
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.status))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("first", EntryStatus::Failed),
                ("second", EntryStatus::Registered),
                ("plain", EntryStatus::Skipped),
                ("missing", EntryStatus::Failed),
                ("nightly", EntryStatus::Failed),
            ]
        );
        assert_eq!(report.registered(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 3);

        // Lookup failures and unsupported kinds are never posted
        let posted = pass.registrar.api().posted.lock().unwrap().clone();
        assert_eq!(posted, vec!["prod/first", "prod/second"]);
    }

    #[tokio::test]
    async fn test_unflagged_resources_are_not_looked_up() {
        let cluster = Cluster::default();
        let pass = RegistrationPass::new(
            StaticManifest("kind: ConfigMap\nname: plain\n"),
            cluster,
            Api::default(),
        );

        let report = pass.run(&release()).await.unwrap();
        assert_eq!(report.skipped(), 1);
        assert!(pass.resolver_lookups().is_empty());
    }

    #[tokio::test]
    async fn test_manifest_failure_is_fatal() {
        let pass = RegistrationPass::new(FailingManifest, Cluster::default(), Api::default());
        let err = pass.run(&release()).await.unwrap_err();
        assert!(matches!(err, RegistryError::Cluster(_)));
        assert!(err.to_string().contains("release not found"));
    }

    #[test]
    fn test_report_json() {
        let mut report = RegistrationReport::new(&release());
        let descriptor = ResourceDescriptor::new("Service").with_name("api");
        report.push(&descriptor, EntryStatus::Registered, None);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["entries"][0]["status"], "registered");
        assert_eq!(json["entries"][0]["namespace"], "prod");
        assert!(json["entries"][0].get("error").is_none());
    }

    impl RegistrationPass<StaticManifest, Cluster, Api> {
        fn resolver_lookups(&self) -> Vec<String> {
            self.resolver.cluster().lookups.lock().unwrap().clone()
        }
    }
}
