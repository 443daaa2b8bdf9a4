//! Integration tests driving the helm and kubectl adapters through mock
//! executables.
//!
//! ```sh
//! cargo test --package bridge-cluster --test cluster_tests
//! ```

#![cfg(unix)]

mod common;

use bridge_cluster::{
    ClusterApi, ClusterError, DetailResolver, HelmManifestSource, KubectlClient, ManifestSource,
};
use bridge_core::{parse_manifest, ReleaseTarget, ResourceDescriptor, ResourceKind};
use common::*;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(10);

fn release() -> ReleaseTarget {
    ReleaseTarget {
        name: "shop".into(),
        namespace: "prod".into(),
    }
}

const MANIFEST: &str = r#"---
# Source: shop/templates/service.yaml
apiVersion: v1
kind: Service
metadata:
  name: shop-api
  annotations:
    bridgeRegister: true
spec:
  ports:
    - name: http
      port: 80
---
# Source: shop/templates/deployment.yaml
apiVersion: apps/v1
kind: Deployment
metadata:
  name: shop-web
  namespace: prod
"#;

// ─── helm ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_helm_manifest_invocation_and_parse() {
    let bin = MockBin::new().unwrap();
    create_mock_executable(bin.dir.path(), "helm", MANIFEST, 0).unwrap();

    let source = HelmManifestSource::new(bin.path("helm"), TIMEOUT);
    let manifest = source.manifest(&release()).await.unwrap();

    assert_eq!(bin.log("helm"), vec!["get manifest shop -n prod"]);

    let descriptors = parse_manifest(&manifest);
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0].kind, "Service");
    assert_eq!(descriptors[0].name, "shop-api");
    assert!(descriptors[0].register);
    assert_eq!(descriptors[1].name, "shop-web");
    assert!(!descriptors[1].register);
}

#[tokio::test]
async fn test_helm_failure_is_manifest_unavailable() {
    let bin = MockBin::new().unwrap();
    create_conditional_mock(bin.dir.path(), "helm", &[], "Error: release: not found").unwrap();

    let source = HelmManifestSource::new(bin.path("helm"), TIMEOUT);
    let err = source.manifest(&release()).await.unwrap_err();

    assert!(matches!(err, ClusterError::ManifestUnavailable { .. }));
    let msg = err.to_string();
    assert!(msg.contains("shop"), "{}", msg);
    assert!(msg.contains("release: not found"), "{}", msg);
}

#[tokio::test]
async fn test_helm_missing_binary() {
    let source = HelmManifestSource::new("/nonexistent/helm", TIMEOUT);
    let err = source.manifest(&release()).await.unwrap_err();
    assert!(err.to_string().contains("not found in PATH"));
}

// ─── kubectl ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_kubectl_get_object_args() {
    let bin = MockBin::new().unwrap();
    create_mock_executable(bin.dir.path(), "kubectl", r#"{"kind":"Pod"}"#, 0).unwrap();

    let client = KubectlClient::new(bin.path("kubectl"), TIMEOUT).with_context("staging");
    let json = client
        .get_object(ResourceKind::Pod, "prod", "web-0")
        .await
        .unwrap();

    assert_eq!(json.trim(), r#"{"kind":"Pod"}"#);
    assert_eq!(
        bin.log("kubectl"),
        vec!["--context staging get pods web-0 -n prod -o json --request-timeout=10s"]
    );
}

#[tokio::test]
async fn test_kubectl_not_found_is_lookup_error() {
    let bin = MockBin::new().unwrap();
    create_conditional_mock(
        bin.dir.path(),
        "kubectl",
        &[],
        r#"Error from server (NotFound): services "ghost" not found"#,
    )
    .unwrap();

    let client = KubectlClient::new(bin.path("kubectl"), TIMEOUT);
    let err = client
        .get_object(ResourceKind::Service, "prod", "ghost")
        .await
        .unwrap_err();

    match err {
        ClusterError::Lookup {
            kind,
            namespace,
            name,
            message,
        } => {
            assert_eq!(kind, "Service");
            assert_eq!(namespace, "prod");
            assert_eq!(name, "ghost");
            assert!(message.contains("NotFound"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ─── resolver over kubectl ───────────────────────────────────────────────────

#[tokio::test]
async fn test_resolver_reads_each_kind_through_kubectl() {
    let bin = MockBin::new().unwrap();
    create_conditional_mock(
        bin.dir.path(),
        "kubectl",
        &[
            (
                "get services",
                r#"{"spec":{"clusterIP":"10.0.0.1","ports":[{"port":80,"protocol":"TCP"},{"port":443,"protocol":"TCP"}]}}"#,
            ),
            (
                "get ingresses.networking.k8s.io",
                r#"{"spec":{"rules":[{"host":"shop.example.com"}]}}"#,
            ),
            (
                "get statefulsets.apps",
                r#"{"spec":{"replicas":3},"status":{"readyReplicas":3,"currentReplicas":3}}"#,
            ),
            (
                "get secrets",
                r#"{"type":"Opaque","data":{"password":"cGFzcw==","user":"dXNlcg=="}}"#,
            ),
        ],
        "unexpected call",
    )
    .unwrap();

    let resolver = DetailResolver::new(KubectlClient::new(bin.path("kubectl"), TIMEOUT));

    let svc = ResourceDescriptor::new("Service").with_name("shop-api");
    let details = resolver.resolve(&svc, "prod").await.unwrap();
    assert_eq!(details["ports"], "80/TCP,443/TCP");
    assert_eq!(details["namespace"], "prod");

    let ing = ResourceDescriptor::new("Ingress")
        .with_name("shop")
        .with_namespace("edge");
    let details = resolver.resolve(&ing, "prod").await.unwrap();
    assert_eq!(details["host"], "shop.example.com");
    assert_eq!(details["namespace"], "edge");

    let sts = ResourceDescriptor::new("StatefulSet").with_name("db");
    let details = resolver.resolve(&sts, "prod").await.unwrap();
    assert_eq!(details["readyReplicas"], "3");

    let secret = ResourceDescriptor::new("Secret").with_name("creds");
    let details = resolver.resolve(&secret, "prod").await.unwrap();
    assert_eq!(details["dataKeys"], "password,user");
    assert_eq!(details["type"], "Opaque");

    let log = bin.log("kubectl");
    assert_eq!(log.len(), 4);
    assert!(log[0].contains("get services shop-api -n prod"));
    assert!(log[1].contains("-n edge"));
}

#[tokio::test]
async fn test_resolver_unsupported_kind_does_not_call_kubectl() {
    let bin = MockBin::new().unwrap();
    create_mock_executable(bin.dir.path(), "kubectl", "{}", 0).unwrap();

    let resolver = DetailResolver::new(KubectlClient::new(bin.path("kubectl"), TIMEOUT));
    let job = ResourceDescriptor::new("Job").with_name("migrate");

    let err = resolver.resolve(&job, "prod").await.unwrap_err();
    assert_eq!(err.to_string(), "Unsupported resource kind: Job");
    assert!(bin.log("kubectl").is_empty());
}
