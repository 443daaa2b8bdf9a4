//! Typed views over live Kubernetes objects
//!
//! Each view deserializes only the fields its detail mapping needs from
//! `kubectl get -o json` output. Missing optional fields fall back to their
//! Kubernetes defaults.
//!
//! # Example
//!
//! ```rust
//! use bridge_cluster::objects::{extract, Service};
//!
//! let json = r#"{"spec":{"clusterIP":"10.0.0.1","ports":[{"port":80}]}}"#;
//! let details = extract::<Service>(json, "prod", "web").unwrap();
//!
//! assert_eq!(details["clusterIP"], "10.0.0.1");
//! assert_eq!(details["ports"], "80/TCP");
//! ```

use crate::error::{ClusterError, Result};
use bridge_core::{Details, ResourceKind};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

/// One implementation per supported kind
pub trait DetailExtractor: DeserializeOwned {
    const KIND: ResourceKind;

    /// Build the detail mapping; `namespace` is the namespace the object was read from
    fn details(&self, namespace: &str, name: &str) -> Result<Details>;
}

/// Decode `json` as `T` and extract its details
///
/// # Arguments
///
/// * `json` - object body as printed by `kubectl get -o json`
/// * `namespace` - namespace the object was read from
/// * `name` - object name, used in error messages
pub fn extract<T: DetailExtractor>(json: &str, namespace: &str, name: &str) -> Result<Details> {
    let object: T = serde_json::from_str(json).map_err(|source| ClusterError::Decode {
        kind: T::KIND.to_string(),
        namespace: namespace.to_string(),
        name: name.to_string(),
        source,
    })?;
    object.details(namespace, name)
}

fn details_from<const N: usize>(pairs: [(&str, String); N]) -> Details {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn joined_keys<V>(map: &BTreeMap<String, V>) -> String {
    map.keys().map(String::as_str).collect::<Vec<_>>().join(",")
}

// ─── Pod ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct Pod {
    #[serde(default)]
    pub spec: PodSpec,
    #[serde(default)]
    pub status: PodStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(default)]
    pub node_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PodStatus {
    #[serde(rename = "podIP", default)]
    pub pod_ip: String,
}

impl DetailExtractor for Pod {
    const KIND: ResourceKind = ResourceKind::Pod;

    fn details(&self, namespace: &str, _name: &str) -> Result<Details> {
        Ok(details_from([
            ("namespace", namespace.to_string()),
            ("podIP", self.status.pod_ip.clone()),
            ("nodeName", self.spec.node_name.clone()),
        ]))
    }
}

// ─── Service ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub spec: ServiceSpec,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServiceSpec {
    #[serde(rename = "clusterIP", default)]
    pub cluster_ip: String,
    #[serde(default)]
    pub ports: Vec<ServicePort>,
}

#[derive(Debug, Deserialize)]
pub struct ServicePort {
    pub port: i32,
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

fn default_protocol() -> String {
    "TCP".to_string()
}

impl DetailExtractor for Service {
    const KIND: ResourceKind = ResourceKind::Service;

    fn details(&self, namespace: &str, _name: &str) -> Result<Details> {
        let ports = self
            .spec
            .ports
            .iter()
            .map(|p| format!("{}/{}", p.port, p.protocol))
            .collect::<Vec<_>>()
            .join(",");

        Ok(details_from([
            ("namespace", namespace.to_string()),
            ("clusterIP", self.spec.cluster_ip.clone()),
            ("ports", ports),
        ]))
    }
}

// ─── Ingress ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct Ingress {
    #[serde(default)]
    pub spec: IngressSpec,
}

#[derive(Debug, Default, Deserialize)]
pub struct IngressSpec {
    #[serde(default)]
    pub rules: Vec<IngressRule>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IngressRule {
    #[serde(default)]
    pub host: String,
}

impl DetailExtractor for Ingress {
    const KIND: ResourceKind = ResourceKind::Ingress;

    fn details(&self, namespace: &str, name: &str) -> Result<Details> {
        let rule = self
            .spec
            .rules
            .first()
            .ok_or_else(|| ClusterError::EmptyIngressRules {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })?;

        Ok(details_from([
            ("namespace", namespace.to_string()),
            ("host", rule.host.clone()),
        ]))
    }
}

// ─── Deployment / StatefulSet ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ReplicaSpec {
    /// Kubernetes defaults an unset replica count to 1
    pub replicas: Option<i32>,
}

impl ReplicaSpec {
    fn replicas(&self) -> i32 {
        self.replicas.unwrap_or(1)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Deployment {
    #[serde(default)]
    pub spec: ReplicaSpec,
    #[serde(default)]
    pub status: DeploymentStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatus {
    #[serde(default)]
    pub available_replicas: i32,
    #[serde(default)]
    pub updated_replicas: i32,
}

impl DetailExtractor for Deployment {
    const KIND: ResourceKind = ResourceKind::Deployment;

    fn details(&self, namespace: &str, _name: &str) -> Result<Details> {
        Ok(details_from([
            ("namespace", namespace.to_string()),
            ("replicas", self.spec.replicas().to_string()),
            (
                "availableReplicas",
                self.status.available_replicas.to_string(),
            ),
            ("updatedReplicas", self.status.updated_replicas.to_string()),
        ]))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StatefulSet {
    #[serde(default)]
    pub spec: ReplicaSpec,
    #[serde(default)]
    pub status: StatefulSetStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatefulSetStatus {
    #[serde(default)]
    pub ready_replicas: i32,
    #[serde(default)]
    pub current_replicas: i32,
}

impl DetailExtractor for StatefulSet {
    const KIND: ResourceKind = ResourceKind::StatefulSet;

    fn details(&self, namespace: &str, _name: &str) -> Result<Details> {
        Ok(details_from([
            ("namespace", namespace.to_string()),
            ("replicas", self.spec.replicas().to_string()),
            ("readyReplicas", self.status.ready_replicas.to_string()),
            ("currentReplicas", self.status.current_replicas.to_string()),
        ]))
    }
}

// ─── ConfigMap / Secret ──────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ConfigMap {
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl DetailExtractor for ConfigMap {
    const KIND: ResourceKind = ResourceKind::ConfigMap;

    fn details(&self, namespace: &str, _name: &str) -> Result<Details> {
        Ok(details_from([
            ("namespace", namespace.to_string()),
            ("dataKeys", joined_keys(&self.data)),
        ]))
    }
}

/// Secret values stay base64-encoded; only key names are ever read
#[derive(Debug, Default, Deserialize)]
pub struct Secret {
    #[serde(default)]
    pub data: BTreeMap<String, serde_json::Value>,
    #[serde(rename = "type", default)]
    pub secret_type: String,
}

impl DetailExtractor for Secret {
    const KIND: ResourceKind = ResourceKind::Secret;

    fn details(&self, namespace: &str, _name: &str) -> Result<Details> {
        Ok(details_from([
            ("namespace", namespace.to_string()),
            ("dataKeys", joined_keys(&self.data)),
            ("type", self.secret_type.clone()),
        ]))
    }
}
