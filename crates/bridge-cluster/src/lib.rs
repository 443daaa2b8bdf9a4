//! # bridge-cluster
//!
//! Cluster-facing side of helm-bridge:
//! - Release manifests via `helm get manifest`
//! - Live object reads via `kubectl get -o json`
//! - Per-kind detail extraction for the supported resource kinds
//!
//! Both CLIs sit behind the [`ManifestSource`] and [`ClusterApi`] traits so
//! the registration flow can be driven by in-memory fakes in tests.

mod command;
pub mod error;
pub mod helm;
pub mod kubectl;
pub mod objects;
pub mod resolver;
pub mod traits;

pub use error::{ClusterError, Result};
pub use helm::HelmManifestSource;
pub use kubectl::KubectlClient;
pub use resolver::DetailResolver;
pub use traits::{ClusterApi, ManifestSource};
