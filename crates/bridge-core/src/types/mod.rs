//! Type definitions shared across helm-bridge crates

mod resource;
mod runtime_config;

pub use resource::{Details, ResourceDescriptor, ResourceKind};
pub use runtime_config::{NetworkConfig, RetryPolicy, RetryStrategy, ToolsConfig};
