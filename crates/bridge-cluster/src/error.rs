//! Error types for bridge-cluster

use thiserror::Error;

/// Result type alias using bridge-cluster's error type
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Failures while acquiring the manifest or reading live objects
#[derive(Error, Debug)]
pub enum ClusterError {
    /// Required CLI tool is not installed
    #[error("{tool} not found in PATH")]
    ToolNotFound { tool: String },

    /// Tool exited unsuccessfully
    #[error("{tool} exited with {status}: {stderr}")]
    CommandFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// Tool did not finish within the configured timeout
    #[error("{tool} timed out after {secs}s")]
    Timeout { tool: String, secs: u64 },

    /// `helm get manifest` could not produce the release manifest
    #[error("Failed to get Helm manifest for release {release} in namespace {namespace}: {message}")]
    ManifestUnavailable {
        release: String,
        namespace: String,
        message: String,
    },

    /// Live object lookup failed (not found, forbidden, transport)
    #[error("Failed to get {kind} details for {namespace}/{name}: {message}")]
    Lookup {
        kind: String,
        namespace: String,
        name: String,
        message: String,
    },

    /// Kind outside the supported set
    #[error("Unsupported resource kind: {kind}")]
    UnsupportedKind { kind: String },

    /// Object JSON did not match the expected shape
    #[error("Failed to decode {kind} {namespace}/{name}: {source}")]
    Decode {
        kind: String,
        namespace: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Ingress has no rules to read a host from
    #[error("Ingress {namespace}/{name} has no rules")]
    EmptyIngressRules { namespace: String, name: String },

    /// IO error while spawning a tool
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClusterError {
    /// Create a lookup error for the given object
    pub fn lookup(
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Lookup {
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
            message: message.into(),
        }
    }
}
