//! Error types for bridge-registry

use bridge_cluster::ClusterError;
use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias using bridge-registry's error type
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Failures talking to the Bridge service
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Base URL could not be turned into endpoint URLs
    #[error("Invalid Bridge service URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// HTTP client construction failed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, timeout or body read failure
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with a status other than the one the call expects
    #[error("{method} {url} returned {status} (expected {expected}){}", body_suffix(.body))]
    UnexpectedStatus {
        method: &'static str,
        url: String,
        status: StatusCode,
        expected: StatusCode,
        body: String,
    },

    /// Response body was not the expected JSON shape
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    /// Resource exists but lacks the requested field
    #[error("Field '{field}' not found in Bridge resource '{resource}'")]
    FieldMissing { field: String, resource: String },

    /// A transient failure persisted through every retry
    #[error("Giving up after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<RegistryError>,
    },

    /// Registration of one descriptor failed
    #[error("Failed to register {identity}: {source}")]
    Registration {
        identity: String,
        #[source]
        source: Box<RegistryError>,
    },

    /// Manifest acquisition failed
    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

impl RegistryError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::UnexpectedStatus { status, .. } => matches!(
                *status,
                StatusCode::REQUEST_TIMEOUT
                    | StatusCode::TOO_MANY_REQUESTS
                    | StatusCode::BAD_GATEWAY
                    | StatusCode::SERVICE_UNAVAILABLE
                    | StatusCode::GATEWAY_TIMEOUT
            ),
            _ => false,
        }
    }

    /// HTTP status of the failed call, if the service answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::RetriesExhausted { source, .. } | Self::Registration { source, .. } => {
                source.status()
            }
            _ => None,
        }
    }
}

fn body_suffix(body: &str) -> String {
    const MAX: usize = 200;
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!(": {}...", &body[..cut]),
        None => format!(": {}", body),
    }
}
