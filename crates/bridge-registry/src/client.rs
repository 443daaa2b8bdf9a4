//! HTTP client for the Bridge service
//!
//! Two endpoints are used:
//! - `POST {base}/resource/{namespace}/{name}`: register a resource, expects 201
//! - `GET {base}/resource/{resource}`: read a resource's fields, expects 200

use crate::error::{RegistryError, Result};
use crate::record::RegistrationRecord;
use async_trait::async_trait;
use bridge_core::retry::{RetryError, RetryExecutor, RetryPredicate, TracingObserver};
use bridge_core::types::{NetworkConfig, RetryPolicy};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::future::Future;
use tracing::debug;
use url::Url;

/// Fields of one Bridge resource, as returned by the service
pub type ResourceFields = Map<String, Value>;

/// Bridge service operations used by registration and translation
#[async_trait]
pub trait BridgeApi: Send + Sync {
    /// Store `record` under `namespace/name`
    async fn register_resource(
        &self,
        namespace: &str,
        name: &str,
        record: &RegistrationRecord,
    ) -> Result<()>;

    /// Fetch the fields stored for `resource`
    async fn get_resource(&self, resource: &str) -> Result<ResourceFields>;
}

/// Retries only failures a repeat request could fix
#[derive(Debug, Clone, Copy, Default)]
pub struct TransientFailure;

impl RetryPredicate<RegistryError> for TransientFailure {
    fn should_retry(&self, error: &RegistryError) -> bool {
        error.is_transient()
    }
}

/// reqwest-backed Bridge service client
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl BridgeClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, network: &NetworkConfig, retry: RetryPolicy) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| RegistryError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(RegistryError::InvalidUrl {
                url: base_url.to_string(),
                message: "not a hierarchical URL".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(network.http_timeout())
            .build()
            .map_err(RegistryError::Client)?;

        Ok(Self {
            http,
            base_url: parsed,
            retry,
        })
    }

    /// `{base}/resource/<segments...>`, each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RegistryError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "not a hierarchical URL".to_string(),
            })?
            .pop_if_empty()
            .push("resource")
            .extend(segments);
        Ok(url)
    }

    async fn with_retry<T, F, Fut>(&self, operation: String, op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        RetryExecutor::new(self.retry.clone())
            .with_predicate(TransientFailure)
            .with_observer(TracingObserver::new(operation))
            .execute(op)
            .await
            .map_err(|err| match err {
                RetryError::Exhausted {
                    attempts, source, ..
                } if attempts > 1 => RegistryError::RetriesExhausted {
                    attempts,
                    source: Box::new(source),
                },
                other => other.into_source(),
            })
    }

    async fn post_once(&self, url: &Url, record: &RegistrationRecord) -> Result<()> {
        debug!("POST {}", url);
        let response = self
            .http
            .post(url.clone())
            .json(record)
            .send()
            .await
            .map_err(|source| transport(url, source))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(unexpected("POST", url, status, StatusCode::CREATED, body));
        }
        Ok(())
    }

    async fn get_once(&self, url: &Url) -> Result<ResourceFields> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| transport(url, source))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(unexpected("GET", url, status, StatusCode::OK, body));
        }

        let body = response
            .text()
            .await
            .map_err(|source| transport(url, source))?;
        parse_fields(url, &body)
    }
}

#[async_trait]
impl BridgeApi for BridgeClient {
    async fn register_resource(
        &self,
        namespace: &str,
        name: &str,
        record: &RegistrationRecord,
    ) -> Result<()> {
        let url = self.endpoint(&[namespace, name])?;
        let url = &url;
        self.with_retry(format!("POST {}", url), move || {
            self.post_once(url, record)
        })
        .await
    }

    async fn get_resource(&self, resource: &str) -> Result<ResourceFields> {
        let url = self.endpoint(&[resource])?;
        let url = &url;
        self.with_retry(format!("GET {}", url), move || self.get_once(url))
            .await
    }
}

fn transport(url: &Url, source: reqwest::Error) -> RegistryError {
    RegistryError::Transport {
        url: url.to_string(),
        source,
    }
}

fn unexpected(
    method: &'static str,
    url: &Url,
    status: StatusCode,
    expected: StatusCode,
    body: String,
) -> RegistryError {
    RegistryError::UnexpectedStatus {
        method,
        url: url.to_string(),
        status,
        expected,
        body,
    }
}

fn parse_fields(url: &Url, body: &str) -> Result<ResourceFields> {
    let malformed = |message: String| RegistryError::MalformedResponse {
        url: url.to_string(),
        message,
    };

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(malformed(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
        Err(e) => Err(malformed(e.to_string())),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
