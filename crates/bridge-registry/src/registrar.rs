//! Registration of single descriptors with the Bridge service

use crate::client::BridgeApi;
use crate::error::{RegistryError, Result};
use crate::record::RegistrationRecord;
use bridge_core::ResourceDescriptor;
use tracing::debug;

/// What happened to one descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    /// Not flagged with `bridgeRegister: true`; nothing was sent
    Skipped,
}

/// Posts flagged descriptors to the Bridge service
pub struct Registrar<B> {
    api: B,
}

impl<B: BridgeApi> Registrar<B> {
    pub fn new(api: B) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &B {
        &self.api
    }

    /// Register `descriptor` under its namespace, or `fallback_namespace`
    /// when the manifest omitted one.
    ///
    /// Unflagged descriptors are skipped without a network call. Failures
    /// carry the descriptor's identity.
    pub async fn register(
        &self,
        descriptor: &ResourceDescriptor,
        fallback_namespace: &str,
    ) -> Result<RegistrationOutcome> {
        if !descriptor.register {
            debug!(
                "{} is not flagged for registration",
                descriptor.identity(fallback_namespace)
            );
            return Ok(RegistrationOutcome::Skipped);
        }

        let namespace = descriptor.effective_namespace(fallback_namespace);
        let record = RegistrationRecord::from_descriptor(descriptor);

        self.api
            .register_resource(namespace, &descriptor.name, &record)
            .await
            .map_err(|source| RegistryError::Registration {
                identity: descriptor.identity(fallback_namespace),
                source: Box::new(source),
            })?;

        Ok(RegistrationOutcome::Registered)
    }
}
