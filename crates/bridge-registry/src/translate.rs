//! Placeholder translation against the Bridge service
//!
//! Every well-formed `{{ bridge.<resource>.<field> }}` token in a document is
//! replaced by the named field of the Bridge resource. Any failure aborts the
//! translation and the caller gets no partially substituted document.

use crate::client::{BridgeApi, ResourceFields};
use crate::error::{RegistryError, Result};
use bridge_core::placeholder::render_value;
use bridge_core::PlaceholderToken;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Resolves placeholder tokens through a [`BridgeApi`]
pub struct PlaceholderEngine<B> {
    api: B,
}

impl<B: BridgeApi> PlaceholderEngine<B> {
    pub fn new(api: B) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &B {
        &self.api
    }

    /// Return `document` with every placeholder substituted.
    ///
    /// Each distinct resource is fetched once. A document without tokens is
    /// returned unchanged and causes no requests.
    pub async fn translate(&self, document: &str) -> Result<String> {
        let tokens = PlaceholderToken::collect(document);
        if tokens.is_empty() {
            debug!("No bridge placeholders found");
            return Ok(document.to_string());
        }

        let mut resources: HashMap<String, ResourceFields> = HashMap::new();
        let mut output = document.to_string();

        for token in &tokens {
            let fields = match resources.entry(token.resource().to_string()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(self.api.get_resource(token.resource()).await?),
            };

            let value = fields
                .get(token.field())
                .ok_or_else(|| RegistryError::FieldMissing {
                    field: token.field().to_string(),
                    resource: token.resource().to_string(),
                })?;

            output = token.substitute(&output, &render_value(value));
            debug!("Substituted {}", token.marker());
        }

        Ok(output)
    }
}
