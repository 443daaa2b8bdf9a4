//! Line-oriented parsing of rendered Helm manifests
//!
//! This is not a YAML parser. It relies on the shape of `helm get manifest`
//! output: documents separated by `---`, each with a top-level `kind:` line
//! followed by `metadata` keys. Only three keys are recognized while a
//! descriptor is open:
//!
//! - `name:` sets the object name
//! - `namespace:` sets the manifest namespace
//! - any line containing `bridgeRegister: true` marks it for registration
//!
//! A descriptor is opened only by a `kind:` line with a non-empty value, so
//! every parsed descriptor has a kind. An empty `kind:` still closes the open
//! descriptor, and the lines after it are ignored until the next `kind:`.
//! Kinds are not validated here.

use crate::types::ResourceDescriptor;
use tracing::trace;

const KIND_PREFIX: &str = "kind:";
const NAME_PREFIX: &str = "name:";
const NAMESPACE_PREFIX: &str = "namespace:";
const REGISTER_MARKER: &str = "bridgeRegister: true";

/// Parse rendered manifest text into descriptors, in source order
pub fn parse_manifest(manifest: &str) -> Vec<ResourceDescriptor> {
    let mut parser = ManifestParser::default();
    for line in manifest.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Single-pass parser holding at most one open descriptor
#[derive(Debug, Default)]
pub struct ManifestParser {
    current: Option<ResourceDescriptor>,
    resources: Vec<ResourceDescriptor>,
}

impl ManifestParser {
    /// Consume one line of manifest text
    pub fn feed(&mut self, raw: &str) {
        let line = raw.trim();

        if let Some(kind) = line.strip_prefix(KIND_PREFIX) {
            self.finalize();
            let kind = scalar(kind);
            if !kind.is_empty() {
                self.current = Some(ResourceDescriptor::new(kind));
            }
            return;
        }

        if is_document_separator(line) {
            self.finalize();
            return;
        }

        let Some(current) = self.current.as_mut() else {
            return;
        };

        // Nested `name:` keys (container ports, volume refs, ...) follow the
        // object's own metadata, so the first occurrence is the object's.
        if let Some(name) = line.strip_prefix(NAME_PREFIX) {
            if current.name.is_empty() {
                current.name = scalar(name);
            }
        } else if let Some(namespace) = line.strip_prefix(NAMESPACE_PREFIX) {
            if current.namespace.is_empty() {
                current.namespace = scalar(namespace);
            }
        } else if line.contains(REGISTER_MARKER) {
            current.register = true;
        }
    }

    /// Finalize the open descriptor and return everything parsed
    pub fn finish(mut self) -> Vec<ResourceDescriptor> {
        self.finalize();
        self.resources
    }

    fn finalize(&mut self) {
        if let Some(resource) = self.current.take() {
            trace!(
                "Parsed {} '{}' (namespace '{}', register: {})",
                resource.kind,
                resource.name,
                resource.namespace,
                resource.register
            );
            self.resources.push(resource);
        }
    }
}

/// `---`, optionally followed by a comment or directive
fn is_document_separator(line: &str) -> bool {
    line == "---" || line.starts_with("--- ") || line.starts_with("---\t")
}

/// Trim a scalar value and strip one level of matching quotes
fn scalar(value: &str) -> String {
    let value = value.trim();
    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    unquoted.unwrap_or(value).to_string()
}
