//! `{{ bridge.<resource>.<field> }}` placeholder handling
//!
//! Extraction and substitution are pure text operations; resolving a token
//! against the Bridge service lives in `bridge-registry`.

use serde_json::Value;

const OPEN_MARKER: &str = "{{ bridge.";
const CLOSE_MARKER: &str = " }}";
const TOKEN_PREFIX: &str = "bridge";

/// Extract every placeholder path found in the document.
///
/// Returns the text between `{{ ` and ` }}` (the `bridge.` prefix included)
/// once per physical occurrence. An opening marker without a closing marker
/// later on the same line ends extraction for that line.
pub fn extract_placeholders(document: &str) -> Vec<String> {
    let mut placeholders = Vec::new();

    for line in document.lines() {
        let mut rest = line;
        while let Some(open) = rest.find(OPEN_MARKER) {
            // Skip "{{ " but keep "bridge."
            let start = open + 3;
            let Some(len) = rest[start..].find(CLOSE_MARKER) else {
                break;
            };
            placeholders.push(rest[start..start + len].to_string());
            rest = &rest[start + len + CLOSE_MARKER.len()..];
        }
    }

    placeholders
}

/// A well-formed `bridge.<resource>.<field>` token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceholderToken {
    raw: String,
    resource: String,
    field: String,
}

impl PlaceholderToken {
    /// Parse an extracted path; anything but exactly `bridge.<resource>.<field>`
    /// with non-empty components yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split('.').collect();
        match parts.as_slice() {
            [TOKEN_PREFIX, resource, field] if !resource.is_empty() && !field.is_empty() => {
                Some(Self {
                    raw: raw.to_string(),
                    resource: resource.to_string(),
                    field: field.to_string(),
                })
            }
            _ => None,
        }
    }

    /// Well-formed tokens in the document, first occurrence order, without repeats
    pub fn collect(document: &str) -> Vec<Self> {
        let mut tokens: Vec<Self> = Vec::new();
        for raw in extract_placeholders(document) {
            match Self::parse(&raw) {
                Some(token) if !tokens.contains(&token) => tokens.push(token),
                Some(_) => {}
                None => tracing::debug!("Ignoring malformed placeholder '{}'", raw),
            }
        }
        tokens
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// The literal marker as written in the document
    pub fn marker(&self) -> String {
        format!("{{{{ {} }}}}", self.raw)
    }

    /// Replace every occurrence of this token's marker in `document`
    pub fn substitute(&self, document: &str, value: &str) -> String {
        document.replace(&self.marker(), value)
    }
}

/// Render a JSON field value as substitution text
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
