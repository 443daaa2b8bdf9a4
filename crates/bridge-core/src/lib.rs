//! # bridge-core
//!
//! Core library for the helm-bridge CLI providing:
//! - Resource descriptors and the closed set of supported kinds
//! - Line-oriented parsing of rendered Helm manifests
//! - `{{ bridge.<resource>.<field> }}` placeholder extraction and substitution
//! - Settings resolution (config file, environment, flags)
//! - Retry execution engine with policy-based configuration

pub mod config;
pub mod error;
pub mod manifest;
pub mod placeholder;
pub mod retry;
pub mod types;

pub use config::{ConfigFile, ReleaseTarget, Settings};
pub use error::{Error, Result};
pub use manifest::parse_manifest;
pub use placeholder::{extract_placeholders, PlaceholderToken};
pub use types::{Details, ResourceDescriptor, ResourceKind};
