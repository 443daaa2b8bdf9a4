//! # bridge-registry
//!
//! Bridge service side of helm-bridge:
//! - [`BridgeClient`]: reqwest client with timeouts and retry of transient failures
//! - [`Registrar`] and [`RegistrationPass`]: register flagged release resources
//! - [`PlaceholderEngine`]: substitute `{{ bridge.<resource>.<field> }}` tokens

pub mod client;
pub mod error;
pub mod pass;
pub mod record;
pub mod registrar;
pub mod translate;

pub use client::{BridgeApi, BridgeClient, ResourceFields};
pub use error::{RegistryError, Result};
pub use pass::{EntryStatus, RegistrationPass, RegistrationReport, ReportEntry};
pub use record::RegistrationRecord;
pub use registrar::{RegistrationOutcome, Registrar};
pub use translate::PlaceholderEngine;
