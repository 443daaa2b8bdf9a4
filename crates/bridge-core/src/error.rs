//! Error types for bridge-core

use thiserror::Error;

/// Result type alias using bridge-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for helm-bridge
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A required setting was not provided by any source
    #[error("{setting} is required{hint}")]
    MissingSetting { setting: String, hint: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Kind string outside the supported set
    #[error("Unsupported resource kind: {kind}")]
    UnsupportedKind { kind: String },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a missing setting error, optionally naming where it can be supplied
    pub fn missing_setting(setting: impl Into<String>, hint: Option<&str>) -> Self {
        Self::MissingSetting {
            setting: setting.into(),
            hint: hint.map(|h| format!(" ({})", h)).unwrap_or_default(),
        }
    }

    /// Create an unsupported kind error
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedKind { kind: kind.into() }
    }

    /// Whether this error belongs to the configuration class (fatal before any work)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. } | Self::InvalidConfig { .. } | Self::MissingSetting { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_setting_with_hint() {
        let err = Error::missing_setting("API URL", Some("set --api-url or API_URL"));
        assert_eq!(
            err.to_string(),
            "API URL is required (set --api-url or API_URL)"
        );
        assert!(err.is_config_error());
    }

    #[test]
    fn test_missing_setting_without_hint() {
        let err = Error::missing_setting("HELM_NAMESPACE environment variable", None);
        assert_eq!(
            err.to_string(),
            "HELM_NAMESPACE environment variable is required"
        );
    }

    #[test]
    fn test_unsupported_kind_is_not_config_error() {
        let err = Error::unsupported_kind("CronJob");
        assert_eq!(err.to_string(), "Unsupported resource kind: CronJob");
        assert!(!err.is_config_error());
    }
}
