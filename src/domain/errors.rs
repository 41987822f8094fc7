//! Domain errors for configuration resolution and stack synthesis.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving or reading tenant configuration.
///
/// Every variant is fatal: configuration errors are operator errors, and a
/// half-resolved configuration must never reach synthesis.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration for environment '{env}' not found at {path}")]
    ConfigNotFound { env: String, path: PathBuf },

    #[error("configuration for environment '{env}' is malformed: {reason}")]
    ConfigParseError { env: String, reason: String },

    #[error("unknown tenant '{tenant}' in environment '{env}'")]
    UnknownTenant { tenant: String, env: String },

    #[error("missing required config key '{key}'")]
    MissingConfigKey { key: String },

    #[error("config key '{key}' has an unexpected type: expected {expected}")]
    InvalidConfigValue { key: String, expected: &'static str },
}

impl ConfigError {
    /// Build a `MissingConfigKey` for a dotted key path.
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingConfigKey { key: key.into() }
    }

    /// Build an `InvalidConfigValue` for a dotted key path.
    pub fn invalid(key: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidConfigValue {
            key: key.into(),
            expected,
        }
    }
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while assembling stacks and writing synthesized templates.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown stack '{name}' (available: {available})")]
    UnknownStack { name: String, available: String },

    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
