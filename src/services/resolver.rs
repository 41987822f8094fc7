//! Tenant/environment configuration resolution.
//!
//! One configuration document exists per environment, named
//! `<env>_config.yaml`, with tenant identifiers as its top-level keys. The
//! resolver loads the document for the requested environment, extracts the
//! requested tenant's subtree, and injects the `tenant` and `env` identifiers
//! so downstream naming never has to re-thread them.

use std::fs;
use std::path::PathBuf;

use serde_yaml::Mapping;
use tracing::debug;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::tenant::{ConfigDocument, TenantConfig};

/// Resolves `(env, tenant)` pairs to validated tenant configurations.
///
/// Holds only the directory containing the per-environment documents; both
/// identifiers are explicit arguments and nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    config_dir: PathBuf,
}

impl ConfigResolver {
    /// Create a resolver reading documents from `config_dir`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// The document path for an environment: `<config_dir>/<env>_config.yaml`.
    pub fn document_path(&self, env_id: &str) -> PathBuf {
        self.config_dir.join(format!("{env_id}_config.yaml"))
    }

    /// Load and parse the configuration document for `env_id`.
    pub fn load_document(&self, env_id: &str) -> ConfigResult<ConfigDocument> {
        let path = self.document_path(env_id);
        let content = fs::read_to_string(&path).map_err(|_| ConfigError::ConfigNotFound {
            env: env_id.to_string(),
            path: path.clone(),
        })?;

        let tenants: Mapping =
            serde_yaml::from_str(&content).map_err(|err| ConfigError::ConfigParseError {
                env: env_id.to_string(),
                reason: err.to_string(),
            })?;

        debug!(env = env_id, path = %path.display(), tenants = tenants.len(), "loaded configuration document");
        Ok(ConfigDocument::new(env_id, tenants))
    }

    /// Resolve the configuration for `tenant_id` in `env_id`.
    ///
    /// The returned config contains exactly the tenant's subtree plus the
    /// injected `tenant` and `env` keys. No other keys are validated here;
    /// missing resource keys surface when a stack first reads them.
    pub fn resolve(&self, env_id: &str, tenant_id: &str) -> ConfigResult<TenantConfig> {
        let document = self.load_document(env_id)?;
        let mut config = document.tenant(tenant_id)?;
        config.insert("tenant", tenant_id);
        config.insert("env", env_id);
        debug!(tenant = tenant_id, env = env_id, "resolved tenant configuration");
        Ok(config)
    }
}
