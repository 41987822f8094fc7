//! Tenant configuration model.
//!
//! A tenant's configuration is an ordered string-keyed mapping with arbitrary
//! nested values, read from a per-environment YAML document. No schema is
//! enforced at load time; every consumer pulls the keys it needs through the
//! typed accessors here, which fail with the full dotted key path on the first
//! missing or mistyped value.

use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};

use crate::domain::errors::{ConfigError, ConfigResult};

/// A loaded per-environment configuration document.
///
/// Top-level keys are tenant identifiers; values are the tenants'
/// configuration subtrees. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    env: String,
    tenants: Mapping,
}

impl ConfigDocument {
    /// Wrap a parsed top-level mapping for the given environment.
    pub fn new(env: impl Into<String>, tenants: Mapping) -> Self {
        Self {
            env: env.into(),
            tenants,
        }
    }

    /// The environment this document was loaded for.
    pub fn env(&self) -> &str {
        &self.env
    }

    /// Tenant identifiers present in the document, in document order.
    pub fn tenant_ids(&self) -> Vec<&str> {
        self.tenants.keys().filter_map(Value::as_str).collect()
    }

    /// Extract the configuration subtree for `tenant_id`.
    ///
    /// The returned config is the raw subtree; identity injection is the
    /// resolver's job. A present tenant whose value is not a mapping means the
    /// document itself is malformed, not that the tenant is unknown.
    pub fn tenant(&self, tenant_id: &str) -> ConfigResult<TenantConfig> {
        let value = self
            .tenants
            .get(tenant_id)
            .ok_or_else(|| ConfigError::UnknownTenant {
                tenant: tenant_id.to_string(),
                env: self.env.clone(),
            })?;

        match value {
            Value::Mapping(values) => Ok(TenantConfig::from_mapping(values.clone())),
            _ => Err(ConfigError::ConfigParseError {
                env: self.env.clone(),
                reason: format!("tenant '{tenant_id}' entry is not a mapping"),
            }),
        }
    }
}

/// A single tenant's configuration subtree.
///
/// Keys are looked up lazily: a key is only required at the moment a stack
/// reads it, and absence surfaces as [`ConfigError::MissingConfigKey`] with
/// the dotted path from the tenant root (e.g. `redshift.node_type`).
#[derive(Debug, Clone, PartialEq)]
pub struct TenantConfig {
    path: String,
    values: Mapping,
}

impl TenantConfig {
    /// Wrap a mapping as a tenant-root configuration.
    pub fn from_mapping(values: Mapping) -> Self {
        Self {
            path: String::new(),
            values,
        }
    }

    fn nested(path: String, values: Mapping) -> Self {
        Self { path, values }
    }

    fn key_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Keys present at this level, in document order.
    pub fn keys(&self) -> Vec<&str> {
        self.values.keys().filter_map(Value::as_str).collect()
    }

    /// Whether `key` is present at this level.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Insert or overwrite a string value at this level.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(
            Value::String(key.to_string()),
            Value::String(value.into()),
        );
    }

    /// Raw value lookup; fails with the dotted path if absent.
    pub fn get(&self, key: &str) -> ConfigResult<&Value> {
        self.values
            .get(key)
            .ok_or_else(|| ConfigError::missing(self.key_path(key)))
    }

    /// A required string value.
    pub fn str_value(&self, key: &str) -> ConfigResult<&str> {
        self.get(key)?
            .as_str()
            .ok_or_else(|| ConfigError::invalid(self.key_path(key), "string"))
    }

    /// A required unsigned integer value.
    pub fn u64_value(&self, key: &str) -> ConfigResult<u64> {
        self.get(key)?
            .as_u64()
            .ok_or_else(|| ConfigError::invalid(self.key_path(key), "unsigned integer"))
    }

    /// A required nested mapping, returned as a config rooted at `key`.
    pub fn section(&self, key: &str) -> ConfigResult<TenantConfig> {
        match self.get(key)? {
            Value::Mapping(values) => Ok(Self::nested(self.key_path(key), values.clone())),
            _ => Err(ConfigError::invalid(self.key_path(key), "mapping")),
        }
    }

    /// A required sequence of mappings, each rooted at `key[i]`.
    pub fn sections(&self, key: &str) -> ConfigResult<Vec<TenantConfig>> {
        let path = self.key_path(key);
        match self.get(key)? {
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Mapping(values) => {
                        Ok(Self::nested(format!("{path}[{i}]"), values.clone()))
                    }
                    _ => Err(ConfigError::invalid(format!("{path}[{i}]"), "mapping")),
                })
                .collect(),
            _ => Err(ConfigError::invalid(path, "sequence")),
        }
    }

    /// A required mapping of string keys to string values, in document order.
    pub fn string_entries(&self, key: &str) -> ConfigResult<Vec<(String, String)>> {
        let path = self.key_path(key);
        match self.get(key)? {
            Value::Mapping(values) => values
                .iter()
                .map(|(k, v)| match (k.as_str(), v.as_str()) {
                    (Some(k), Some(v)) => Ok((k.to_string(), v.to_string())),
                    _ => Err(ConfigError::invalid(path.clone(), "mapping of strings")),
                })
                .collect(),
            _ => Err(ConfigError::invalid(path, "mapping of strings")),
        }
    }

    /// Build an invalid-value error for a key at this level, with the full
    /// dotted path.
    pub fn invalid_value(&self, key: &str, expected: &'static str) -> ConfigError {
        ConfigError::invalid(self.key_path(key), expected)
    }

    /// The tenant identifier injected by the resolver.
    pub fn tenant(&self) -> ConfigResult<&str> {
        self.str_value("tenant")
    }

    /// The environment identifier injected by the resolver.
    pub fn env(&self) -> ConfigResult<&str> {
        self.str_value("env")
    }

    /// The `<tenant>-<env>` prefix used for physical resource names.
    pub fn name_prefix(&self) -> ConfigResult<String> {
        Ok(format!("{}-{}", self.tenant()?, self.env()?))
    }

    /// The underlying mapping.
    pub fn as_mapping(&self) -> &Mapping {
        &self.values
    }
}

impl Serialize for TenantConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}
