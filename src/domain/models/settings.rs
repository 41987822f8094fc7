//! Tool-level settings.

use serde::{Deserialize, Serialize};

/// Settings for the stackforge tool itself, as opposed to the per-tenant
/// configuration documents it resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub logging: LoggingSettings,
}

/// Where configuration documents are read from and templates are written to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub config_dir: String,
    pub out_dir: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            config_dir: "config".to_string(),
            out_dir: "out".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
