//! Stackforge - Tenant/Environment Infrastructure Synthesis
//!
//! Stackforge resolves per-tenant configuration from per-environment YAML
//! documents and synthesizes declarative cloud resource templates (a data
//! lake stack and a Redshift warehouse stack) from the result. Nothing is
//! provisioned directly; the output is a set of template files plus a
//! manifest for downstream deployment tooling.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): configuration and template models, error taxonomy
//! - **Service Layer** (`services`): configuration resolution and stack synthesis
//! - **Stacks** (`stacks`): the stack definitions themselves
//! - **Infrastructure Layer** (`infrastructure`): settings loading and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use stackforge::services::resolver::ConfigResolver;
//!
//! fn main() -> Result<(), stackforge::domain::errors::ConfigError> {
//!     let resolver = ConfigResolver::new("config");
//!     let config = resolver.resolve("dev", "acme")?;
//!     assert_eq!(config.tenant()?, "acme");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod stacks;

// Re-export commonly used types for convenience
pub use domain::errors::{ConfigError, ConfigResult, SynthError, SynthResult};
pub use domain::models::{
    ConfigDocument, DeletionPolicy, LoggingSettings, PathSettings, Resource, Settings, Template,
    TenantConfig,
};
pub use infrastructure::config::{SettingsError, SettingsLoader};
pub use services::{build_stacks, ConfigResolver, SynthesizedStack, Synthesizer, TargetEnvironment};
pub use stacks::{builtin_stacks, select_stacks, DataStack, Stack, WarehouseStack};
