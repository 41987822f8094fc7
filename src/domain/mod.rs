//! Domain layer: configuration models, template model, and error taxonomy.

pub mod errors;
pub mod models;

pub use errors::{ConfigError, ConfigResult, SynthError, SynthResult};
