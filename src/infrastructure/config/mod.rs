//! Tool settings loading.

pub mod loader;

pub use loader::{SettingsError, SettingsLoader};
