//! Logging infrastructure.
//!
//! Structured logging using tracing and tracing-subscriber. Logs go to
//! stderr so synthesized output and `--json` command results own stdout.

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::domain::models::settings::LoggingSettings;

/// Initialize the global subscriber from logging settings.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init(settings: &LoggingSettings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.clone()));

    match settings.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
        }
    }

    Ok(())
}
