//! Implementation of the `stackforge tenants` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{format_tenant_table, output, CommandOutput};
use crate::domain::models::settings::Settings;
use crate::services::resolver::ConfigResolver;

#[derive(Args, Debug)]
pub struct TenantsArgs {
    /// Environment identifier
    #[arg(short, long)]
    pub env: String,

    /// Read configuration documents from this directory instead of the configured one
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct TenantsOutput {
    pub env: String,
    pub tenants: Vec<String>,
}

impl CommandOutput for TenantsOutput {
    fn to_human(&self) -> String {
        if self.tenants.is_empty() {
            return format!("No tenants configured for '{}'.", self.env);
        }
        let mut lines = vec![format_tenant_table(&self.tenants)];
        lines.push(format!(
            "{} tenant(s) configured for '{}'.",
            self.tenants.len(),
            self.env
        ));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: TenantsArgs, settings: &Settings, json_mode: bool) -> Result<()> {
    let config_dir = args
        .config_dir
        .unwrap_or_else(|| PathBuf::from(&settings.paths.config_dir));

    let document = ConfigResolver::new(config_dir).load_document(&args.env)?;

    let output_data = TenantsOutput {
        env: args.env,
        tenants: document
            .tenant_ids()
            .into_iter()
            .map(str::to_string)
            .collect(),
    };
    output(&output_data, json_mode);
    Ok(())
}
