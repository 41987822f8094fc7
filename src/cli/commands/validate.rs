//! Implementation of the `stackforge validate` command.
//!
//! Runs the full resolve-and-synthesize path without writing anything, so a
//! configuration change can be checked before any template is emitted.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::commands::stack_row;
use crate::cli::output::{format_stack_table, output, CommandOutput, StackRow};
use crate::domain::models::settings::Settings;
use crate::services::resolver::ConfigResolver;
use crate::services::synthesizer::build_stacks;
use crate::stacks::select_stacks;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Tenant identifier
    #[arg(short, long)]
    pub tenant: String,

    /// Environment identifier
    #[arg(short, long)]
    pub env: String,

    /// Limit validation to the named stacks (comma-separated)
    #[arg(long = "stack", value_delimiter = ',')]
    pub stacks: Vec<String>,

    /// Read configuration documents from this directory instead of the configured one
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub tenant: String,
    pub env: String,
    pub valid: bool,
    pub stacks: Vec<StackRow>,
}

impl CommandOutput for ValidateOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Configuration for tenant '{}' in '{}' is valid ({} stack(s)).",
            self.tenant,
            self.env,
            self.stacks.len()
        )];
        lines.push(format_stack_table(&self.stacks));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: ValidateArgs, settings: &Settings, json_mode: bool) -> Result<()> {
    let config_dir = args
        .config_dir
        .unwrap_or_else(|| PathBuf::from(&settings.paths.config_dir));

    let resolver = ConfigResolver::new(config_dir);
    let config = resolver.resolve(&args.env, &args.tenant)?;

    let stacks = select_stacks(&args.stacks)?;
    let synthesized = build_stacks(&stacks, &config)?;

    let output_data = ValidateOutput {
        tenant: args.tenant,
        env: args.env,
        valid: true,
        stacks: synthesized.iter().map(stack_row).collect(),
    };
    output(&output_data, json_mode);
    Ok(())
}
