//! Implementation of the `stackforge synth` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::commands::stack_row;
use crate::cli::output::{format_stack_table, output, CommandOutput, StackRow};
use crate::domain::models::settings::Settings;
use crate::services::resolver::ConfigResolver;
use crate::services::synthesizer::{build_stacks, Synthesizer};
use crate::stacks::select_stacks;

#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Tenant identifier
    #[arg(short, long)]
    pub tenant: String,

    /// Environment identifier
    #[arg(short, long)]
    pub env: String,

    /// Limit synthesis to the named stacks (comma-separated)
    #[arg(long = "stack", value_delimiter = ',')]
    pub stacks: Vec<String>,

    /// Read configuration documents from this directory instead of the configured one
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Write templates to this directory instead of the configured one
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct SynthOutput {
    pub tenant: String,
    pub env: String,
    pub stacks: Vec<StackRow>,
    pub written: Vec<PathBuf>,
}

impl CommandOutput for SynthOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Synthesized {} stack(s) for tenant '{}' in '{}'.",
            self.stacks.len(),
            self.tenant,
            self.env
        )];
        lines.push(format_stack_table(&self.stacks));
        lines.push("Wrote:".to_string());
        for path in &self.written {
            lines.push(format!("  - {}", path.display()));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: SynthArgs, settings: &Settings, json_mode: bool) -> Result<()> {
    let config_dir = args
        .config_dir
        .unwrap_or_else(|| PathBuf::from(&settings.paths.config_dir));
    let out_dir = args
        .out_dir
        .unwrap_or_else(|| PathBuf::from(&settings.paths.out_dir));

    let resolver = ConfigResolver::new(config_dir);
    let config = resolver.resolve(&args.env, &args.tenant)?;

    let stacks = select_stacks(&args.stacks)?;
    let synthesized = build_stacks(&stacks, &config)?;
    let written = Synthesizer::new(out_dir).write(&config, &synthesized)?;

    let output_data = SynthOutput {
        tenant: args.tenant,
        env: args.env,
        stacks: synthesized.iter().map(stack_row).collect(),
        written,
    };
    output(&output_data, json_mode);
    Ok(())
}
