//! CLI type definitions.
//!
//! This module contains the clap command structures that define the CLI
//! interface.

use clap::{Parser, Subcommand};

use crate::cli::commands::synth::SynthArgs;
use crate::cli::commands::tenants::TenantsArgs;
use crate::cli::commands::validate::ValidateArgs;

#[derive(Parser)]
#[command(name = "stackforge")]
#[command(about = "Tenant/environment-driven infrastructure synthesis", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a tenant's configuration and write its stack templates
    Synth(SynthArgs),

    /// Resolve and synthesize without writing anything
    Validate(ValidateArgs),

    /// List the tenants configured for an environment
    Tenants(TenantsArgs),
}
