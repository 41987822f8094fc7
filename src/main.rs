//! Stackforge CLI entry point.

use clap::Parser;

use stackforge::cli::{self, Cli, Commands};
use stackforge::infrastructure::config::SettingsLoader;
use stackforge::infrastructure::logging;

fn main() {
    let cli = Cli::parse();

    let settings = match SettingsLoader::load() {
        Ok(settings) => settings,
        Err(err) => cli::handle_error(&err, cli.json),
    };

    if let Err(err) = logging::init(&settings.logging) {
        cli::handle_error(&err, cli.json);
    }

    let result = match cli.command {
        Commands::Synth(args) => cli::commands::synth::execute(args, &settings, cli.json),
        Commands::Validate(args) => cli::commands::validate::execute(args, &settings, cli.json),
        Commands::Tenants(args) => cli::commands::tenants::execute(args, &settings, cli.json),
    };

    if let Err(err) = result {
        cli::handle_error(&err, cli.json);
    }
}
