mod cli;
mod commands;
mod config;
mod manifest;
mod model;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::ValidationConfig;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = ValidationConfig::default();

    match cli.command {
        Commands::Labels(args) => commands::labels::run(args, &config),
        Commands::Completeness(args) => commands::completeness::run(args, &config),
        Commands::Licenses(args) => commands::licenses::run(args),
        Commands::Audit(args) => commands::audit::run(args, &config),
        Commands::Baseline(args) => commands::baseline::run(args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
