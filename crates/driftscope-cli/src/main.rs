//! Driftscope CLI - data drift detection between reference and production data.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Detect(args) => commands::detect::run(args, cli.verbose),

        Commands::Report { path, json } => commands::report::run(path, json, cli.verbose),

        Commands::Simulate {
            reference,
            level,
            seed,
            output,
        } => commands::simulate::run(reference, level.into(), seed, output, cli.verbose),

        Commands::Serve {
            port,
            reference,
            production,
            output_dir,
            config,
        } => commands::serve::run(port, reference, production, output_dir, config, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
