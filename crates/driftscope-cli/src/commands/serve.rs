//! Serve command - run the drift HTTP service.

use std::path::PathBuf;

use colored::Colorize;
use driftscope::DriftConfig;

use crate::server::{app, state::AppState};

pub fn run(
    port: u16,
    reference: PathBuf,
    production: PathBuf,
    output_dir: PathBuf,
    config: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => DriftConfig::load(path)?,
        None => DriftConfig::default(),
    };

    if !reference.exists() {
        println!(
            "{} reference file {} does not exist yet",
            "Warning:".yellow().bold(),
            reference.display()
        );
    }

    println!(
        "{} http://127.0.0.1:{}",
        "Starting drift service at".cyan().bold(),
        port
    );
    if verbose {
        println!("  Reference:  {}", reference.display());
        println!("  Production: {}", production.display());
        println!("  Reports:    {}", output_dir.display());
        println!("  Threshold:  {}", config.threshold);
    }
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());

    let state = AppState::new(reference, production, output_dir, config);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))?;

    println!("{}", "Shutting down...".yellow());
    Ok(())
}
