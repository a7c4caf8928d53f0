//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use driftscope::simulate::DriftLevel;

/// Driftscope: per-feature data drift detection
#[derive(Parser)]
#[command(name = "driftscope")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare a production file against a reference file
    Detect(DetectArgs),

    /// Show a saved drift report
    Report {
        /// Report file, or a directory holding timestamped reports
        #[arg(value_name = "FILE|DIR")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a drifted production file from a reference file
    Simulate {
        /// Path to the reference data file (CSV/TSV)
        #[arg(value_name = "REFERENCE")]
        reference: PathBuf,

        /// Amount of drift to introduce
        #[arg(short, long, default_value = "medium")]
        level: LevelChoice,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output path for the drifted data
        #[arg(short, long, default_value = "data/production_data.csv")]
        output: PathBuf,
    },

    /// Serve drift checks over HTTP
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Reference data file
        #[arg(long, default_value = "data/bank_churn.csv")]
        reference: PathBuf,

        /// Production data file
        #[arg(long, default_value = "data/production_data.csv")]
        production: PathBuf,

        /// Directory for saved reports
        #[arg(long, default_value = "reports")]
        output_dir: PathBuf,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
pub struct DetectArgs {
    /// Path to the reference data file (CSV/TSV)
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Path to the production data file (CSV/TSV)
    #[arg(value_name = "PRODUCTION")]
    pub production: PathBuf,

    /// Significance threshold, strictly between 0 and 1
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Prediction target column, never compared
    #[arg(long)]
    pub target: Option<String>,

    /// Additional columns to leave out (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "COLUMN")]
    pub exclude: Vec<String>,

    /// Directory for the saved report
    #[arg(short, long, default_value = "reports")]
    pub output_dir: PathBuf,

    /// Don't save the report
    #[arg(long)]
    pub no_save: bool,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Test features in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Append alert events to this JSON-lines file
    #[arg(long, value_name = "FILE")]
    pub alerts: Option<PathBuf>,

    /// Write histogram and heatmap data to this JSON file
    #[arg(long, value_name = "FILE")]
    pub charts: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LevelChoice {
    Low,
    Medium,
    High,
}

impl From<LevelChoice> for DriftLevel {
    fn from(choice: LevelChoice) -> Self {
        match choice {
            LevelChoice::Low => DriftLevel::Low,
            LevelChoice::Medium => DriftLevel::Medium,
            LevelChoice::High => DriftLevel::High,
        }
    }
}
