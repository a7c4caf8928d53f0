//! Simulate command - write a drifted copy of a reference file.

use std::path::PathBuf;

use colored::Colorize;
use driftscope::input::Parser;
use driftscope::simulate::{simulate_drift, DriftLevel};
use driftscope::Dataset;

pub fn run(
    reference: PathBuf,
    level: DriftLevel,
    seed: u64,
    output: PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !reference.exists() {
        return Err(format!("File not found: {}", reference.display()).into());
    }

    println!(
        "{} {} {}",
        "Simulating".cyan().bold(),
        level.to_string().to_uppercase().white().bold(),
        "drift".cyan().bold()
    );

    let (table, source) = Parser::new().parse_file(&reference)?;
    let dataset = Dataset::from_table(&table)?;
    let drifted = simulate_drift(&dataset, level, seed)?;

    if verbose {
        let params = level.params();
        println!("  Age             {:+}", params.age_shift);
        println!("  CreditScore     {:+} (clipped to 300-850)", params.credit_shift);
        println!("  Balance         x{}", params.balance_multiplier);
        println!("  EstimatedSalary {:+}", params.salary_shift);
        println!("  IsActiveMember  30% set inactive");
        if params.redistribute_geography {
            println!("  Geography       60% Germany / 40% Spain");
        }
    }

    drifted.write_csv(&output)?;

    println!(
        "{} {} rows to {}",
        "Wrote".green().bold(),
        source.row_count,
        output.display().to_string().white()
    );

    Ok(())
}
