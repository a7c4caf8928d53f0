//! Report command - show a saved drift report.

use std::path::PathBuf;

use colored::Colorize;
use driftscope::report::{chart, latest_report};
use driftscope::DriftReport;

pub fn run(path: PathBuf, json_output: bool, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let report_path = if path.is_dir() {
        latest_report(&path)?.ok_or_else(|| format!("No drift reports found in {}", path.display()))?
    } else {
        path
    };

    if !report_path.exists() {
        return Err(format!(
            "Report not found: {}\nRun 'driftscope detect' first.",
            report_path.display()
        )
        .into());
    }

    let report = DriftReport::load(&report_path)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Drift report".cyan().bold(),
        report_path.display().to_string().white()
    );
    println!();
    super::print_report(&report);

    let cells = chart::p_value_heatmap(&report);
    if !cells.is_empty() {
        println!();
        println!("{}", "p-value heatmap (0 to 0.1):".yellow().bold());
        let bar_width = 30;
        for cell in cells {
            let filled = (cell.intensity * bar_width as f64).round() as usize;
            let bar = "█".repeat(filled) + &"░".repeat(bar_width - filled);
            let bar = if cell.drift_detected { bar.red() } else { bar.green() };
            println!("  {:24} {} {:.4}", cell.feature, bar, cell.p_value);
        }
    }

    Ok(())
}
