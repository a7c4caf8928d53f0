//! Detect command - compare a production file against a reference file.

use std::fs::{self, OpenOptions};
use std::path::Path;

use colored::Colorize;
use driftscope::alert::{dispatch, evaluate_alerts, AlertSink, JsonLinesSink, TracingSink};
use driftscope::report::chart;
use driftscope::{DriftConfig, DriftEngine};

use crate::cli::DetectArgs;

pub fn run(args: DetectArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    for path in [&args.reference, &args.production] {
        if !path.exists() {
            return Err(format!("File not found: {}", path.display()).into());
        }
    }

    let mut config = match &args.config {
        Some(path) => DriftConfig::load(path)?,
        None => DriftConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(target) = args.target {
        config.target_column = Some(target);
    }
    config.excluded_columns.extend(args.exclude);
    config.parallel |= args.parallel;
    config.validate()?;

    if !args.json {
        println!(
            "{} {} {} {}",
            "Comparing".cyan().bold(),
            args.production.display().to_string().white(),
            "against".cyan(),
            args.reference.display().to_string().white()
        );
        println!();
    }

    let result = DriftEngine::new(config).analyze_files(&args.reference, &args.production)?;
    let analysis = &result.analysis;
    let report = &analysis.report;

    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        if verbose {
            println!("{}", "Classification:".yellow().bold());
            for (name, kind) in &analysis.classification.kinds {
                println!("  {:24} {} ({})", name, kind, kind.test_name());
            }
            println!();
        }

        super::print_report(report);

        if !analysis.excluded.is_empty() {
            println!();
            println!("{}", "Excluded features:".yellow().bold());
            for feature in &analysis.excluded {
                println!("  {:24} {}", feature.name, feature.reason.to_string().yellow());
            }
        }
    }

    if !args.no_save {
        let path = report.save_in_dir(&args.output_dir)?;
        if !args.json {
            println!();
            println!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
    }

    let file_sink = match &args.alerts {
        Some(path) => Some(JsonLinesSink::new(open_append(path)?)),
        None => None,
    };
    let mut sinks: Vec<&dyn AlertSink> = vec![&TracingSink];
    if let Some(sink) = &file_sink {
        sinks.push(sink);
    }
    dispatch(&evaluate_alerts(report), &sinks)?;

    if let Some(path) = &args.charts {
        let charts = serde_json::json!({
            "histograms": chart::histograms(report, &result.reference, &result.production),
            "heatmap": chart::p_value_heatmap(report),
        });
        create_parent(path)?;
        fs::write(path, serde_json::to_string_pretty(&charts)?)?;
    }

    Ok(())
}

fn open_append(path: &Path) -> Result<fs::File, Box<dyn std::error::Error>> {
    create_parent(path)?;
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

fn create_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
