//! CLI command implementations.

pub mod detect;
pub mod report;
pub mod serve;
pub mod simulate;

use colored::{ColoredString, Colorize};
use driftscope::alert::RiskLevel;
use driftscope::DriftReport;

/// Risk level colored by severity.
pub(crate) fn colored_risk(risk: RiskLevel) -> ColoredString {
    match risk {
        RiskLevel::Low => risk.as_str().green().bold(),
        RiskLevel::Medium => risk.as_str().yellow().bold(),
        RiskLevel::High => risk.as_str().red().bold(),
    }
}

/// Per-feature table followed by the dataset summary.
pub(crate) fn print_report(report: &DriftReport) {
    println!(
        "  {:24} {:12} {:>10} {:>12}  {}",
        "Feature".bold(),
        "Kind".bold(),
        "Statistic".bold(),
        "p-value".bold(),
        "Status".bold()
    );

    for verdict in report.verdicts.values() {
        let status = if verdict.drift_detected {
            "DRIFT".red().bold()
        } else {
            "ok".green()
        };
        println!(
            "  {:24} {:12} {:>10.4} {:>12.6}  {}",
            verdict.name,
            verdict.kind.to_string(),
            verdict.test_statistic,
            verdict.p_value,
            status
        );

        if let (Some(stats), Some(shift)) = (verdict.extra_stats, verdict.mean_shift_percent()) {
            if verdict.drift_detected {
                println!(
                    "  {:24} {}",
                    "",
                    format!(
                        "mean {:.2} -> {:.2} ({:+.1}%), std {:.2} -> {:.2}",
                        stats.ref_mean, stats.prod_mean, shift, stats.ref_std, stats.prod_std
                    )
                    .dimmed()
                );
            }
        }
    }

    let risk = RiskLevel::from_percentage(report.drift_percentage);
    println!();
    println!(
        "Drifted: {}/{} features ({:.2}%)  Risk: {}",
        report.features_drifted.to_string().white().bold(),
        report.features_analyzed,
        report.drift_percentage,
        colored_risk(risk)
    );
    println!(
        "Threshold: {}  Generated: {}",
        report.threshold,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
