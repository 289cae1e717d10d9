//! Output formatters for the check command

use hades_core::config::Configuration;
use hades_core::error::{HadesError, Result};
use hades_core::pipeline::CheckOutcome;
use hades_core::report::{report_path, ReportSummary};

use crate::cli::Cli;

/// Ranking, report location and warnings for a person at a terminal
pub fn output_human(
    cli: &Cli,
    config: &Configuration,
    outcome: &CheckOutcome,
    reports: Option<&ReportSummary>,
) {
    if outcome.truncated && !cli.quiet {
        eprintln!(
            "Interrupted after {} of {} comparisons; showing partial results",
            outcome.completed_pairs, outcome.total_pairs
        );
    }

    if !cli.quiet {
        println!("Showing the {} best matches:", outcome.ranked.len());
    }
    for result in &outcome.ranked {
        println!(
            "({:?}, '{}', '{}')",
            result.score,
            outcome.corpus[result.i].id(),
            outcome.corpus[result.j].id()
        );
    }

    if let Some(summary) = reports {
        if !cli.quiet {
            println!("Reports written to {}/", config.reports_dir.display());
        }
        print_warnings(cli, summary.failed.iter());
    }
    print_warnings(cli, outcome.warnings());
}

fn print_warnings<'a>(cli: &Cli, warnings: impl Iterator<Item = &'a HadesError>) {
    if cli.quiet {
        return;
    }
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

/// One JSON document covering the whole run
pub fn output_json(
    config: &Configuration,
    outcome: &CheckOutcome,
    reports: Option<&ReportSummary>,
) -> Result<()> {
    let failed_reports: Vec<&HadesError> =
        reports.map(|s| s.failed.iter().collect()).unwrap_or_default();
    let failed_ranks: Vec<usize> = failed_reports
        .iter()
        .filter_map(|e| match e {
            HadesError::ReportWrite { rank, .. } => Some(*rank),
            _ => None,
        })
        .collect();

    let matches: Vec<serde_json::Value> = outcome
        .ranked
        .iter()
        .enumerate()
        .map(|(rank, result)| {
            let report = (reports.is_some() && !failed_ranks.contains(&rank))
                .then(|| report_path(&config.reports_dir, rank).display().to_string());
            serde_json::json!({
                "rank": rank,
                "score": result.score,
                "i": result.i,
                "j": result.j,
                "file_0": outcome.corpus[result.i].id(),
                "file_1": outcome.corpus[result.j].id(),
                "report": report,
            })
        })
        .collect();

    let warnings: Vec<serde_json::Value> = outcome
        .warnings()
        .chain(failed_reports.iter().copied())
        .map(|e| {
            serde_json::json!({
                "type": e.error_type(),
                "message": e.to_string(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "files": outcome.corpus.len(),
        "combinations": outcome.total_pairs,
        "completed": outcome.completed_pairs,
        "processes": config.number_of_processes,
        "truncated": outcome.truncated,
        "reports_dir": reports.map(|_| config.reports_dir.display().to_string()),
        "matches": matches,
        "warnings": warnings,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
