//! `hades check` command - rank the most similar document pairs
//!
//! - `hades check` - use ./hades.yaml
//! - `hades check --config FILE` - use FILE, flags override its fields
//! - `hades check --dir DIR --ext .py ...` - configure entirely from flags

mod formatters;
mod progress;

use std::path::Path;
use std::time::Instant;

use hades_core::config::{Configuration, PartialConfiguration, DEFAULT_CONFIG_FILE};
use hades_core::error::{HadesError, Result};
use hades_core::format::OutputFormat;
use hades_core::pipeline::PlagiarismCheck;
use hades_core::report::ReportWriter;
use hades_core::scheduler::CancellationToken;
use hades_core::trace_time;

use crate::cli::{CheckArgs, Cli};
use progress::ProgressTracker;

/// Execute the check command
pub fn execute(cli: &Cli, args: &CheckArgs, start: Instant) -> Result<()> {
    let config = resolve_config(args)?;
    trace_time!(start, "resolve_config");

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        tracing::warn!(error = %e, "Failed to install interrupt handler");
    }

    let human = cli.format == OutputFormat::Human && !cli.quiet;
    let mut tracker = ProgressTracker::new(human);

    let outcome = PlagiarismCheck::new(&config)
        .with_cancellation(cancel)
        .run(
            |corpus| {
                if human {
                    println!(
                        "Comparing {} files in {} combinations using {} processes...",
                        corpus.len(),
                        corpus.combinations(),
                        config.number_of_processes
                    );
                }
            },
            |progress| tracker.update(progress),
        )?;
    tracker.finish();
    trace_time!(start, "compare", completed = outcome.completed_pairs);

    let reports = if args.no_reports {
        None
    } else {
        Some(ReportWriter::new(&config.reports_dir).write_all(&outcome.ranked, &outcome.corpus)?)
    };

    match cli.format {
        OutputFormat::Json => formatters::output_json(&config, &outcome, reports.as_ref())?,
        OutputFormat::Human => {
            formatters::output_human(cli, &config, &outcome, reports.as_ref())
        }
    }

    if outcome.truncated {
        return Err(HadesError::Interrupted {
            completed: outcome.completed_pairs,
            total: outcome.total_pairs,
        });
    }

    Ok(())
}

/// Layer command-line flags over the configuration file, if any
fn resolve_config(args: &CheckArgs) -> Result<Configuration> {
    let (base, origin) = match &args.config {
        Some(path) => {
            if !path.is_file() {
                return Err(HadesError::InvalidConfig {
                    path: path.clone(),
                    reason: "file not found".to_string(),
                });
            }
            (PartialConfiguration::load(path)?, path.display().to_string())
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                (
                    PartialConfiguration::load(default)?,
                    DEFAULT_CONFIG_FILE.to_string(),
                )
            } else {
                tracing::debug!("No {} found, using flags only", DEFAULT_CONFIG_FILE);
                (
                    PartialConfiguration::default(),
                    "command-line flags".to_string(),
                )
            }
        }
    };

    let config = base.merge(args.overrides()).resolve(&origin)?;
    tracing::info!(
        origin = %origin,
        dir = %config.dir_name.display(),
        processes = config.number_of_processes,
        top = config.number_of_top_results,
        "Resolved configuration"
    );
    Ok(config)
}
