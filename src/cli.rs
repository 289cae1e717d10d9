//! CLI argument parsing for hades
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod parse;

use clap::{Parser, Subcommand};

pub use args::{CheckArgs, CompareArgs};
use hades_core::format::OutputFormat;
use parse::parse_output_format;

/// Hades - find near-duplicate documents in a directory
#[derive(Parser, Debug)]
#[command(name = "hades")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human or json)
    #[arg(long, global = true, value_parser = parse_output_format, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Log phase timings and run milestones
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter, a level (`debug`) or directives (`hades_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare every pair of documents under a directory and rank the most similar
    Check(CheckArgs),

    /// Print the similarity ratio of two files
    Compare(CompareArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use hades_core::config::{JunkMode, ScoringErrorPolicy};
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "hades",
            "--format",
            "json",
            "check",
            "--dir",
            "corpus",
            "--ext",
            ".py",
            "--ext",
            ".c",
            "--top",
            "3",
            "--junk",
            "whitespace",
            "--on-scoring-error",
            "skip",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.dir_name, Some(PathBuf::from("corpus")));
        assert_eq!(
            overrides.file_extensions,
            Some(vec![".py".to_string(), ".c".to_string()])
        );
        assert_eq!(overrides.number_of_top_results, Some(3));
        assert_eq!(overrides.number_of_processes, None);
        assert_eq!(overrides.junk, Some(JunkMode::Whitespace));
        assert_eq!(overrides.on_scoring_error, Some(ScoringErrorPolicy::Skip));
    }

    #[test]
    fn test_no_extensions_leave_config_untouched() {
        let cli = Cli::try_parse_from(["hades", "check"]).unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.overrides().file_extensions, None);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(Cli::try_parse_from(["hades", "check", "--junk", "tabs"]).is_err());
        assert!(Cli::try_parse_from(["hades", "--format", "xml", "check"]).is_err());
    }
}
