use std::path::PathBuf;

use clap::Args;
use hades_core::config::{JunkMode, LineBreakPolicy, PartialConfiguration, ScoringErrorPolicy};

use super::parse::{parse_junk_mode, parse_line_breaks, parse_scoring_error_policy};

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Configuration file, YAML or TOML (defaults to ./hades.yaml when present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Directory searched recursively for documents
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// File name suffix to include (can be specified multiple times)
    #[arg(long = "ext", action = clap::ArgAction::Append)]
    pub extensions: Vec<String>,

    /// Number of best matches to keep
    #[arg(long)]
    pub top: Option<usize>,

    /// Directory the match reports are written to
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,

    /// Number of worker threads
    #[arg(long, short = 'j')]
    pub processes: Option<usize>,

    /// Characters that may not seed a match (none or whitespace)
    #[arg(long, value_parser = parse_junk_mode)]
    pub junk: Option<JunkMode>,

    /// Line break handling before scoring (strip or keep)
    #[arg(long, value_parser = parse_line_breaks)]
    pub line_breaks: Option<LineBreakPolicy>,

    /// What to do when scoring a pair fails (abort or skip)
    #[arg(long, value_parser = parse_scoring_error_policy)]
    pub on_scoring_error: Option<ScoringErrorPolicy>,

    /// Print the ranking without writing report files
    #[arg(long)]
    pub no_reports: bool,
}

impl CheckArgs {
    /// Flags given on the command line, as a configuration layer
    pub fn overrides(&self) -> PartialConfiguration {
        PartialConfiguration {
            file_extensions: (!self.extensions.is_empty()).then(|| self.extensions.clone()),
            dir_name: self.dir.clone(),
            number_of_top_results: self.top,
            reports_dir: self.reports_dir.clone(),
            number_of_processes: self.processes,
            junk: self.junk,
            line_breaks: self.line_breaks,
            on_scoring_error: self.on_scoring_error,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// First file
    pub left: PathBuf,

    /// Second file
    pub right: PathBuf,

    /// Characters that may not seed a match (none or whitespace)
    #[arg(long, value_parser = parse_junk_mode, default_value = "none")]
    pub junk: JunkMode,

    /// Line break handling before scoring (strip or keep)
    #[arg(long, value_parser = parse_line_breaks, default_value = "strip")]
    pub line_breaks: LineBreakPolicy,
}
