//! Configuration type definitions

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HadesError;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "hades.yaml";

/// Which characters may not seed a matching block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JunkMode {
    /// Every character may seed a match (autojunk still applies)
    #[default]
    None,
    /// Whitespace characters are junk
    Whitespace,
}

/// How line breaks are treated before scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBreakPolicy {
    /// Remove `\n` and `\r`, comparing each document as one unbroken line
    #[default]
    Strip,
    /// Compare content unchanged
    Keep,
}

/// What to do when scoring a single pair fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringErrorPolicy {
    /// Stop the run and report the failing pair
    #[default]
    Abort,
    /// Log the failing pair and keep going
    Skip,
}

/// Lowercase names for a config enum: `Display` and a case-insensitive `FromStr`
macro_rules! lowercase_names {
    ($ty:ident, $context:literal { $($variant:ident => $name:literal),* $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $name),)*
                }
            }
        }

        impl FromStr for $ty {
            type Err = HadesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($name => Ok(Self::$variant),)*
                    other => Err(HadesError::invalid_value($context, other)),
                }
            }
        }
    };
}

lowercase_names!(JunkMode, "junk mode" { None => "none", Whitespace => "whitespace" });
lowercase_names!(LineBreakPolicy, "line break policy" { Strip => "strip", Keep => "keep" });
lowercase_names!(ScoringErrorPolicy, "scoring error policy" { Abort => "abort", Skip => "skip" });

/// Configuration as read from a file or assembled from flags.
///
/// Every field is optional here; required fields are enforced when the
/// partial configuration is turned into a [`Configuration`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extensions: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir_name: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_top_results: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_processes: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub junk: Option<JunkMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_breaks: Option<LineBreakPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_scoring_error: Option<ScoringErrorPolicy>,
}

/// Validated configuration for a plagiarism check run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// File name suffixes to include (e.g. `.py`)
    pub file_extensions: Vec<String>,
    /// Root of the directory tree to scan
    pub dir_name: PathBuf,
    /// How many of the best matches to keep
    pub number_of_top_results: usize,
    /// Where report files are written
    pub reports_dir: PathBuf,
    /// Worker count for the comparison pool
    pub number_of_processes: usize,
    #[serde(default)]
    pub junk: JunkMode,
    #[serde(default)]
    pub line_breaks: LineBreakPolicy,
    #[serde(default)]
    pub on_scoring_error: ScoringErrorPolicy,
}
