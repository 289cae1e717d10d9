use hades_core::config::{JunkMode, LineBreakPolicy, ScoringErrorPolicy};
use hades_core::format::OutputFormat;

/// Parse output format from string
pub fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse junk mode from string
pub fn parse_junk_mode(s: &str) -> std::result::Result<JunkMode, String> {
    s.parse::<JunkMode>().map_err(|e| e.to_string())
}

/// Parse line break policy from string
pub fn parse_line_breaks(s: &str) -> std::result::Result<LineBreakPolicy, String> {
    s.parse::<LineBreakPolicy>().map_err(|e| e.to_string())
}

/// Parse scoring error policy from string
pub fn parse_scoring_error_policy(s: &str) -> std::result::Result<ScoringErrorPolicy, String> {
    s.parse::<ScoringErrorPolicy>().map_err(|e| e.to_string())
}
