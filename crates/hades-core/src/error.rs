//! Error types and exit codes for hades
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (scoring failure, I/O, interrupted run)
//! - 2: Usage error (bad flags/args, invalid configuration)
//! - 3: Data error (missing corpus root, empty corpus)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the hades binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args or configuration (2)
    Usage = 2,
    /// Data error - missing or empty corpus (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during hades operations
#[derive(Error, Debug)]
pub enum HadesError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("missing configuration field `{field}` ({origin})")]
    MissingField { field: String, origin: String },

    #[error("invalid configuration in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("no documents found under {root:?}")]
    EmptyCorpus { root: PathBuf },

    // Recoverable per-item errors, collected and summarized after a run
    #[error("failed to read {path:?}: {reason}")]
    CorpusLoad { path: PathBuf, reason: String },

    #[error("cannot decode {id} as UTF-8 text")]
    Decode { id: String },

    #[error("failed to write report #{rank} to {path:?}: {reason}")]
    ReportWrite {
        rank: usize,
        path: PathBuf,
        reason: String,
    },

    // Generic failures (exit code 1)
    #[error("scoring failed for pair ({i}, {j}) [{left} <-> {right}]: {reason}")]
    Scoring {
        i: usize,
        j: usize,
        left: String,
        right: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperation {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("run interrupted after {completed} of {total} comparisons")]
    Interrupted { completed: usize, total: usize },

    #[error("{0}")]
    Other(String),
}

impl HadesError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        HadesError::FailedOperation {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        HadesError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a required configuration field that was not supplied
    pub fn missing_field(field: &str, origin: impl std::fmt::Display) -> Self {
        HadesError::MissingField {
            field: field.to_string(),
            origin: origin.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        HadesError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether the run can continue past this error (the item is skipped)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HadesError::CorpusLoad { .. } | HadesError::Decode { .. } | HadesError::ReportWrite { .. }
        )
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            HadesError::UnknownFormat(_)
            | HadesError::UsageError(_)
            | HadesError::MissingField { .. }
            | HadesError::InvalidConfig { .. }
            | HadesError::InvalidValue { .. } => ExitCode::Usage,

            HadesError::NotFound { .. } | HadesError::EmptyCorpus { .. } => ExitCode::Data,

            HadesError::CorpusLoad { .. }
            | HadesError::Decode { .. }
            | HadesError::ReportWrite { .. }
            | HadesError::Scoring { .. }
            | HadesError::Io(_)
            | HadesError::Yaml(_)
            | HadesError::Json(_)
            | HadesError::Toml(_)
            | HadesError::FailedOperation { .. }
            | HadesError::Interrupted { .. }
            | HadesError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            HadesError::UnknownFormat(_) => "unknown_format",
            HadesError::UsageError(_) => "usage_error",
            HadesError::MissingField { .. } => "missing_field",
            HadesError::InvalidConfig { .. } => "invalid_config",
            HadesError::InvalidValue { .. } => "invalid_value",
            HadesError::NotFound { .. } => "not_found",
            HadesError::EmptyCorpus { .. } => "empty_corpus",
            HadesError::CorpusLoad { .. } => "corpus_load",
            HadesError::Decode { .. } => "decode",
            HadesError::ReportWrite { .. } => "report_write",
            HadesError::Scoring { .. } => "scoring",
            HadesError::Io(_) => "io_error",
            HadesError::Yaml(_) => "yaml_error",
            HadesError::Json(_) => "json_error",
            HadesError::Toml(_) => "toml_error",
            HadesError::FailedOperation { .. } => "failed_operation",
            HadesError::Interrupted { .. } => "interrupted",
            HadesError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for hades operations
pub type Result<T> = std::result::Result<T, HadesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_family() {
        assert_eq!(
            HadesError::missing_field("dir_name", "hades.yaml").exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            HadesError::EmptyCorpus {
                root: PathBuf::from("src")
            }
            .exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            HadesError::Interrupted {
                completed: 1,
                total: 3
            }
            .exit_code(),
            ExitCode::Failure
        );
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(HadesError::Decode { id: "a.txt".into() }.is_recoverable());
        assert!(!HadesError::Scoring {
            i: 0,
            j: 1,
            left: "a".into(),
            right: "b".into(),
            reason: "boom".into(),
        }
        .is_recoverable());
    }

    #[test]
    fn test_to_json_envelope() {
        let err = HadesError::invalid_value("number_of_processes", 0);
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 2);
        assert_eq!(json["error"]["type"], "invalid_value");
        assert_eq!(json["error"]["message"], "invalid number_of_processes: 0");
    }

    #[test]
    fn test_scoring_error_names_pair() {
        let err = HadesError::Scoring {
            i: 2,
            j: 5,
            left: "a.py".into(),
            right: "b.py".into(),
            reason: "out of memory".into(),
        };
        let message = err.to_string();
        assert!(message.contains("(2, 5)"));
        assert!(message.contains("a.py"));
        assert!(message.contains("b.py"));
    }
}
