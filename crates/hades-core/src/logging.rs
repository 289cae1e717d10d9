use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at debug level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "load_corpus");
/// // Or with additional fields:
/// trace_time!(start, "load_corpus", documents = corpus.len());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::debug!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::debug!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize structured logging based on CLI arguments
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => return init_with_level(level, log_json, true),
        (true, None) => "debug",
        (false, None) => "warn",
    };

    init_with_level(level, log_json, false)
}

/// Expand a bare level into a filter covering both hades crates.
fn directives_for(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("hades={level},hades_core={level}")
    }
}

fn init_with_level(
    level: &str,
    log_json: bool,
    explicit: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // An explicit --log-level beats the environment; otherwise HADES_LOG and
    // RUST_LOG override the default.
    let filter = if explicit {
        EnvFilter::try_new(directives_for(level))?
    } else {
        EnvFilter::try_from_env("HADES_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(directives_for(level)))
    };

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(
                        tracing_subscriber::fmt::format::FmtSpan::NEW
                            | tracing_subscriber::fmt::format::FmtSpan::CLOSE,
                    ),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_covers_both_crates() {
        assert_eq!(directives_for("info"), "hades=info,hades_core=info");
    }

    #[test]
    fn test_full_directive_passes_through() {
        assert_eq!(directives_for("hades_core=trace"), "hades_core=trace");
    }
}
