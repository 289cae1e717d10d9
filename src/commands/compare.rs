//! `hades compare` command - score two files against each other

use std::fs;
use std::path::Path;

use hades_core::error::{HadesError, Result};
use hades_core::format::OutputFormat;
use hades_core::normalize::Normalizer;
use hades_core::similarity::{ratio, JunkPolicy};

use crate::cli::{Cli, CompareArgs};

/// Execute the compare command
pub fn execute(cli: &Cli, args: &CompareArgs) -> Result<()> {
    let normalizer = Normalizer::new(args.line_breaks);
    let left = read_normalized(&args.left, &normalizer)?;
    let right = read_normalized(&args.right, &normalizer)?;

    let score = ratio(&left, &right, &JunkPolicy::from(args.junk));
    tracing::debug!(
        left = %args.left.display(),
        right = %args.right.display(),
        score,
        "compare"
    );

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "left": args.left.display().to_string(),
                "right": args.right.display().to_string(),
                "score": score,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => println!("{score:?}"),
    }

    Ok(())
}

fn read_normalized(path: &Path, normalizer: &Normalizer) -> Result<Vec<char>> {
    if !path.is_file() {
        return Err(HadesError::not_found("file", path.display()));
    }
    let bytes =
        fs::read(path).map_err(|e| HadesError::io_operation("read", path.display(), e))?;
    let text = normalizer.decode(&path.display().to_string(), bytes)?;
    Ok(normalizer.normalize(&text))
}
