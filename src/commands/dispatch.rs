//! Command dispatch logic for hades

use std::time::Instant;

use hades_core::error::Result;

use crate::cli::{Cli, Commands};
use crate::commands;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    match &cli.command {
        Commands::Check(args) => commands::check::execute(cli, args, start),
        Commands::Compare(args) => commands::compare::execute(cli, args),
    }
}
