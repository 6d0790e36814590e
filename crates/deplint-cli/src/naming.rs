//! # Naming Subcommand

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use deplint_lint::{format_naming_result, validate_naming};

/// Arguments for the `deplint naming` subcommand.
#[derive(Args, Debug)]
pub struct NamingArgs {
    /// Directory tree to check.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

/// Execute the naming subcommand.
pub fn run_naming(args: &NamingArgs) -> Result<u8> {
    let report = validate_naming(&args.dir);
    print!("{}", format_naming_result(&report));
    Ok(if report.valid { 0 } else { 1 })
}
