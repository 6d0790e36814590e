//! # All Subcommand
//!
//! Runs every validator over a deployment tree and its config tree, prints
//! the output of each failed step followed by the aggregated summary, and
//! exits non-zero if anything failed.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use deplint_core::LintRules;
use deplint_lint::{format_aggregate_report, validate_all};

/// Arguments for the `deplint all` subcommand.
#[derive(Args, Debug)]
pub struct AllArgs {
    /// Root of the deployment tree.
    #[arg(value_name = "DEPLOYMENTS", default_value = "deployments")]
    pub deployments: PathBuf,

    /// Root of the config tree.
    #[arg(value_name = "CONFIGS", default_value = "configs")]
    pub configs: PathBuf,

    /// Print the aggregated report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the all subcommand.
pub fn run_all(args: &AllArgs, rules: &LintRules) -> Result<u8> {
    for dir in [&args.deployments, &args.configs] {
        if !dir.is_dir() {
            bail!("directory not found: {}", dir.display());
        }
    }

    let report = validate_all(&args.deployments, &args.configs, rules, &[]);

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("failed to serialize aggregated report")?;
        println!("{json}");
    } else {
        for outcome in report.failures() {
            print!("{}", outcome.output);
            println!();
        }
        print!("{}", format_aggregate_report(&report));
    }

    Ok(if report.all_passed() { 0 } else { 1 })
}
