//! # Ports Subcommand
//!
//! Checks the host ports of a single deployment against its tier range. The
//! deployment name defaults to the directory's basename and the tier to the
//! one its classification implies. Templates and infrastructure have no tier
//! and are skipped unless `--tier` is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use deplint_core::{LintRules, PortTier};
use deplint_lint::{classify_deployment, format_port_result, validate_ports_with};

/// Arguments for the `deplint ports` subcommand.
#[derive(Args, Debug)]
pub struct PortsArgs {
    /// Deployment directory to check.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Deployment name used in messages. Defaults to the directory name.
    #[arg(long)]
    pub name: Option<String>,

    /// Port tier (service, product or suite). Unknown values mean service.
    #[arg(long)]
    pub tier: Option<String>,
}

/// Execute the ports subcommand.
pub fn run_ports(args: &PortsArgs, rules: &LintRules) -> Result<u8> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("cannot derive a deployment name from {}", args.dir.display()))?,
    };

    let kind = classify_deployment(&name, rules);
    let tier = match args.tier.as_deref() {
        Some(tier) => PortTier::parse(tier),
        None => match kind.port_tier() {
            Some(tier) => tier,
            None => {
                println!("Port Validation: {}", args.dir.display());
                println!("  Skipped: {name} is {kind} and has no port tier");
                return Ok(0);
            }
        },
    };
    tracing::debug!(deployment = %name, %kind, %tier, "checking ports");

    let report = validate_ports_with(rules, &args.dir, &name, tier);
    print!("{}", format_port_result(&report));
    Ok(if report.valid { 0 } else { 1 })
}
