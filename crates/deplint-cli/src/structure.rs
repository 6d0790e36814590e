//! # Structure Subcommand
//!
//! Checks that one or more deployment directories hold the directories,
//! files and secrets their kind requires. The kind comes from each
//! directory's name unless `--kind` fixes it for all of them.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use deplint_core::LintRules;
use deplint_lint::{classify_deployment, format_structure_result, validate_structure, DeploymentKind};

/// Arguments for the `deplint structure` subcommand.
#[derive(Args, Debug)]
pub struct StructureArgs {
    /// Deployment directories to check.
    #[arg(value_name = "DIR", required = true)]
    pub dirs: Vec<PathBuf>,

    /// Deployment kind (suite, product, service, template or infrastructure).
    #[arg(long)]
    pub kind: Option<String>,
}

/// Execute the structure subcommand.
pub fn run_structure(args: &StructureArgs, rules: &LintRules) -> Result<u8> {
    let fixed = match args.kind.as_deref() {
        Some(kind) => match DeploymentKind::parse(kind) {
            Some(kind) => Some(kind),
            None => bail!("unknown deployment kind: {kind}"),
        },
        None => None,
    };

    let mut failed = 0usize;
    for dir in &args.dirs {
        let kind = match fixed {
            Some(kind) => kind,
            None => {
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .with_context(|| format!("cannot derive a deployment name from {}", dir.display()))?;
                classify_deployment(&name, rules)
            }
        };
        let result = validate_structure(dir, kind)
            .with_context(|| format!("structure validation could not run on {}", dir.display()))?;
        print!("{}", format_structure_result(&result));
        if !result.valid {
            failed += 1;
        }
    }

    Ok(if failed == 0 { 0 } else { 1 })
}
