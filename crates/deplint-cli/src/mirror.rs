//! # Mirror Subcommand
//!
//! Checks that every deployment directory has a config directory under the
//! mapped name. Orphaned config directories are reported as warnings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use deplint_core::LintRules;
use deplint_lint::{format_mirror_result, validate_mirror_with};

/// Arguments for the `deplint mirror` subcommand.
#[derive(Args, Debug)]
pub struct MirrorArgs {
    /// Root of the deployment tree.
    #[arg(value_name = "DEPLOYMENTS")]
    pub deployments: PathBuf,

    /// Root of the config tree.
    #[arg(value_name = "CONFIGS")]
    pub configs: PathBuf,
}

/// Execute the mirror subcommand.
pub fn run_mirror(args: &MirrorArgs, rules: &LintRules) -> Result<u8> {
    let result = validate_mirror_with(rules, &args.deployments, &args.configs)
        .context("mirror validation could not run")?;

    print!("{}", format_mirror_result(&result));
    Ok(if result.valid { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(deployments: &[&str], configs: &[&str]) -> (tempfile::TempDir, MirrorArgs) {
        let tmp = tempfile::tempdir().unwrap();
        let args = MirrorArgs {
            deployments: tmp.path().join("deployments"),
            configs: tmp.path().join("configs"),
        };
        for d in deployments {
            std::fs::create_dir_all(args.deployments.join(d)).unwrap();
        }
        for c in configs {
            std::fs::create_dir_all(args.configs.join(c)).unwrap();
        }
        std::fs::create_dir_all(&args.deployments).unwrap();
        std::fs::create_dir_all(&args.configs).unwrap();
        (tmp, args)
    }

    #[test]
    fn mirrored_trees_pass() {
        let (_tmp, args) = layout(&["sm-im", "pki-ca", "template"], &["sm", "ca"]);
        assert_eq!(run_mirror(&args, &LintRules::default()).unwrap(), 0);
    }

    #[test]
    fn missing_mirror_fails() {
        let (_tmp, args) = layout(&["jose-ja"], &[]);
        assert_eq!(run_mirror(&args, &LintRules::default()).unwrap(), 1);
    }

    #[test]
    fn rules_extend_exclusions() {
        let (_tmp, args) = layout(&["legacy-gateway"], &[]);
        let mut rules = LintRules::default();
        rules.excluded.insert("legacy-gateway".to_string());
        assert_eq!(run_mirror(&args, &rules).unwrap(), 0);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let args = MirrorArgs {
            deployments: tmp.path().join("nope"),
            configs: tmp.path().to_path_buf(),
        };
        assert!(run_mirror(&args, &LintRules::default()).is_err());
    }
}
