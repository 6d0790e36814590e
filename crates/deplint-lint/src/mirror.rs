//! # Mirror Validator
//!
//! Checks structural parity between the deployment tree and the config tree.
//! Every non-excluded deployment directory must have a config directory under
//! the name the mapper assigns it; several deployments may share one. Config
//! directories nothing maps to are orphans, reported as warnings only.

use std::collections::BTreeSet;
use std::path::Path;

use deplint_core::{LintError, LintResult, LintRules, MirrorResult};

use crate::mapping::map_with_overrides;

/// Validate the mirror with the built-in rule tables.
pub fn validate_mirror(deployments_dir: &Path, configs_dir: &Path) -> LintResult<MirrorResult> {
    validate_mirror_with(&LintRules::default(), deployments_dir, configs_dir)
}

/// Validate the mirror with caller-supplied rules.
///
/// Fails with [`LintError::NotFound`] if either root is absent, and with
/// [`LintError::ListDirectory`] if a root cannot be listed.
pub fn validate_mirror_with(
    rules: &LintRules,
    deployments_dir: &Path,
    configs_dir: &Path,
) -> LintResult<MirrorResult> {
    for root in [deployments_dir, configs_dir] {
        if !root.exists() {
            return Err(LintError::NotFound {
                path: root.to_path_buf(),
            });
        }
    }

    let deployments = list_subdirectories(deployments_dir, "deployment")?;
    let configs = list_subdirectories(configs_dir, "config")?;

    let mut result = MirrorResult::new();
    let mut targeted = BTreeSet::new();

    for deployment in &deployments {
        if rules.is_excluded(deployment) {
            result.excluded.push(deployment.clone());
            continue;
        }
        let target = map_with_overrides(deployment, &rules.name_overrides);
        if !configs.contains(&target) {
            result.missing_mirrors.push(deployment.clone());
            result.errors.push(format!(
                "deployment '{deployment}' has no config directory '{target}' in {}",
                configs_dir.display()
            ));
        }
        targeted.insert(target);
    }

    for config in &configs {
        if !targeted.contains(config) {
            result.orphans.push(config.clone());
            result.warnings.push(format!(
                "orphaned config directory '{config}' has no matching deployment"
            ));
        }
    }

    result.valid = result.missing_mirrors.is_empty();

    tracing::debug!(
        deployments = deployments.len(),
        configs = configs.len(),
        missing = result.missing_mirrors.len(),
        orphans = result.orphans.len(),
        "mirror validation complete"
    );
    Ok(result)
}

/// Names of the immediate subdirectories of `dir`, sorted.
fn list_subdirectories(dir: &Path, what: &'static str) -> LintResult<BTreeSet<String>> {
    let list_err = |source: std::io::Error| LintError::ListDirectory {
        what,
        path: dir.to_path_buf(),
        source,
    };

    let mut names = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        if entry.file_type().map_err(list_err)?.is_dir() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}
