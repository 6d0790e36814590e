//! # Aggregated Validation Pipeline
//!
//! Runs every validator over a deployment tree and its config tree and
//! collects one [`ValidatorOutcome`] per step. Steps run in a fixed order:
//!
//! 1. `listing`: classify both trees (in memory, nothing is written);
//! 2. `mirror`: deployment ↔ config parity;
//! 3. `structure`: each deployment against the layout its kind requires;
//! 4. `naming`: both trees;
//! 5. `ports`: each suite, product and service deployment at its tier;
//! 6. `schema`: every YAML file under the config tree;
//! 7. injected [`ContentValidator`]s against each compose manifest and each
//!    config file they apply to.
//!
//! A failing step never stops the pipeline. Missing roots show up as failed
//! outcomes.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use walkdir::WalkDir;

use deplint_core::{LintRules, ValidationReport};

use crate::deployment::classify_deployment;
use crate::format::{
    format_mirror_result, format_naming_result, format_port_result, format_report,
    format_schema_result, format_structure_result,
};
use crate::listing::generate_listing;
use crate::mirror::validate_mirror_with;
use crate::naming::{is_yaml_file, validate_naming};
use crate::ports::{find_compose_file, validate_ports_with};
use crate::schema::validate_schema;
use crate::structure::validate_structure;

// ---------------------------------------------------------------------------
// Content validator seam
// ---------------------------------------------------------------------------

/// Kind of artifact handed to a [`ContentValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A deployment's compose manifest.
    ComposeManifest,
    /// A file under the config tree.
    ServiceConfig,
}

/// A semantic check over a single artifact, supplied by the caller.
///
/// Credential-leak detection, TLS policy and similar content rules plug in
/// here; the pipeline only decides which files each validator sees.
pub trait ContentValidator: Send + Sync {
    /// Short name shown in the aggregated report.
    fn name(&self) -> &str;

    /// Whether this validator wants artifacts of `kind`.
    fn applies_to(&self, kind: ArtifactKind) -> bool;

    /// Validate one artifact.
    fn validate(&self, path: &Path) -> ValidationReport;
}

// ---------------------------------------------------------------------------
// Aggregated report
// ---------------------------------------------------------------------------

/// Outcome of one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatorOutcome {
    /// Validator name (`mirror`, `ports`, ...).
    pub name: String,
    /// Path the validator ran against.
    pub target: String,
    /// Whether the step passed.
    pub passed: bool,
    /// Rendered validator output.
    pub output: String,
    /// Wall-clock time of the step.
    pub duration: Duration,
}

/// Every outcome of a pipeline run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    /// Outcomes in execution order.
    pub results: Vec<ValidatorOutcome>,
    /// Wall-clock time of the whole run.
    pub total_duration: Duration,
}

impl AggregateReport {
    /// True iff every outcome passed. Vacuously true when empty.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ValidatorOutcome> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Append an outcome.
    pub fn add_result(
        &mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        passed: bool,
        output: impl Into<String>,
        duration: Duration,
    ) {
        self.results.push(ValidatorOutcome {
            name: name.into(),
            target: target.into(),
            passed,
            output: output.into(),
            duration,
        });
    }

    /// Time `step`, which returns `(passed, output)`, and record it.
    fn run_step(
        &mut self,
        name: &str,
        target: &Path,
        step: impl FnOnce() -> (bool, String),
    ) {
        let start = Instant::now();
        let (passed, output) = step();
        let duration = start.elapsed();
        tracing::debug!(
            validator = name,
            target = %target.display(),
            passed,
            elapsed_ms = duration.as_millis() as u64,
            "validator finished"
        );
        self.add_result(name, target.display().to_string(), passed, output, duration);
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run every validator over `deployments_dir` and `configs_dir`.
pub fn validate_all(
    deployments_dir: &Path,
    configs_dir: &Path,
    rules: &LintRules,
    collaborators: &[Box<dyn ContentValidator>],
) -> AggregateReport {
    let start = Instant::now();
    let mut report = AggregateReport::default();

    tracing::info!(
        deployments = %deployments_dir.display(),
        configs = %configs_dir.display(),
        collaborators = collaborators.len(),
        "starting validation pipeline"
    );

    for root in [deployments_dir, configs_dir] {
        report.run_step("listing", root, || match generate_listing(root) {
            Ok(listing) => (true, format!("{} files classified\n", listing.len())),
            Err(e) => (false, format!("{e}\n")),
        });
    }

    report.run_step("mirror", deployments_dir, || {
        match validate_mirror_with(rules, deployments_dir, configs_dir) {
            Ok(result) => (result.valid, format_mirror_result(&result)),
            Err(e) => (false, format!("{e}\n")),
        }
    });

    let deployments = discover_deployments(deployments_dir);
    for (name, dir) in &deployments {
        let kind = classify_deployment(name, rules);
        report.run_step("structure", dir, || match validate_structure(dir, kind) {
            Ok(result) => (result.valid, format_structure_result(&result)),
            Err(e) => (false, format!("{e}\n")),
        });
    }

    for root in [deployments_dir, configs_dir] {
        report.run_step("naming", root, || {
            let result = validate_naming(root);
            (result.valid, format_naming_result(&result))
        });
    }

    for (name, dir) in &deployments {
        let kind = classify_deployment(name, rules);
        let Some(tier) = kind.port_tier() else {
            tracing::debug!(deployment = %name, kind = %kind, "no port tier, skipping");
            continue;
        };
        report.run_step("ports", dir, || {
            let result = validate_ports_with(rules, dir, name, tier);
            (result.valid, format_port_result(&result))
        });
    }

    let config_files = discover_config_files(configs_dir);
    for path in &config_files {
        report.run_step("schema", path, || {
            let result = validate_schema(path);
            (result.valid, format_schema_result(&result))
        });
    }

    let compose_files: Vec<PathBuf> = deployments
        .iter()
        .filter_map(|(_, dir)| find_compose_file(dir))
        .collect();
    for validator in collaborators {
        let targets = [
            (ArtifactKind::ComposeManifest, &compose_files),
            (ArtifactKind::ServiceConfig, &config_files),
        ];
        for (kind, paths) in targets {
            if !validator.applies_to(kind) {
                continue;
            }
            for path in paths {
                report.run_step(validator.name(), path, || {
                    let result = validator.validate(path);
                    (result.valid, format_report(validator.name(), &result))
                });
            }
        }
    }

    report.total_duration = start.elapsed();
    tracing::info!(
        validators = report.results.len(),
        failed = report.failures().count(),
        "validation pipeline complete"
    );
    report
}

/// Immediate subdirectories of the deployment root, sorted by name.
fn discover_deployments(deployments_dir: &Path) -> Vec<(String, PathBuf)> {
    let entries = match std::fs::read_dir(deployments_dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %deployments_dir.display(),
                error = %e,
                "cannot list deployments"
            );
            return Vec::new();
        }
    };
    let mut dirs: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
        .collect();
    dirs.sort();
    dirs
}

/// Every YAML file under the config root, recursively, sorted by path.
fn discover_config_files(configs_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(configs_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_yaml_file(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}
