//! # Validation Results
//!
//! Result types shared by every validator. Each is built fresh for a single
//! validation call and handed straight to a formatter or caller.
//!
//! Errors and warnings are ordered, append-only lists. A validator keeps
//! appending after the first violation so one run surfaces every problem.
//! Warnings never affect validity.

use std::path::Path;

use serde::Serialize;

// ---------------------------------------------------------------------------
// ValidationReport
// ---------------------------------------------------------------------------

/// Outcome of validating one path (a tree, a deployment, or a single file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// The path that was validated, as given by the caller.
    pub path: String,
    /// `false` iff `errors` is non-empty.
    pub valid: bool,
    /// Rule violations, in discovery order.
    pub errors: Vec<String>,
    /// Non-fatal findings, in discovery order.
    pub warnings: Vec<String>,
}

/// Result of the kebab-case naming check.
pub type NamingValidationResult = ValidationReport;
/// Result of the tiered port-range check.
pub type PortValidationResult = ValidationReport;
/// Result of the flat config schema check.
pub type SchemaValidationResult = ValidationReport;

impl ValidationReport {
    /// Create a passing report for `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().display().to_string(),
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a failed report for `path` carrying a single error.
    pub fn fail(path: impl AsRef<Path>, error: impl Into<String>) -> Self {
        let mut report = Self::new(path);
        report.add_error(error);
        report
    }

    /// Add an error. Marks the report as invalid.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.valid = false;
        self.errors.push(error.into());
    }

    /// Add a warning (does not affect validity).
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merge another report's findings into this one.
    pub fn merge(&mut self, other: ValidationReport) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

// ---------------------------------------------------------------------------
// MirrorResult
// ---------------------------------------------------------------------------

/// Outcome of the deployments ↔ configs structural mirror check.
///
/// `valid` reflects only `missing_mirrors`. Orphaned config directories are
/// reported as warnings and never invalidate the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MirrorResult {
    /// `false` iff `missing_mirrors` is non-empty.
    pub valid: bool,
    /// Deployment directories whose mapped config directory is absent (sorted).
    pub missing_mirrors: Vec<String>,
    /// Config directories no deployment maps to (sorted).
    pub orphans: Vec<String>,
    /// Deployment directories skipped by the exclusion set (sorted).
    pub excluded: Vec<String>,
    /// One entry per missing mirror.
    pub errors: Vec<String>,
    /// One entry per orphan.
    pub warnings: Vec<String>,
}

impl MirrorResult {
    /// Create an empty, passing result.
    pub fn new() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }
}
