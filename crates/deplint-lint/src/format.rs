//! # Result Formatters
//!
//! Plain-text rendering of every result type. Output is meant for terminals
//! and CI logs: one banner line, then indented findings.

use deplint_core::{MirrorResult, ValidationReport};

use crate::pipeline::AggregateReport;
use crate::structure::StructureResult;

const PASS: &str = "PASS";
const FAIL: &str = "FAIL";

fn status(valid: bool) -> &'static str {
    if valid {
        PASS
    } else {
        FAIL
    }
}

/// Render a per-path report under `title`.
pub fn format_report(title: &str, report: &ValidationReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{title}: {}\n", report.path));
    out.push_str(&format!("  Status: {}\n", status(report.valid)));
    for error in &report.errors {
        out.push_str(&format!("  ERROR: {error}\n"));
    }
    for warning in &report.warnings {
        out.push_str(&format!("  WARNING: {warning}\n"));
    }
    out
}

/// Render a naming report.
pub fn format_naming_result(report: &ValidationReport) -> String {
    format_report("Naming Validation", report)
}

/// Render a port report.
pub fn format_port_result(report: &ValidationReport) -> String {
    format_report("Port Validation", report)
}

/// Render a schema report.
pub fn format_schema_result(report: &ValidationReport) -> String {
    format_report("Schema Validation", report)
}

fn section(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("  {heading} ({}):\n", items.len()));
    for item in items {
        out.push_str(&format!("    - {item}\n"));
    }
}

/// Render a mirror result. Empty sections are omitted.
pub fn format_mirror_result(result: &MirrorResult) -> String {
    let mut out = String::new();
    out.push_str("Structural Mirror Validation\n");
    out.push_str(&format!("  Status: {}\n", status(result.valid)));
    section(&mut out, "Excluded", &result.excluded);
    section(&mut out, "Errors", &result.errors);
    section(&mut out, "Warnings", &result.warnings);
    out.push_str(&format!(
        "  Summary: missing={} orphans={} excluded={}\n",
        result.missing_mirrors.len(),
        result.orphans.len(),
        result.excluded.len()
    ));
    out
}

fn listed(out: &mut String, heading: &str, items: &[String]) {
    if !items.is_empty() {
        out.push_str(&format!("  {heading}: {}\n", items.join(", ")));
    }
}

/// Render a structure result. Empty lists are omitted.
pub fn format_structure_result(result: &StructureResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Structure Validation: {} ({})\n",
        result.path, result.kind
    ));
    out.push_str(&format!("  Status: {}\n", status(result.valid)));
    listed(&mut out, "Missing directories", &result.missing_dirs);
    listed(&mut out, "Missing files", &result.missing_files);
    listed(&mut out, "Missing secrets", &result.missing_secrets);
    listed(&mut out, "Forbidden files", &result.forbidden_files);
    out
}

/// Render the aggregated pipeline report.
pub fn format_aggregate_report(report: &AggregateReport) -> String {
    let mut out = String::new();
    out.push_str("=== Validate All: Aggregated Results ===\n");
    out.push('\n');

    for outcome in &report.results {
        out.push_str(&format!(
            "[{}] {} ({}) [{:?}]\n",
            status(outcome.passed),
            outcome.name,
            outcome.target,
            outcome.duration
        ));
    }
    if !report.results.is_empty() {
        out.push('\n');
    }

    let failed: Vec<_> = report.results.iter().filter(|r| !r.passed).collect();
    out.push_str(&format!("Total:    {} validators\n", report.results.len()));
    out.push_str(&format!("Passed:   {}\n", report.results.len() - failed.len()));
    out.push_str(&format!("Failed:   {}\n", failed.len()));
    out.push_str(&format!("Duration: {:?}\n", report.total_duration));
    out.push('\n');

    if failed.is_empty() {
        out.push_str("ALL VALIDATORS PASSED\n");
    } else {
        out.push_str("VALIDATION FAILED\n");
        out.push_str("Failed validators:\n");
        for outcome in failed {
            out.push_str(&format!("  - {} ({})\n", outcome.name, outcome.target));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ValidatorOutcome;
    use std::time::Duration;

    #[test]
    fn report_pass_and_fail() {
        let report = ValidationReport::new("/test");
        let out = format_naming_result(&report);
        assert!(out.contains("/test"));
        assert!(out.contains("Status: PASS"));
        assert!(!out.contains("ERROR"));

        let mut report = ValidationReport::new("/deploy");
        report.add_error("port out of range");
        report.add_warning("cannot parse");
        let out = format_port_result(&report);
        assert!(out.starts_with("Port Validation: /deploy\n"));
        assert!(out.contains("Status: FAIL"));
        assert!(out.contains("  ERROR: port out of range\n"));
        assert!(out.contains("  WARNING: cannot parse\n"));
    }

    #[test]
    fn report_text_layout() {
        let mut report = ValidationReport::new("configs/sm/a.yml");
        report.add_error("Required field 'otlp' missing");
        report.add_warning("Unknown field 'x' (not in schema)");
        assert_eq!(
            format_schema_result(&report),
            "Schema Validation: configs/sm/a.yml\n  Status: FAIL\n  ERROR: Required field 'otlp' missing\n  WARNING: Unknown field 'x' (not in schema)\n"
        );
    }

    #[test]
    fn schema_title() {
        let out = format_schema_result(&ValidationReport::new("a.yml"));
        assert!(out.starts_with("Schema Validation: a.yml"));
    }

    #[test]
    fn mirror_valid_with_excluded() {
        let mut result = MirrorResult::new();
        result.excluded = vec!["shared-postgres".into()];
        let out = format_mirror_result(&result);
        assert!(out.contains("PASS"));
        assert!(out.contains("Excluded (1)"));
        assert!(out.contains("shared-postgres"));
        assert!(!out.contains("Errors"));
        assert!(!out.contains("Warnings"));
    }

    #[test]
    fn mirror_invalid_with_all_sections() {
        let result = MirrorResult {
            valid: false,
            missing_mirrors: vec!["sm".into(), "jose".into()],
            orphans: vec!["orphan1".into()],
            excluded: vec!["template".into()],
            errors: vec!["some error".into()],
            warnings: vec!["orphaned: orphan1".into()],
        };
        let out = format_mirror_result(&result);
        assert!(out.contains("FAIL"));
        assert!(out.contains("Excluded (1)"));
        assert!(out.contains("template"));
        assert!(out.contains("Errors (1)"));
        assert!(out.contains("some error"));
        assert!(out.contains("Warnings (1)"));
        assert!(out.contains("orphaned: orphan1"));
        assert!(out.contains("missing=2 orphans=1 excluded=1"));
    }

    #[test]
    fn mirror_empty_omits_sections() {
        let out = format_mirror_result(&MirrorResult::new());
        assert!(out.contains("PASS"));
        assert!(!out.contains("Excluded"));
        assert!(!out.contains("Errors"));
        assert!(!out.contains("Warnings"));
    }

    #[test]
    fn structure_lists_only_what_is_missing() {
        let result = StructureResult {
            path: "deployments/cipher-im".into(),
            kind: crate::deployment::DeploymentKind::Service,
            valid: false,
            missing_dirs: vec!["config".into()],
            missing_files: vec!["Dockerfile".into()],
            missing_secrets: vec![],
            forbidden_files: vec![],
        };
        assert_eq!(
            format_structure_result(&result),
            "Structure Validation: deployments/cipher-im (PRODUCT-SERVICE)\n  Status: FAIL\n  Missing directories: config\n  Missing files: Dockerfile\n"
        );
    }

    fn outcome(name: &str, target: &str, passed: bool) -> ValidatorOutcome {
        ValidatorOutcome {
            name: name.to_string(),
            target: target.to_string(),
            passed,
            output: String::new(),
            duration: Duration::from_millis(3),
        }
    }

    #[test]
    fn aggregate_all_passed() {
        let report = AggregateReport {
            results: vec![
                outcome("naming", "deployments", true),
                outcome("schema", "configs/sm/sm-app.yml", true),
            ],
            total_duration: Duration::from_millis(6),
        };
        let out = format_aggregate_report(&report);
        assert!(out.contains("=== Validate All: Aggregated Results ==="));
        assert!(out.contains("[PASS] naming (deployments)"));
        assert!(out.contains("[PASS] schema"));
        assert!(out.contains("Passed:   2"));
        assert!(out.contains("Failed:   0"));
        assert!(out.contains("ALL VALIDATORS PASSED"));
        assert!(!out.contains("VALIDATION FAILED"));
    }

    #[test]
    fn aggregate_with_failures() {
        let report = AggregateReport {
            results: vec![
                outcome("naming", "deployments", true),
                outcome("ports", "deployments/jose-ja", false),
                outcome("mirror", "deployments", false),
            ],
            total_duration: Duration::from_millis(9),
        };
        let out = format_aggregate_report(&report);
        assert!(out.contains("[FAIL] ports"));
        assert!(out.contains("Passed:   1"));
        assert!(out.contains("Failed:   2"));
        assert!(out.contains("VALIDATION FAILED"));
        assert!(out.contains("Failed validators:"));
        assert!(out.contains("- ports (deployments/jose-ja)"));
        assert!(out.contains("- mirror (deployments)"));
        assert!(!out.contains("ALL VALIDATORS PASSED"));
    }

    #[test]
    fn aggregate_empty() {
        let out = format_aggregate_report(&AggregateReport::default());
        assert!(out.contains("Total:    0 validators"));
        assert!(out.contains("ALL VALIDATORS PASSED"));
    }
}
