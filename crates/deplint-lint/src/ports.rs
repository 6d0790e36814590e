//! # Port Range Validator
//!
//! Checks that a deployment's host ports fall inside its tier's block. Two
//! sources are inspected:
//!
//! 1. host-side ports published in the deployment's compose manifest;
//! 2. `bind-public-port` in YAML files directly under the deployment's
//!    `config/` directory. This scan is shallow: subdirectories of `config/`
//!    are never visited.
//!
//! Shared infrastructure ports (database, dashboard, telemetry collector) are
//! exempt from tier ranges.

use std::path::{Path, PathBuf};

use deplint_core::{LintRules, PortTier, PortValidationResult};

use crate::naming::is_yaml_file;

/// Manifest names looked up in a deployment directory, in order.
pub const COMPOSE_FILE_NAMES: &[&str] = &["compose.yml", "compose.yaml"];

const BIND_PUBLIC_PORT: &str = "bind-public-port";

/// Locate the compose manifest of a deployment directory.
pub fn find_compose_file(deployment_dir: &Path) -> Option<PathBuf> {
    COMPOSE_FILE_NAMES
        .iter()
        .map(|name| deployment_dir.join(name))
        .find(|path| path.is_file())
}

/// Validate ports with the built-in infrastructure-port set.
pub fn validate_ports(deployment_dir: &Path, name: &str, tier: PortTier) -> PortValidationResult {
    validate_ports_with(&LintRules::default(), deployment_dir, name, tier)
}

/// Validate ports with caller-supplied rules.
pub fn validate_ports_with(
    rules: &LintRules,
    deployment_dir: &Path,
    name: &str,
    tier: PortTier,
) -> PortValidationResult {
    let mut result = PortValidationResult::new(deployment_dir);

    if !deployment_dir.exists() {
        result.add_error(format!("path does not exist: {}", deployment_dir.display()));
        return result;
    }
    if !deployment_dir.is_dir() {
        result.add_error(format!(
            "path is not a directory: {}",
            deployment_dir.display()
        ));
        return result;
    }

    let Some(compose_path) = find_compose_file(deployment_dir) else {
        tracing::debug!(deployment = name, "no compose manifest, skipping port checks");
        return result;
    };

    if check_compose_ports(rules, &compose_path, name, tier, &mut result) {
        check_config_ports(&deployment_dir.join("config"), name, tier, &mut result);
    }

    result
}

fn range_label(tier: PortTier) -> String {
    let (min, max) = tier.range();
    format!("{} range [{min}-{max}]", tier.label())
}

// ---------------------------------------------------------------------------
// Compose manifest
// ---------------------------------------------------------------------------

/// Returns false when the manifest could not be read or parsed.
fn check_compose_ports(
    rules: &LintRules,
    compose_path: &Path,
    name: &str,
    tier: PortTier,
    result: &mut PortValidationResult,
) -> bool {
    let doc = match std::fs::read_to_string(compose_path)
        .map_err(|e| e.to_string())
        .and_then(|c| serde_yaml::from_str::<serde_yaml::Value>(&c).map_err(|e| e.to_string()))
    {
        Ok(doc) => doc,
        Err(e) => {
            result.add_warning(format!("cannot parse {}: {e}", compose_path.display()));
            return false;
        }
    };

    let Some(services) = doc.get("services").and_then(|s| s.as_mapping()) else {
        return true;
    };

    for (service, definition) in services {
        let service = service.as_str().unwrap_or("<non-string>");
        let Some(ports) = definition.get("ports").and_then(|p| p.as_sequence()) else {
            continue;
        };
        for mapping in ports {
            let Some(port) = host_port(mapping) else {
                continue;
            };
            if rules.is_infrastructure_port(port) {
                continue;
            }
            if !tier.contains(port) {
                result.add_error(format!(
                    "deployment '{name}': host port {port} in service '{service}' outside {}",
                    range_label(tier)
                ));
            }
        }
    }
    true
}

/// Host-side port of one `ports:` entry.
///
/// Short syntax: `"host:container"` or `"ip:host:container"`; a bare
/// container port publishes nothing. Long syntax: the `published` key.
fn host_port(entry: &serde_yaml::Value) -> Option<i64> {
    if let Some(published) = entry.get("published") {
        return integer_like(published);
    }
    let short = entry.as_str()?;
    let parts: Vec<&str> = short.split(':').collect();
    let host = match parts.len() {
        2 => parts[0],
        3 => parts[1],
        _ => return None,
    };
    host.trim().parse().ok()
}

fn integer_like(value: &serde_yaml::Value) -> Option<i64> {
    match value {
        serde_yaml::Value::Number(n) => n.as_i64(),
        serde_yaml::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// config/ directory
// ---------------------------------------------------------------------------

fn check_config_ports(
    config_dir: &Path,
    name: &str,
    tier: PortTier,
    result: &mut PortValidationResult,
) {
    let entries = match std::fs::read_dir(config_dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .map(|n| is_yaml_file(&n.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    for path in files {
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        let Ok(doc) = serde_yaml::from_str::<serde_yaml::Value>(&content) else {
            continue;
        };
        let Some(port) = doc.get(BIND_PUBLIC_PORT).and_then(integer_like) else {
            continue;
        };
        if !tier.contains(port) {
            result.add_error(format!(
                "deployment '{name}': {BIND_PUBLIC_PORT} {port} in {} outside {}",
                path.display(),
                range_label(tier)
            ));
        }
    }
}
