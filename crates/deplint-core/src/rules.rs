//! # Rule Tables and Configuration
//!
//! The built-in tables that drive deployment checks, and the [`LintRules`]
//! value that carries them through the validators.
//!
//! The constants below are the defaults. A repository can override any of
//! them with a YAML rules file loaded through [`LintRules::load`]; fields
//! missing from the file keep their defaults.
//!
//! ```yaml
//! name_overrides:
//!   pki-ca: ca
//! excluded:
//!   - archived
//!   - legacy-gateway
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LintError, LintResult};

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

/// Deployment names whose config directory does not follow the
/// prefix-before-first-hyphen convention.
pub const NAME_OVERRIDES: &[(&str, &str)] = &[
    ("pki", "ca"),
    ("pki-ca", "ca"),
    ("sm", "sm"),
    ("sm-kms", "sm"),
];

/// Deployment directories that intentionally have no config mirror.
pub const EXCLUDED_DEPLOYMENTS: &[&str] = &[
    "archived",
    "shared-citus",
    "shared-postgres",
    "shared-telemetry",
    "template",
];

/// Product deployment names.
pub const PRODUCT_DEPLOYMENTS: &[&str] = &["identity", "jose", "pki", "sm", "skeleton"];

/// Suite deployment names. Any name ending in `-suite` is also a suite.
pub const SUITE_DEPLOYMENTS: &[&str] = &["cryptoutil-suite"];

/// Template deployment names.
pub const TEMPLATE_DEPLOYMENTS: &[&str] = &["template"];

/// Infrastructure deployment names. Any `shared-*` name is also infrastructure.
pub const INFRASTRUCTURE_DEPLOYMENTS: &[&str] = &[
    "shared-citus",
    "shared-postgres",
    "shared-telemetry",
];

/// Host ports owned by shared infrastructure, exempt from tier ranges.
///
/// | Port  | Owner |
/// |-------|-------|
/// | 5432  | database |
/// | 3000  | dashboard |
/// | 4317  | telemetry collector (gRPC) |
/// | 4318  | telemetry collector (HTTP) |
/// | 14317 | forwarded collector (gRPC) |
/// | 14318 | forwarded collector (HTTP) |
/// | 13133 | collector health check |
pub const INFRASTRUCTURE_PORTS: &[u16] = &[5432, 3000, 4317, 4318, 14317, 14318, 13133];

/// Suffix of generated listing manifests. Files ending with it are never
/// listed.
pub const LISTING_SUFFIX: &str = "_all_files.json";

// ---------------------------------------------------------------------------
// LintRules
// ---------------------------------------------------------------------------

/// Rule tables consumed by the mapper, mirror, classifier and port checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintRules {
    /// Deployment name → config directory name, consulted before the
    /// hyphen-prefix rule.
    pub name_overrides: BTreeMap<String, String>,
    /// Deployment directories skipped by the mirror check.
    pub excluded: BTreeSet<String>,
    /// Product deployment names.
    pub products: BTreeSet<String>,
    /// Suite deployment names.
    pub suites: BTreeSet<String>,
    /// Template deployment names.
    pub templates: BTreeSet<String>,
    /// Infrastructure deployment names.
    pub infrastructure: BTreeSet<String>,
    /// Host ports exempt from tier ranges.
    pub infrastructure_ports: BTreeSet<u16>,
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for LintRules {
    fn default() -> Self {
        Self {
            name_overrides: NAME_OVERRIDES
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            excluded: to_set(EXCLUDED_DEPLOYMENTS),
            products: to_set(PRODUCT_DEPLOYMENTS),
            suites: to_set(SUITE_DEPLOYMENTS),
            templates: to_set(TEMPLATE_DEPLOYMENTS),
            infrastructure: to_set(INFRASTRUCTURE_DEPLOYMENTS),
            infrastructure_ports: INFRASTRUCTURE_PORTS.iter().copied().collect(),
        }
    }
}

impl LintRules {
    /// Load rules from a YAML file. Keys absent from the file keep their
    /// built-in values.
    pub fn load(path: &Path) -> LintResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LintError::Config {
            path: path.to_path_buf(),
            reason: format!("cannot read file: {e}"),
        })?;
        Self::from_yaml_str(&content).map_err(|e| LintError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Parse rules from a YAML string. An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> LintResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Whether the mirror check skips `name`.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Whether `port` is a shared infrastructure port.
    pub fn is_infrastructure_port(&self, port: i64) -> bool {
        u16::try_from(port)
            .map(|p| self.infrastructure_ports.contains(&p))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reproduces_builtin_tables() {
        let rules = LintRules::default();
        assert_eq!(rules.name_overrides.get("pki-ca").map(String::as_str), Some("ca"));
        assert_eq!(rules.name_overrides.get("sm-kms").map(String::as_str), Some("sm"));
        assert_eq!(rules.excluded.len(), EXCLUDED_DEPLOYMENTS.len());
        assert!(rules.is_excluded("shared-postgres"));
        assert!(!rules.is_excluded("sm-im"));
        assert_eq!(rules.infrastructure_ports.len(), 7);
    }

    #[test]
    fn infrastructure_ports_recognised() {
        let rules = LintRules::default();
        for port in [5432, 3000, 4317, 4318, 14317, 14318, 13133] {
            assert!(rules.is_infrastructure_port(port), "{port}");
        }
        assert!(!rules.is_infrastructure_port(8080));
        assert!(!rules.is_infrastructure_port(-5432));
        assert!(!rules.is_infrastructure_port(70000));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let rules = LintRules::from_yaml_str("excluded:\n  - legacy\n").unwrap();
        assert!(rules.is_excluded("legacy"));
        assert!(!rules.is_excluded("archived"));
        assert_eq!(rules.products, LintRules::default().products);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(LintRules::from_yaml_str("").unwrap(), LintRules::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yml");
        std::fs::write(&path, "name_overrides:\n  billing-api: payments\n").unwrap();
        let rules = LintRules::load(&path).unwrap();
        assert_eq!(
            rules.name_overrides.get("billing-api").map(String::as_str),
            Some("payments")
        );
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LintRules::load(&dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, LintError::Config { .. }));
    }

    #[test]
    fn load_malformed_yaml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yml");
        std::fs::write(&path, "excluded: [unterminated\n").unwrap();
        let err = LintRules::load(&path).unwrap_err();
        assert!(matches!(err, LintError::Config { .. }));
    }
}
