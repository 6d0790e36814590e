//! # Deployment Structure Validator
//!
//! Checks that a deployment directory holds what its [`DeploymentKind`]
//! requires:
//!
//! | Kind | Directories | Files | Secrets |
//! |---|---|---|---|
//! | service | `config/`, `secrets/` | `compose.yml`, `Dockerfile` | all live (`.secret`) |
//! | product | `secrets/` | `compose.yml` | pepper live, the rest `.secret.never` |
//! | suite | `secrets/` | `compose.yml`, `Dockerfile` | pepper live, the rest `.secret.never` |
//! | template | `secrets/` | `compose.yml` | all live |
//! | infrastructure | | `compose.yml` | |
//!
//! Secrets are only looked for when `secrets/` exists; a missing directory is
//! reported once rather than once per secret. A secret is present when some
//! file in `secrets/` contains its stem and ends with the expected suffix, so
//! both `sm-im-hash_pepper.secret` and `hash_pepper_v3.secret` satisfy
//! `hash_pepper`.
//!
//! Service deployments must not carry the retired per-environment config
//! files (`demo-seed.yml`, `integration.yml`, `<name>-demo.yml`,
//! `<name>-e2e.yml`).

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use deplint_core::{LintError, LintResult};

use crate::deployment::DeploymentKind;

/// Secret stems every secret-bearing deployment carries.
pub const SECRET_STEMS: &[&str] = &[
    "hash_pepper",
    "unseal_1of5",
    "unseal_2of5",
    "unseal_3of5",
    "unseal_4of5",
    "unseal_5of5",
    "postgres_username",
    "postgres_password",
    "postgres_database",
    "postgres_url",
];

const LIVE_SUFFIX: &str = ".secret";
const PLACEHOLDER_SUFFIX: &str = ".secret.never";
const PEPPER_STEM: &str = "hash_pepper";

const RETIRED_CONFIGS: &[&str] = &["demo-seed.yml", "integration.yml"];
const RETIRED_CONFIG_SUFFIXES: &[&str] = &["-demo.yml", "-e2e.yml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SecretPolicy {
    None,
    /// Every stem as a live `.secret`.
    Live,
    /// The pepper live, everything else as a `.secret.never` placeholder.
    Placeholder,
}

struct Layout {
    dirs: &'static [&'static str],
    files: &'static [&'static str],
    secrets: SecretPolicy,
    retired_configs: bool,
}

const SERVICE_LAYOUT: Layout = Layout {
    dirs: &["config", "secrets"],
    files: &["compose.yml", "Dockerfile"],
    secrets: SecretPolicy::Live,
    retired_configs: true,
};

const PRODUCT_LAYOUT: Layout = Layout {
    dirs: &["secrets"],
    files: &["compose.yml"],
    secrets: SecretPolicy::Placeholder,
    retired_configs: false,
};

const SUITE_LAYOUT: Layout = Layout {
    dirs: &["secrets"],
    files: &["compose.yml", "Dockerfile"],
    secrets: SecretPolicy::Placeholder,
    retired_configs: false,
};

const TEMPLATE_LAYOUT: Layout = Layout {
    dirs: &["secrets"],
    files: &["compose.yml"],
    secrets: SecretPolicy::Live,
    retired_configs: false,
};

const INFRASTRUCTURE_LAYOUT: Layout = Layout {
    dirs: &[],
    files: &["compose.yml"],
    secrets: SecretPolicy::None,
    retired_configs: false,
};

fn layout(kind: DeploymentKind) -> &'static Layout {
    match kind {
        DeploymentKind::Service => &SERVICE_LAYOUT,
        DeploymentKind::Product => &PRODUCT_LAYOUT,
        DeploymentKind::Suite => &SUITE_LAYOUT,
        DeploymentKind::Template => &TEMPLATE_LAYOUT,
        DeploymentKind::Infrastructure => &INFRASTRUCTURE_LAYOUT,
    }
}

fn secret_suffix(policy: SecretPolicy, stem: &str) -> &'static str {
    match policy {
        SecretPolicy::Placeholder if stem != PEPPER_STEM => PLACEHOLDER_SUFFIX,
        _ => LIVE_SUFFIX,
    }
}

/// Outcome of a structure check on one deployment directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureResult {
    /// The deployment directory.
    pub path: String,
    /// Kind the layout was taken from.
    pub kind: DeploymentKind,
    /// `false` iff any of the lists below is non-empty.
    pub valid: bool,
    /// Required directories that are absent.
    pub missing_dirs: Vec<String>,
    /// Required files that are absent.
    pub missing_files: Vec<String>,
    /// Expected secret files that are absent, as `<stem><suffix>`.
    pub missing_secrets: Vec<String>,
    /// Retired files that are still present, relative to the deployment.
    pub forbidden_files: Vec<String>,
}

impl StructureResult {
    fn new(path: &Path, kind: DeploymentKind) -> Self {
        Self {
            path: path.display().to_string(),
            kind,
            valid: true,
            missing_dirs: Vec::new(),
            missing_files: Vec::new(),
            missing_secrets: Vec::new(),
            forbidden_files: Vec::new(),
        }
    }

    fn settle(mut self) -> Self {
        self.valid = self.missing_dirs.is_empty()
            && self.missing_files.is_empty()
            && self.missing_secrets.is_empty()
            && self.forbidden_files.is_empty();
        self
    }
}

/// Check `deployment_dir` against the layout of `kind`.
///
/// Fails with [`LintError::NotFound`] or [`LintError::NotADirectory`] when
/// the directory itself is unusable, and with [`LintError::Io`] when an
/// existing `secrets/` directory cannot be listed.
pub fn validate_structure(deployment_dir: &Path, kind: DeploymentKind) -> LintResult<StructureResult> {
    if !deployment_dir.exists() {
        return Err(LintError::NotFound {
            path: deployment_dir.to_path_buf(),
        });
    }
    if !deployment_dir.is_dir() {
        return Err(LintError::NotADirectory {
            path: deployment_dir.to_path_buf(),
        });
    }

    let layout = layout(kind);
    let mut result = StructureResult::new(deployment_dir, kind);

    for dir in layout.dirs {
        if !deployment_dir.join(dir).is_dir() {
            result.missing_dirs.push((*dir).to_string());
        }
    }
    for file in layout.files {
        if !deployment_dir.join(file).is_file() {
            result.missing_files.push((*file).to_string());
        }
    }

    let secrets_dir = deployment_dir.join("secrets");
    if layout.secrets != SecretPolicy::None && secrets_dir.is_dir() {
        let present = list_file_names(&secrets_dir)?;
        for stem in SECRET_STEMS {
            let suffix = secret_suffix(layout.secrets, stem);
            let found = present
                .iter()
                .any(|name| name.ends_with(suffix) && name.contains(stem));
            if !found {
                result.missing_secrets.push(format!("{stem}{suffix}"));
            }
        }
    }

    if layout.retired_configs {
        let name = deployment_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let retired = RETIRED_CONFIGS
            .iter()
            .map(|f| (*f).to_string())
            .chain(RETIRED_CONFIG_SUFFIXES.iter().map(|s| format!("{name}{s}")));
        for file in retired {
            if deployment_dir.join("config").join(&file).exists() {
                result.forbidden_files.push(format!("config/{file}"));
            }
        }
    }

    let result = result.settle();
    tracing::debug!(
        dir = %deployment_dir.display(),
        %kind,
        valid = result.valid,
        "structure validation complete"
    );
    Ok(result)
}

fn list_file_names(dir: &Path) -> LintResult<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Populate `dir` with everything `kind` requires. Test fixture only.
#[cfg(test)]
pub(crate) fn write_complete_layout(dir: &Path, kind: DeploymentKind) {
    let layout = layout(kind);
    std::fs::create_dir_all(dir).unwrap();
    for sub in layout.dirs {
        std::fs::create_dir_all(dir.join(sub)).unwrap();
    }
    for file in layout.files {
        if !dir.join(file).exists() {
            std::fs::write(dir.join(file), "services: {}\n").unwrap();
        }
    }
    if layout.secrets != SecretPolicy::None {
        for stem in SECRET_STEMS {
            let suffix = secret_suffix(layout.secrets, stem);
            std::fs::write(dir.join("secrets").join(format!("{stem}{suffix}")), "x").unwrap();
        }
    }
}
