//! # deplint-cli — Command-Line Interface
//!
//! Provides the `deplint` binary. Each subcommand lives in its own module
//! with a clap `Args` struct and a `run_*` handler returning the process
//! exit code: `0` when the checked artifacts pass, `1` when they do not.
//! Operational failures surface as `Err` and are mapped to `1` by `main`.
//!
//! ## Subcommands
//!
//! - `deplint listing` — classified file manifest for a deployment tree.
//! - `deplint mirror` — deployment ↔ config directory parity.
//! - `deplint naming` — kebab-case naming.
//! - `deplint ports` — tiered host-port ranges for one deployment.
//! - `deplint structure` — required directories, files and secrets.
//! - `deplint schema` — config files against the field table.
//! - `deplint all` — every validator, aggregated.
//!
//! ```bash
//! deplint all deployments configs
//! deplint --rules lint-rules.yml mirror deployments configs
//! deplint ports deployments/sm-im --tier service
//! ```

pub mod all;
pub mod listing;
pub mod mirror;
pub mod naming;
pub mod ports;
pub mod schema;
pub mod structure;

use std::path::Path;

use anyhow::{Context, Result};

use deplint_core::LintRules;

/// Load lint rules from `path`, or the built-in defaults when `None`.
pub fn load_rules(path: Option<&Path>) -> Result<LintRules> {
    match path {
        Some(path) => {
            let rules = LintRules::load(path)
                .with_context(|| format!("failed to load lint rules from {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded lint rules");
            Ok(rules)
        }
        None => Ok(LintRules::default()),
    }
}
