//! # Name Mapper
//!
//! Maps a deployment directory name to the config directory that holds its
//! defaults. Service-level deployments (`jose-ja`) share the config directory
//! of their product (`jose`); a few names are irregular and resolved through
//! an override table first.

use std::collections::BTreeMap;

use deplint_core::rules::NAME_OVERRIDES;

/// Map a deployment name using the built-in override table.
///
/// Resolution order: exact override, then the prefix before the first `-`,
/// then the name unchanged.
pub fn map_deployment_to_config(name: &str) -> String {
    if let Some((_, target)) = NAME_OVERRIDES.iter().find(|(from, _)| *from == name) {
        return (*target).to_string();
    }
    map_by_prefix(name)
}

/// Map a deployment name using a caller-supplied override table.
pub fn map_with_overrides(name: &str, overrides: &BTreeMap<String, String>) -> String {
    if let Some(target) = overrides.get(name) {
        return target.clone();
    }
    map_by_prefix(name)
}

fn map_by_prefix(name: &str) -> String {
    match name.split_once('-') {
        Some((product, _)) => product.to_string(),
        None => name.to_string(),
    }
}
