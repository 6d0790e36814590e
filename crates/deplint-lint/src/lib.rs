//! # deplint-lint — Deployment Tree Validators
//!
//! Static checks over a repository of deployment artifacts: a tree of
//! per-service directories holding compose manifests, secret placeholders
//! and config files, plus a parallel tree of config defaults.
//!
//! ## Validators
//!
//! - [`listing`] — classifies every file and emits a sorted JSON manifest.
//! - [`mapping`] — deployment name → config directory name.
//! - [`mirror`] — deployment ↔ config tree parity.
//! - [`naming`] — kebab-case directory, file and compose service names.
//! - [`ports`] — tiered host-port ranges.
//! - [`structure`] — required directories, files and secrets per deployment kind.
//! - [`schema`] — flat config files against the field table.
//! - [`deployment`] — suite / product / service classification.
//! - [`pipeline`] — runs all of the above and aggregates the outcomes.
//! - [`format`] — text rendering of every result.
//!
//! ## Crate Policy
//!
//! - Artifacts are only read. The one write is [`listing::write_listing`].
//! - Structural preconditions (missing root) are errors or invalid results;
//!   rule violations accumulate; per-file parse failures are warnings.
//! - Validators share no state and are safe to call concurrently on
//!   disjoint paths.

pub mod deployment;
pub mod format;
pub mod listing;
pub mod mapping;
pub mod mirror;
pub mod naming;
pub mod pipeline;
pub mod ports;
pub mod schema;
pub mod structure;

pub use deployment::{classify_deployment, DeploymentKind};
pub use format::{
    format_aggregate_report, format_mirror_result, format_naming_result, format_port_result,
    format_report, format_schema_result, format_structure_result,
};
pub use listing::{
    default_listing_path, generate_listing, listing_to_json, write_listing, DirectoryListing,
    FileEntry, FileStatus, FileType,
};
pub use mapping::{map_deployment_to_config, map_with_overrides};
pub use mirror::{validate_mirror, validate_mirror_with};
pub use naming::{is_kebab_case, to_kebab_case, validate_naming};
pub use pipeline::{validate_all, AggregateReport, ArtifactKind, ContentValidator, ValidatorOutcome};
pub use ports::{validate_ports, validate_ports_with};
pub use schema::validate_schema;
pub use structure::{validate_structure, StructureResult, SECRET_STEMS};
