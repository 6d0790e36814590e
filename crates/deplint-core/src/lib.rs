#![deny(missing_docs)]

//! # deplint-core — Foundational Types for deplint
//!
//! The leaf crate of the workspace. It defines the vocabulary every
//! validator shares: the error hierarchy, the result types that accumulate
//! findings, port tiers, and the static rule tables.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `deplint-*` crates.
//! - No filesystem traversal here; walking trees is `deplint-lint`'s job.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Rule tables are plain data. Behavior lives in the validators.

pub mod config_schema;
pub mod error;
pub mod report;
pub mod rules;
pub mod tier;

// Re-export primary types for ergonomic imports.
pub use config_schema::{schema_field, FieldType, SchemaField, CONFIG_SCHEMA};
pub use error::{LintError, LintResult};
pub use report::{
    MirrorResult, NamingValidationResult, PortValidationResult, SchemaValidationResult,
    ValidationReport,
};
pub use rules::{LintRules, LISTING_SUFFIX};
pub use tier::PortTier;
