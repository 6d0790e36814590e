//! # Error Hierarchy
//!
//! Structured error types for deplint, built with `thiserror`.
//!
//! Only structural preconditions surface as a [`LintError`]: a missing root,
//! a path that is not a directory, a directory that cannot be listed. Rule
//! violations found inside artifacts are never errors at this level; they
//! accumulate in a [`crate::ValidationReport`] or [`crate::MirrorResult`].

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for deplint.
#[derive(Error, Debug)]
pub enum LintError {
    /// A root path handed to a validator does not exist.
    #[error("path does not exist: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A root path exists but is not a directory.
    #[error("path is not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Listing the immediate entries of a directory failed.
    #[error("failed to list {what} directories in {}: {source}", path.display())]
    ListDirectory {
        /// Which tree was being listed ("deployment" or "config").
        what: &'static str,
        /// The directory that could not be listed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A rules file could not be loaded.
    #[error("invalid rules file {}: {reason}", path.display())]
    Config {
        /// Path to the rules file.
        path: PathBuf,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias used across the workspace.
pub type LintResult<T> = Result<T, LintError>;
