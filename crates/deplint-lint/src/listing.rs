//! # Directory Classifier
//!
//! Walks a deployment or config tree and classifies every regular file by
//! type and required/optional status, producing a [`DirectoryListing`].
//!
//! Both classifications are ordered `(predicate, result)` chains evaluated
//! independently: the first matching predicate wins. A `.never` file is
//! therefore `secret` + `required`, while a `README.md` is `doc` + `optional`.
//!
//! The serialized listing is byte-stable: keys are sorted, the JSON is
//! pretty-printed with two-space indentation and ends in a newline.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use deplint_core::{LintError, LintResult, LISTING_SUFFIX};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Kind of artifact a file represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Secret placeholder (`*.secret`, `*.never`).
    Secret,
    /// Orchestration manifest (`compose*.yml`).
    Compose,
    /// Container build file (`Dockerfile*`).
    Docker,
    /// Any other YAML file.
    Config,
    /// SQL script.
    Sql,
    /// Markdown documentation.
    Doc,
    /// JSON document.
    Json,
    /// Everything else.
    Other,
}

/// Whether a file must exist in a well-formed deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// The file must exist.
    Required,
    /// The file may exist.
    Optional,
}

/// Classification of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Artifact kind.
    #[serde(rename = "type")]
    pub kind: FileType,
    /// Required or optional.
    pub status: FileStatus,
}

/// Slash-separated relative path → classification, sorted by path.
pub type DirectoryListing = BTreeMap<String, FileEntry>;

// ---------------------------------------------------------------------------
// Rule chains
// ---------------------------------------------------------------------------

fn is_yaml(name: &str) -> bool {
    name.ends_with(".yml") || name.ends_with(".yaml")
}

fn is_secret(name: &str) -> bool {
    name.ends_with(".secret") || name.ends_with(".never")
}

fn is_compose(name: &str) -> bool {
    name.starts_with("compose") && is_yaml(name)
}

fn is_dockerfile(name: &str) -> bool {
    name.starts_with("dockerfile")
}

fn is_sql(name: &str) -> bool {
    name.ends_with(".sql")
}

fn is_markdown(name: &str) -> bool {
    name.ends_with(".md")
}

fn is_json(name: &str) -> bool {
    name.ends_with(".json")
}

/// File-type rules over the lowercased file name, in priority order.
const TYPE_RULES: &[(fn(&str) -> bool, FileType)] = &[
    (is_secret, FileType::Secret),
    (is_compose, FileType::Compose),
    (is_dockerfile, FileType::Docker),
    (is_yaml, FileType::Config),
    (is_sql, FileType::Sql),
    (is_markdown, FileType::Doc),
    (is_json, FileType::Json),
];

fn requires_presence(path: &str) -> bool {
    path.contains("compose.yml")
        || path.ends_with(".secret")
        || path.ends_with("dockerfile")
        || path.ends_with(".never")
}

/// File-status rules over the lowercased relative path, in priority order.
const STATUS_RULES: &[(fn(&str) -> bool, FileStatus)] = &[
    (requires_presence, FileStatus::Required),
    (is_markdown, FileStatus::Optional),
];

/// Classify a file name. Matching is case-insensitive.
pub fn classify_file_type(name: &str) -> FileType {
    let lower = name.to_ascii_lowercase();
    TYPE_RULES
        .iter()
        .find(|(matches, _)| matches(&lower))
        .map(|(_, kind)| *kind)
        .unwrap_or(FileType::Other)
}

/// Classify a relative path. Matching is case-insensitive.
pub fn classify_file_status(path: &str) -> FileStatus {
    let lower = path.to_ascii_lowercase();
    STATUS_RULES
        .iter()
        .find(|(matches, _)| matches(&lower))
        .map(|(_, status)| *status)
        .unwrap_or(FileStatus::Optional)
}

/// Classify a file by its slash-separated relative path.
pub fn classify(relative_path: &str) -> FileEntry {
    let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    FileEntry {
        kind: classify_file_type(name),
        status: classify_file_status(relative_path),
    }
}

// ---------------------------------------------------------------------------
// Generation and persistence
// ---------------------------------------------------------------------------

fn to_slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Walk `base_dir` recursively and classify every regular file.
///
/// Files whose name ends with [`LISTING_SUFFIX`] are skipped so a listing
/// never lists itself. Symlinks are not followed.
pub fn generate_listing(base_dir: &Path) -> LintResult<DirectoryListing> {
    if !base_dir.exists() {
        return Err(LintError::NotFound {
            path: base_dir.to_path_buf(),
        });
    }
    if !base_dir.is_dir() {
        return Err(LintError::NotADirectory {
            path: base_dir.to_path_buf(),
        });
    }

    let mut listing = DirectoryListing::new();
    for entry in WalkDir::new(base_dir).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(LISTING_SUFFIX) {
            continue;
        }
        let relative = entry.path().strip_prefix(base_dir).unwrap_or(entry.path());
        let key = to_slash_path(relative);
        listing.insert(key.clone(), classify(&key));
    }

    tracing::debug!(
        dir = %base_dir.display(),
        files = listing.len(),
        "generated directory listing"
    );
    Ok(listing)
}

/// Serialize a listing as sorted, pretty-printed JSON with a trailing newline.
pub fn listing_to_json(listing: &DirectoryListing) -> LintResult<String> {
    let mut json = serde_json::to_string_pretty(listing)?;
    json.push('\n');
    Ok(json)
}

/// Write a listing to `path` with owner read/write permissions.
pub fn write_listing(listing: &DirectoryListing, path: &Path) -> LintResult<()> {
    let json = listing_to_json(listing)?;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(json.as_bytes())?;
    // `mode` only applies on creation; tighten a pre-existing file too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    tracing::info!(path = %path.display(), files = listing.len(), "wrote directory listing");
    Ok(())
}

/// Conventional manifest location: `<base_dir>/<base_name>_all_files.json`.
pub fn default_listing_path(base_dir: &Path) -> PathBuf {
    let base_name = base_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "listing".to_string());
    base_dir.join(format!("{base_name}{LISTING_SUFFIX}"))
}
