//! # Listing Subcommand
//!
//! Walks a deployment directory, classifies every regular file by type and
//! status, and writes the sorted JSON manifest. The manifest lands beside the
//! tree as `<dir>/<dirname>_all_files.json` unless `--out` says otherwise.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use deplint_lint::{default_listing_path, generate_listing, listing_to_json, write_listing};

/// Arguments for the `deplint listing` subcommand.
#[derive(Args, Debug)]
pub struct ListingArgs {
    /// Deployment directory to classify.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Output path for the listing file.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Print the listing to stdout instead of writing a file.
    #[arg(long, conflicts_with = "out")]
    pub stdout: bool,
}

/// Execute the listing subcommand.
pub fn run_listing(args: &ListingArgs) -> Result<u8> {
    let listing = generate_listing(&args.dir)
        .with_context(|| format!("failed to list {}", args.dir.display()))?;

    if args.stdout {
        print!("{}", listing_to_json(&listing)?);
        return Ok(0);
    }

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| default_listing_path(&args.dir));
    write_listing(&listing, &out)
        .with_context(|| format!("failed to write listing to {}", out.display()))?;

    println!("Listed {} files: {}", listing.len(), out.display());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deplint_lint::DirectoryListing;

    fn args(dir: PathBuf, out: Option<PathBuf>) -> ListingArgs {
        ListingArgs {
            dir,
            out,
            stdout: false,
        }
    }

    #[test]
    fn writes_default_listing_beside_the_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("sm-im");
        std::fs::create_dir_all(dir.join("secrets")).unwrap();
        std::fs::write(dir.join("compose.yml"), "services: {}\n").unwrap();
        std::fs::write(dir.join("secrets/pepper.secret"), "x").unwrap();

        assert_eq!(run_listing(&args(dir.clone(), None)).unwrap(), 0);

        let written = std::fs::read_to_string(dir.join("sm-im_all_files.json")).unwrap();
        let listing: DirectoryListing = serde_json::from_str(&written).unwrap();
        assert_eq!(listing.len(), 2);
        assert!(listing.contains_key("secrets/pepper.secret"));
    }

    #[test]
    fn honours_out_path() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("jose-ja");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Dockerfile"), "FROM alpine\n").unwrap();
        let out = tmp.path().join("listing.json");

        assert_eq!(run_listing(&args(dir, Some(out.clone()))).unwrap(), 0);
        assert!(out.exists());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = run_listing(&args(tmp.path().join("absent"), None)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to list"));
    }
}
