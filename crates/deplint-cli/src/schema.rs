//! # Schema Subcommand
//!
//! Validates one or more flat config files against the field table. Every
//! file is checked; the exit code is 1 if any of them fails.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use deplint_lint::{format_schema_result, validate_schema};

/// Arguments for the `deplint schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Config files to validate.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    let mut failed = 0usize;
    for file in &args.files {
        let report = validate_schema(file);
        print!("{}", format_schema_result(&report));
        if !report.valid {
            failed += 1;
        }
    }

    if failed > 0 {
        tracing::info!(failed, total = args.files.len(), "schema validation failed");
        return Ok(1);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "\
bind-public-protocol: https
bind-public-address: 0.0.0.0
bind-public-port: 8080
bind-private-protocol: https
bind-private-address: 127.0.0.1
bind-private-port: 9090
tls-public-mode: auto
tls-private-mode: auto
otlp: false
otlp-service: sm-im
";

    #[test]
    fn any_failing_file_fails_the_run() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("good.yml");
        let bad = tmp.path().join("bad.yml");
        std::fs::write(&good, VALID).unwrap();
        std::fs::write(&bad, "bind-public-port: high\n").unwrap();

        let only_good = SchemaArgs {
            files: vec![good.clone()],
        };
        assert_eq!(run_schema(&only_good).unwrap(), 0);

        let both = SchemaArgs {
            files: vec![good, bad],
        };
        assert_eq!(run_schema(&both).unwrap(), 1);
    }
}
