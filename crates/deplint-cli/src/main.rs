//! # deplint CLI entry point
//!
//! Parses command-line arguments, initialises logging and dispatches to the
//! subcommand handlers. Reports are printed to stdout; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use deplint_cli::all::{run_all, AllArgs};
use deplint_cli::listing::{run_listing, ListingArgs};
use deplint_cli::load_rules;
use deplint_cli::mirror::{run_mirror, MirrorArgs};
use deplint_cli::naming::{run_naming, NamingArgs};
use deplint_cli::ports::{run_ports, PortsArgs};
use deplint_cli::schema::{run_schema, SchemaArgs};
use deplint_cli::structure::{run_structure, StructureArgs};

/// Static checks for deployment artifact trees.
///
/// Lists and classifies deployment files, checks that every deployment has a
/// matching config directory and the files its kind requires, enforces
/// kebab-case naming and tiered host-port ranges, and validates flat config
/// files against the known field table.
#[derive(Parser, Debug)]
#[command(name = "deplint", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// YAML file overriding the built-in lint rules.
    #[arg(long, value_name = "FILE", global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify every file under a deployment directory and write the listing.
    Listing(ListingArgs),

    /// Check that deployments and config directories mirror each other.
    Mirror(MirrorArgs),

    /// Check kebab-case naming of directories, YAML files and compose services.
    Naming(NamingArgs),

    /// Check host ports of one deployment against its tier range.
    Ports(PortsArgs),

    /// Check required directories, files and secrets of deployments.
    Structure(StructureArgs),

    /// Validate flat config files against the field table.
    Schema(SchemaArgs),

    /// Run every validator and print the aggregated report.
    All(AllArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "deplint starting");

    let result = load_rules(cli.rules.as_deref()).and_then(|rules| match &cli.command {
        Commands::Listing(args) => run_listing(args),
        Commands::Mirror(args) => run_mirror(args, &rules),
        Commands::Naming(args) => run_naming(args),
        Commands::Ports(args) => run_ports(args, &rules),
        Commands::Structure(args) => run_structure(args, &rules),
        Commands::Schema(args) => run_schema(args),
        Commands::All(args) => run_all(args, &rules),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
