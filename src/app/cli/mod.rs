//! CLI Adapter.

mod doctor;
mod generate;
mod init;
mod list;

use clap::{Parser, Subcommand};

use crate::app::logging;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "jellyserv")]
#[command(version)]
#[command(
    about = "Compose a self-hosted service stack and package its Docker Compose bundle",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter jellyserv.toml profile
    #[clap(visible_alias = "i")]
    Init {
        /// Directory for the profile (defaults to current directory)
        path: Option<std::path::PathBuf>,
    },
    /// Generate the setup bundle
    #[clap(visible_alias = "g")]
    Gen(generate::GenArgs),
    /// List available services
    #[clap(visible_alias = "ls")]
    List {
        /// Only show one group
        #[arg(long)]
        group: Option<String>,
        /// Show detailed info for a specific service
        #[arg(long)]
        detail: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Load the catalog from a directory of manifests
        #[arg(long)]
        catalog: Option<std::path::PathBuf>,
    },
    /// Validate the service catalog
    Doctor {
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
        /// Load the catalog from a directory of manifests
        #[arg(long)]
        catalog: Option<std::path::PathBuf>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let result: Result<i32, AppError> = match cli.command {
        Commands::Init { path } => init::run_init(path).map(|_| 0),
        Commands::Gen(args) => generate::run_gen(args).map(|_| 0),
        Commands::List { group, detail, json, catalog } => {
            list::run_list(group, detail, json, catalog).map(|_| 0)
        }
        Commands::Doctor { strict, catalog } => doctor::run_doctor(strict, catalog),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
