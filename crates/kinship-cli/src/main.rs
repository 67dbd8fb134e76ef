// ABOUTME: kinship CLI entry point for editing and checking a family tree file
// ABOUTME: Provides subcommands: add, link, show, check

mod commands;
mod session;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// kinship - Family tree records with anomaly detection
#[derive(Parser)]
#[command(name = "kinship")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Family tree file to read and update
    #[arg(short, long, global = true, default_value = "family.txt")]
    file: PathBuf,

    /// JSON file with tree limits and rule settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a person to the tree
    Add {
        /// Full name (must be unique to be linkable)
        name: String,
        /// Birth date as "day month year" or day/month/year
        #[arg(long)]
        birth: String,
        /// Death date, omit for someone living
        #[arg(long)]
        death: Option<String>,
    },
    /// Make one person a parent of another and check the child
    Link {
        /// Name of the child
        child: String,
        /// Name of the parent
        parent: String,
    },
    /// List everyone in the tree
    Show {
        /// Family name for the listing heading
        #[arg(long)]
        family: Option<String>,
    },
    /// Check every person for anomalies
    Check {
        /// Print findings as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = commands::SessionConfig {
        file: cli.file,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::Add { name, birth, death } => commands::add::run(&commands::add::AddConfig {
            session,
            name,
            birth,
            death,
        }),
        Commands::Link { child, parent } => commands::link::run(&commands::link::LinkConfig {
            session,
            child,
            parent,
        }),
        Commands::Show { family } => {
            commands::show::run(&commands::show::ShowConfig { session, family })
        }
        Commands::Check { json } => {
            commands::check::run(&commands::check::CheckConfig { session, json })
        }
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
}
