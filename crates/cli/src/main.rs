//! LiftCheck CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Write a default config and data directory
//! - `serve`   — Start the HTTP gateway
//! - `walk`    — Run an inspection interactively on the terminal
//! - `status`  — Show configuration and table availability
//! - `doctor`  — Diagnose config and data files

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "liftcheck",
    about = "LiftCheck — elevator contactor inspection lookup",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and data directory
    Onboard,

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Walk the decision tables on the terminal
    Walk {
        /// Management number of the unit under inspection
        #[arg(short, long)]
        kanri: Option<String>,
    },

    /// Show configuration and table status
    Status,

    /// Diagnose config and data files
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Walk { kanri } => commands::walk::run(kanri).await?,
        Commands::Status => commands::status::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
