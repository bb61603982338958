//! jsub - submit manuscripts to the journal
//!
//! CLI binary for the manuscript submission wizard.

use anyhow::Result;
use clap::{Parser, Subcommand};
use journal_submit::config::ApiConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

/// Environment variable controlling log output (`tracing` filter syntax)
const LOG_ENV_VAR: &str = "JSUB_LOG";

#[derive(Parser)]
#[command(name = "jsub")]
#[command(about = "Submit manuscripts to the journal")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides JOURNAL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a manuscript described by a JSON manifest
    Submit {
        /// Path to the manifest file
        manifest: PathBuf,

        /// Dry run - validate locally without uploading or submitting
        #[arg(long)]
        dry_run: bool,

        /// Allow advancing past incomplete steps (the server validates)
        #[arg(long)]
        lenient: bool,
    },

    /// List research topics
    Topics,

    /// Admin overview of all submissions
    Submissions,

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthCommand,
    },
}

#[derive(Subcommand)]
enum AuthCommand {
    /// Store a bearer token
    Login {
        /// Token copied from the journal website
        #[arg(long)]
        token: String,
    },
    /// Remove the stored token
    Logout,
    /// Show where the current token comes from
    Status,
    /// Show authentication setup instructions
    Setup,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ApiConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_base_url(url)?;
    }

    let ok = match cli.command {
        None => {
            // Default: interactive wizard
            cli::run_wizard(config).await?
        }
        Some(Commands::Submit {
            manifest,
            dry_run,
            lenient,
        }) => cli::run_submit(config, &manifest, dry_run, lenient).await?,
        Some(Commands::Topics) => {
            cli::run_topics(config).await?;
            true
        }
        Some(Commands::Submissions) => {
            cli::run_submissions(config).await?;
            true
        }
        Some(Commands::Auth { action }) => {
            let action = match action {
                AuthCommand::Login { token } => cli::AuthAction::Login { token },
                AuthCommand::Logout => cli::AuthAction::Logout,
                AuthCommand::Status => cli::AuthAction::Status,
                AuthCommand::Setup => cli::AuthAction::Setup,
            };
            cli::run_auth(action)?;
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
