//! ibn - commissioning tool
//!
//! Host for the commissioning core: downloads setup protocols, shows the
//! registered feature areas and drives the wizard from the terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ibn_core::{Commissioning, Config, DownloadOutcome, InstallationData, ProtocolId, ViewEvent};

mod notifier;

use notifier::ConsoleNotifier;

/// ibn - commissioning tool
#[derive(Parser, Debug)]
#[command(name = "ibn")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download the setup protocol of an installation
    Download {
        /// Device the protocol belongs to
        #[arg(long)]
        edge_id: String,

        /// Token returned when the protocol was generated
        #[arg(long)]
        protocol_id: ProtocolId,

        /// Override the configured JSON-RPC endpoint
        #[arg(long)]
        endpoint: Option<String>,

        /// Override the configured download directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the registered feature areas as JSON
    Features,

    /// Replay navigation events through the wizard
    Wizard {
        /// Events in order: previous | next
        #[arg(required = true)]
        events: Vec<ViewEvent>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_or_default(Config::default_path())
            .context("failed to load default config")?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    ibn_core::init_logging_with_level(&cli.log_level);

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Download {
            edge_id,
            protocol_id,
            endpoint,
            out,
        } => {
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }
            if let Some(out) = out {
                config.download_dir = out;
            }

            let commissioning = Commissioning::new(config, ConsoleNotifier)
                .context("failed to set up commissioning")?;
            let installation = InstallationData {
                edge_id,
                setup_protocol_id: Some(protocol_id),
            };

            match commissioning.download_protocol(&installation).await {
                DownloadOutcome::Saved { path, .. } => {
                    println!("{}", path.display());
                    Ok(ExitCode::SUCCESS)
                }
                DownloadOutcome::Failed => Ok(ExitCode::FAILURE),
            }
        }
        Commands::Features => {
            let commissioning = Commissioning::new(config, ConsoleNotifier)
                .context("failed to set up commissioning")?;
            let json = serde_json::to_string_pretty(commissioning.features().areas())?;
            println!("{}", json);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Wizard { events } => {
            let commissioning = Commissioning::new(config, ConsoleNotifier)
                .context("failed to set up commissioning")?;

            for event in events {
                match commissioning.handle_view_event(event) {
                    Ok(state) => println!("{} -> {} ({})", event, commissioning.current_view(), state),
                    Err(e) => {
                        eprintln!("{}: {}", event, e);
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
