use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::cfg;
use crate::services::snapshot;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Printing the configuration failed: {0}")]
    ConfigPrintFailed(#[from] toml::ser::Error),

    #[error("Inspecting the snapshot failed")]
    SnapshotInspectFailed { #[source] source: snapshot::Error },
}

#[derive(Debug, Parser)]
#[command(name = "sheetdash")]
#[command(about = "Lead dashboard backend: SheetDB proxy, snapshot cache and SPA server", long_about = None)]
pub struct Cli {
    /// Address to bind, overrides HOST and the config files
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overrides PORT and the config files
    #[arg(long)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print the resolved configuration as TOML
    Config,
    /// Show where the snapshot lives and how many records it holds
    Snapshot,
}

impl Cli {
    pub fn apply_overrides(&self, settings: &mut cfg::AppSettings) {
        if let Some(host) = &self.host {
            settings.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
    }

    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

/// Runs a one-shot command. Returns `false` when the server should start instead.
pub async fn run_cli(command: Command, settings: &cfg::AppSettings) -> Result<bool, CliError> {
    match command {
        Command::Serve => return Ok(false),
        Command::Config => {
            println!("{}", toml::to_string(settings)?);
        }
        Command::Snapshot => {
            let path = &settings.storage.snapshot_path;
            println!("Snapshot file: {}", path.display());
            if path.exists() {
                let records = snapshot::read_snapshot(path)
                    .await
                    .map_err(|source| CliError::SnapshotInspectFailed { source })?;
                println!("Records: {}", records.len());
            } else {
                println!("No snapshot has been saved yet.");
            }
        }
    }
    Ok(true)
}
