pub mod completions;
pub mod demo;
pub mod init;
pub mod serve;
pub mod show;
pub mod status;
pub mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{FarthingError, Result};
use crate::settings::load_settings;

/// Resolve the database path and insist it exists. Every command that
/// reads transactions goes through here so the hint stays consistent.
pub(crate) fn require_db() -> Result<PathBuf> {
    let path = load_settings().db_path();
    if !path.exists() {
        return Err(FarthingError::Other(
            "No database found. Run `farthing init` first.".into(),
        ));
    }
    Ok(path)
}

#[derive(Parser)]
#[command(name = "farthing", about = "Per-user money dashboard served from SQLite.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up farthing: choose a data directory and initialize the database.
    Init {
        /// Path for farthing data (default: platform data dir)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Load sample transactions for two demo users.
    Demo,
    /// Print a user's dashboard to the terminal.
    Show {
        /// User id, as it would appear in the dashboard URL
        user: String,
    },
    /// Interactive dashboard for one user.
    Tui {
        /// User id, as it would appear in the dashboard URL
        user: String,
    },
    /// Serve the web dashboard.
    Serve {
        /// Listen address (host:port), overriding settings
        #[arg(long)]
        listen: Option<String>,
    },
    /// Show current database and summary statistics.
    Status,
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
