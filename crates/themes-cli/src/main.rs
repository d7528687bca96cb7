//! Journal themes CLI
//!
//! Extracts dominant themes from recent journal entries.
//!
//! # Usage
//!
//! ```bash
//! themes extract --input entries.json [--days 7] [--limit 30] [--detailed] [--cbt]
//! cat entries.json | themes extract --no-embeddings
//! themes config
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/journal-themes/config.toml)
//! 3. Environment variables (THEMES_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use themes_cli::{run_extract, show_config, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract(args) => {
            run_extract(cli.config.as_deref(), cli.log_level.as_deref(), &args).await?;
        }
        Commands::Config => {
            show_config(cli.config.as_deref(), cli.log_level.as_deref())?;
        }
    }

    Ok(())
}
