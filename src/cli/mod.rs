//! CLI module for TrimCrop
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::container::DefaultAppContainer;
use crate::config::Settings;

pub mod args;
pub mod commands;

/// TrimCrop video editor client
///
/// Drives a trim/crop editing session against a remote processing service.
#[derive(Parser, Debug)]
#[command(name = "trimcrop")]
#[command(about = "TrimCrop - Trim and crop videos through a processing service")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: trimcrop.toml or config/trimcrop.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Processing service base URL
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Logging level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether a file would be accepted for upload
    Check(args::CheckArgs),
    /// Upload, trim, crop and process a video
    Process(args::ProcessArgs),
}

/// Run the parsed command with resolved settings
pub async fn run(cli: Cli, settings: Settings) -> Result<()> {
    match cli.command {
        Commands::Check(args) => commands::check(args, &settings).await,
        Commands::Process(args) => {
            let container = DefaultAppContainer::new(settings, args.dry_run)?;
            commands::process(args, &container).await
        }
    }
}
