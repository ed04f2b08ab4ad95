//! TrimCrop CLI
//!
//! Uploads a video to the processing service, applies trim and crop edits
//! through an editor session, and fetches the result.
//!
//! # Usage
//!
//! ```bash
//! trimcrop check --input clip.mp4
//! trimcrop process --input clip.mp4 --start 00:00:10 --end 00:01:00 --quality 1080p
//! trimcrop process --input clip.mp4 --crop --video-size 1920x1080 --aspect 16:9 --dry-run
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use trimcrop::adapters::{build_subscriber, init_logging};
use trimcrop::cli::{self, Cli};
use trimcrop::config::LoggingSettings;
use trimcrop::config_initialization::initialize_configuration_hierarchy;

/// Main entry point for the TrimCrop CLI
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings are not known yet; log their loading with the CLI flags alone
    let bootstrap = LoggingSettings {
        level: cli
            .log_level
            .clone()
            .unwrap_or_else(|| LoggingSettings::default().level),
        json: cli.json_logs,
    };
    let settings = tracing::subscriber::with_default(build_subscriber(&bootstrap), || {
        initialize_configuration_hierarchy(&cli)
    })?;
    init_logging(&settings.logging);

    info!("Starting TrimCrop");

    if let Err(e) = cli::run(cli, settings).await {
        error!("Command failed: {:#}", e);
        return Err(e);
    }

    info!("TrimCrop completed successfully");
    Ok(())
}
