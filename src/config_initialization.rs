//! Configuration initialization and hierarchy management

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::TomlConfigAdapter;
use crate::cli::Cli;
use crate::config::{ResizeMode, Settings};

pub const ENV_SERVER_URL: &str = "TRIMCROP_SERVER_URL";
pub const ENV_LOG_LEVEL: &str = "TRIMCROP_LOG_LEVEL";
pub const ENV_RESIZE_MODE: &str = "TRIMCROP_RESIZE_MODE";
pub const ENV_MAX_UPLOAD_BYTES: &str = "TRIMCROP_MAX_UPLOAD_BYTES";

/// Build settings following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<Settings> {
    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let mut settings = load_config_file(cli.config.as_deref(), &cwd)?;

    apply_environment(&mut settings, |key| std::env::var(key).ok())?;
    apply_cli_overrides(&mut settings, cli);

    settings
        .validate()
        .context("Invalid configuration after applying overrides")?;
    info!(server = %settings.server.base_url, "Configuration hierarchy initialized");
    Ok(settings)
}

/// Explicit file must exist; otherwise the first discovered file, or defaults
pub fn load_config_file(explicit: Option<&Path>, root: &Path) -> Result<Settings> {
    if let Some(path) = explicit {
        return TomlConfigAdapter::load(path)
            .with_context(|| format!("Failed to load config file {}", path.display()));
    }

    match TomlConfigAdapter::discover(root) {
        Some(path) => TomlConfigAdapter::load(&path)
            .with_context(|| format!("Failed to load config file {}", path.display())),
        None => {
            debug!("No configuration file found; using defaults");
            Ok(Settings::default())
        }
    }
}

/// Apply `TRIMCROP_*` overrides read through `lookup`
pub fn apply_environment<F>(settings: &mut Settings, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let mut overrides = 0;

    if let Some(url) = lookup(ENV_SERVER_URL) {
        settings.server.base_url = url;
        overrides += 1;
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        settings.logging.level = level;
        overrides += 1;
    }

    if let Some(mode) = lookup(ENV_RESIZE_MODE) {
        settings.crop.resize_mode = ResizeMode::parse(&mode)
            .with_context(|| format!("Invalid {}", ENV_RESIZE_MODE))?;
        overrides += 1;
    }

    if let Some(bytes) = lookup(ENV_MAX_UPLOAD_BYTES) {
        settings.intake.max_upload_bytes = bytes
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {}", ENV_MAX_UPLOAD_BYTES, bytes))?;
        overrides += 1;
    }

    if overrides > 0 {
        info!("Applied {} environment variable overrides", overrides);
    }
    Ok(())
}

/// Apply global CLI flags
pub fn apply_cli_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(server) = &cli.server {
        settings.server.base_url = server.clone();
    }
    if let Some(level) = &cli.log_level {
        settings.logging.level = level.clone();
    }
    if cli.json_logs {
        settings.logging.json = true;
    }
}
