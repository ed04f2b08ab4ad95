// TOML config adapter - Settings files on disk

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{EditorError, EditorResult};

/// Files searched, in order, when no explicit path is given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["trimcrop.toml", "config/trimcrop.toml"];

/// Loads [`Settings`] from TOML
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse settings from TOML text; missing keys keep their defaults
    pub fn parse(content: &str) -> EditorResult<Settings> {
        toml::from_str(content).map_err(|e| EditorError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Load settings from `path`
    pub fn load(path: &Path) -> EditorResult<Settings> {
        if !path.exists() {
            return Err(EditorError::Config {
                message: format!("Config file does not exist: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let settings = Self::parse(&content)?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(settings)
    }

    /// First existing file among [`DEFAULT_CONFIG_PATHS`] under `root`
    pub fn discover(root: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_PATHS
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|candidate| {
                debug!(path = %candidate.display(), "Checking for config file");
                candidate.is_file()
            })
    }
}
