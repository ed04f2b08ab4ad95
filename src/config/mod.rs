//! Runtime settings for the editor session and its host

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::model::QualityPreset;
use crate::domain::rules::{IntakePolicy, DEFAULT_ALLOWED_TYPES, MAX_UPLOAD_BYTES};
use crate::error::{EditorError, EditorResult};

/// Complete settings tree, one TOML table per section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub intake: IntakeSettings,
    pub crop: CropSettings,
    pub progress: ProgressSettings,
    pub logging: LoggingSettings,
    pub defaults: DefaultSettings,
}

/// Processing service location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 300,
        }
    }
}

/// Upload acceptance rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeSettings {
    pub max_upload_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            max_upload_bytes: MAX_UPLOAD_BYTES,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl IntakeSettings {
    pub fn policy(&self) -> IntakePolicy {
        IntakePolicy::new(self.allowed_types.clone(), self.max_upload_bytes)
    }
}

/// How resize handles change the crop box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeMode {
    /// Every handle grows the box from its bottom-right corner
    #[default]
    BottomRight,
    /// Each handle moves only the edges it sits on
    PerHandle,
}

impl ResizeMode {
    pub fn parse(value: &str) -> EditorResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "bottom-right" | "bottom_right" => Ok(ResizeMode::BottomRight),
            "per-handle" | "per_handle" => Ok(ResizeMode::PerHandle),
            other => Err(EditorError::Config {
                message: format!(
                    "Invalid resize mode: {}. Valid modes: bottom-right, per-handle",
                    other
                ),
            }),
        }
    }
}

/// Crop overlay behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropSettings {
    pub resize_mode: ResizeMode,
    pub min_size_px: f64,
    pub default_fraction: f64,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            resize_mode: ResizeMode::BottomRight,
            min_size_px: 50.0,
            default_fraction: 0.5,
        }
    }
}

/// Simulated processing progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSettings {
    pub tick_ms: u64,
    pub ceiling_ms: u64,
    pub max_step: f64,
    pub cap: f64,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            ceiling_ms: 10_000,
            max_step: 20.0,
            cap: 90.0,
        }
    }
}

impl ProgressSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn ceiling(&self) -> Duration {
        Duration::from_millis(self.ceiling_ms)
    }
}

/// Log output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Initial form values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefaultSettings {
    pub quality: QualityPreset,
}

impl Settings {
    /// Reject values the session cannot work with
    pub fn validate(&self) -> EditorResult<()> {
        if self.server.base_url.trim().is_empty() {
            return Err(EditorError::Config {
                message: "server.base_url cannot be empty".to_string(),
            });
        }

        if self.intake.allowed_types.is_empty() {
            return Err(EditorError::Config {
                message: "intake.allowed_types cannot be empty".to_string(),
            });
        }

        if !(self.crop.default_fraction > 0.0 && self.crop.default_fraction <= 1.0) {
            return Err(EditorError::Config {
                message: format!(
                    "crop.default_fraction must be in (0, 1], got {}",
                    self.crop.default_fraction
                ),
            });
        }

        if self.crop.min_size_px < 1.0 {
            return Err(EditorError::Config {
                message: "crop.min_size_px must be at least 1".to_string(),
            });
        }

        if self.progress.cap > 100.0 || self.progress.max_step < 0.0 {
            return Err(EditorError::Config {
                message: "progress.cap must be <= 100 and progress.max_step >= 0".to_string(),
            });
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(EditorError::Config {
                message: format!(
                    "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                    other
                ),
            }),
        }
    }
}
