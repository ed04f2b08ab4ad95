//! TrimCrop editor library
//!
//! Headless controller for a single-page video trim/crop editor that talks
//! to a remote processing service, plus the ports, adapters and settings it
//! runs on.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::editor_session::{CropState, EditorSession};
pub use config::Settings;
pub use domain::model::{
    AspectRatio, CropParams, CropRect, FileSource, QualityPreset, TrimRange, UploadedVideo,
    VideoFile, ViewState,
};
pub use error::{EditorError, EditorResult};
pub use ports::{AlertPort, ProcessRequest, ProcessingService};
