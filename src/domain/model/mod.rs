// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};

/// Video accepted by the upload endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedVideo {
    pub file_id: String,
    pub video_url: String,
    pub duration_seconds: f64,
    pub filename: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl UploadedVideo {
    /// Intrinsic frame size reported by the server, if both dimensions are known
    pub fn reported_size(&self) -> Option<crate::domain::geometry::Size> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => {
                Some(crate::domain::geometry::Size::new(w as f64, h as f64))
            }
            _ => None,
        }
    }
}

/// Trim interval in whole seconds; `None` end means "to end of video"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimRange {
    pub start_seconds: u64,
    pub end_seconds: Option<u64>,
}

impl TrimRange {
    /// Build a range, dropping an end that does not lie after the start
    pub fn new(start_seconds: u64, end_seconds: u64) -> Self {
        let end_seconds = if end_seconds > start_seconds {
            Some(end_seconds)
        } else {
            None
        };
        Self {
            start_seconds,
            end_seconds,
        }
    }
}

/// Crop rectangle in native video pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Wire form of a crop rectangle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropParams {
    pub enabled: bool,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl From<CropRect> for CropParams {
    fn from(rect: CropRect) -> Self {
        Self {
            enabled: true,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Output encoding tier forwarded to the processing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QualityPreset {
    #[serde(rename = "480p")]
    Sd480,
    #[default]
    #[serde(rename = "720p")]
    Hd720,
    #[serde(rename = "1080p")]
    FullHd1080,
    #[serde(rename = "original")]
    Original,
}

impl QualityPreset {
    pub const ALL: [QualityPreset; 4] = [
        QualityPreset::Sd480,
        QualityPreset::Hd720,
        QualityPreset::FullHd1080,
        QualityPreset::Original,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Sd480 => "480p",
            QualityPreset::Hd720 => "720p",
            QualityPreset::FullHd1080 => "1080p",
            QualityPreset::Original => "original",
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityPreset {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        QualityPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == wanted)
            .ok_or_else(|| EditorError::Config {
                message: format!(
                    "Unknown quality preset: {}. Valid presets: 480p, 720p, 1080p, original",
                    s
                ),
            })
    }
}

/// Aspect ratio lock for the crop box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Free,
    Locked { width: u32, height: u32 },
}

impl AspectRatio {
    /// Parse `free` or a `W:H` token with positive integers
    pub fn parse(token: &str) -> EditorResult<Self> {
        let trimmed = token.trim();
        if trimmed.eq_ignore_ascii_case("free") {
            return Ok(AspectRatio::Free);
        }

        let invalid = || EditorError::InvalidAspectRatio {
            token: token.to_string(),
        };
        let (w, h) = trimmed.split_once(':').ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(AspectRatio::Locked { width, height })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectRatio::Free => f.write_str("free"),
            AspectRatio::Locked { width, height } => write!(f, "{}:{}", width, height),
        }
    }
}

/// Which section of the editor is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Upload,
    Editing,
    Processing,
    Download,
}

/// Events that move the editor between views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    UploadSucceeded,
    Submit,
    ProcessingSucceeded,
    ProcessingFailed,
    Reset,
}

impl ViewEvent {
    fn label(&self) -> &'static str {
        match self {
            ViewEvent::UploadSucceeded => "open the editor",
            ViewEvent::Submit => "submit",
            ViewEvent::ProcessingSucceeded => "show the download",
            ViewEvent::ProcessingFailed => "return to the editor",
            ViewEvent::Reset => "reset",
        }
    }
}

impl ViewState {
    /// Apply an event, rejecting any pair outside the forward flow
    pub fn transition(self, event: ViewEvent) -> EditorResult<ViewState> {
        use ViewEvent::*;
        use ViewState::*;

        match (self, event) {
            (Upload, UploadSucceeded) => Ok(Editing),
            (Editing, Submit) => Ok(Processing),
            (Processing, ProcessingSucceeded) => Ok(Download),
            (Processing, ProcessingFailed) => Ok(Editing),
            (Download, Reset) => Ok(Upload),
            (from, event) => Err(EditorError::IllegalTransition {
                from,
                event: event.label(),
            }),
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewState::Upload => "upload",
            ViewState::Editing => "editing",
            ViewState::Processing => "processing",
            ViewState::Download => "download",
        };
        f.write_str(name)
    }
}

/// How a file reached the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    Picker,
    Drop,
}

/// Candidate file offered for upload
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFile {
    pub path: PathBuf,
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl VideoFile {
    /// Describe a file without touching the filesystem
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime = mime_for_path(&path).to_string();
        Self {
            path,
            name,
            mime,
            size,
        }
    }

    /// Describe a file on disk, reading its size from metadata
    pub async fn from_path(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        Ok(Self::new(path, metadata.len()))
    }
}

/// MIME type a browser would report for the file's extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "mp4" => "video/mp4",
        "mov" => "video/mov",
        "avi" => "video/avi",
        "mkv" => "video/mkv",
        "webm" => "video/webm",
        "m4v" => "video/x-m4v",
        _ => "application/octet-stream",
    }
}
