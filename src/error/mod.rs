//! Error handling module for TrimCrop

use thiserror::Error;

use crate::domain::model::ViewState;

/// Main error type for editor session operations
#[derive(Error, Debug)]
pub enum EditorError {
    /// File MIME type is not in the allow-set
    #[error("Please select a valid video file (MP4, MOV, AVI, MKV, or WEBM)")]
    InvalidFileType { mime: String },

    /// File exceeds the upload ceiling
    #[error("File size must be less than {}MB", .limit / (1024 * 1024))]
    FileTooLarge { size: u64, limit: u64 },

    /// Upload request never produced a usable reply
    #[error("Upload failed: {message}")]
    UploadTransportFailure { message: String },

    /// Upload endpoint answered with `success: false`
    #[error("{message}")]
    UploadRejected { message: String },

    /// Process request never produced a usable reply
    #[error("Processing failed: {message}")]
    ProcessingTransportFailure { message: String },

    /// Process endpoint answered with `success: false`
    #[error("{message}")]
    ProcessingRejected { message: String },

    /// Crop rectangle is empty after clamping to the video frame
    #[error("Crop region is empty after clamping to the video frame ({width}x{height})")]
    EmptyCropRegion { width: i64, height: i64 },

    /// Aspect ratio token is neither `free` nor `W:H`
    #[error("Invalid aspect ratio: {token}. Expected 'free' or W:H")]
    InvalidAspectRatio { token: String },

    /// View transition not allowed from the current state
    #[error("Cannot {event} while in {from} view")]
    IllegalTransition { from: ViewState, event: &'static str },

    /// Operation needs an uploaded video
    #[error("No video loaded")]
    NoVideoLoaded,

    /// Operation needs video metadata (intrinsic and container size)
    #[error("Video layout unknown; metadata has not been loaded")]
    LayoutUnknown,

    /// Fetching the processed file failed
    #[error("Download failed: {message}")]
    DownloadFailure { message: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditorError {
    /// Whether this error is one of the operation failures surfaced to the user
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            EditorError::InvalidFileType { .. }
                | EditorError::FileTooLarge { .. }
                | EditorError::UploadTransportFailure { .. }
                | EditorError::UploadRejected { .. }
                | EditorError::ProcessingTransportFailure { .. }
                | EditorError::ProcessingRejected { .. }
                | EditorError::EmptyCropRegion { .. }
        )
    }
}

/// Result type alias for editor operations
pub type EditorResult<T> = std::result::Result<T, EditorError>;
