// Domain rules - Validation and correction policies

use crate::domain::geometry::Size;
use crate::domain::model::*;
use crate::error::{EditorError, EditorResult};

/// Upload ceiling in bytes (500 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024;

/// MIME types the upload form accepts
pub const DEFAULT_ALLOWED_TYPES: [&str; 5] = [
    "video/mp4",
    "video/mov",
    "video/avi",
    "video/mkv",
    "video/webm",
];

/// Business rules for accepting a file before it is uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct IntakePolicy {
    pub allowed_types: Vec<String>,
    pub max_bytes: u64,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl IntakePolicy {
    pub fn new(allowed_types: Vec<String>, max_bytes: u64) -> Self {
        Self {
            allowed_types,
            max_bytes,
        }
    }

    /// Check type first, then size; the cap itself is accepted
    pub fn validate(&self, file: &VideoFile) -> EditorResult<()> {
        if !self.allowed_types.iter().any(|t| t == &file.mime) {
            return Err(EditorError::InvalidFileType {
                mime: file.mime.clone(),
            });
        }

        if file.size > self.max_bytes {
            return Err(EditorError::FileTooLarge {
                size: file.size,
                limit: self.max_bytes,
            });
        }

        Ok(())
    }
}

/// Business rules for the crop rectangle sent to the service
pub struct CropClamp;

impl CropClamp {
    /// Clamp `rect` into `[0, frame.width] x [0, frame.height]`
    ///
    /// Fails with `EmptyCropRegion` when nothing of the rectangle remains.
    pub fn clamp_to_frame(rect: CropRect, frame: Size) -> EditorResult<CropRect> {
        let max_x = (frame.width.round() as i64).max(0);
        let max_y = (frame.height.round() as i64).max(0);

        let left = rect.x.clamp(0, max_x);
        let top = rect.y.clamp(0, max_y);
        let right = rect.x.saturating_add(rect.width).clamp(0, max_x);
        let bottom = rect.y.saturating_add(rect.height).clamp(0, max_y);

        let clamped = CropRect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        };

        if clamped.width <= 0 || clamped.height <= 0 {
            return Err(EditorError::EmptyCropRegion {
                width: clamped.width,
                height: clamped.height,
            });
        }

        Ok(clamped)
    }
}

#[cfg(test)]
mod tests;
